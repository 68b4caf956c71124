use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

use num_dual::{Dual64, DualNum};
use num_traits::{One, Zero};

use crate::{CoreError, CoreResult};

/// Floating point type used for tabulated data
pub type Real = f64;

/// sqrt(machine epsilon), the tolerance used for saturated-line comparisons.
pub const SQRT_EPSILON: Real = 1.490_116_119_384_765_6e-8;

/// Scalar type that property evaluations are generic over.
///
/// Implemented for plain `f64` and for forward-mode dual numbers, so the same
/// PVT code yields values or values plus derivatives. Comparisons and `min`/`max`
/// act on the underlying real value; derivatives follow the selected operand.
pub trait Evaluation:
    Copy
    + Debug
    + Send
    + Sync
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Add<Real, Output = Self>
    + Sub<Real, Output = Self>
    + Mul<Real, Output = Self>
    + Div<Real, Output = Self>
{
    /// Lift a constant (zero derivatives).
    fn constant(value: Real) -> Self;

    /// Underlying real value.
    fn value(&self) -> Real;

    fn powf(self, exponent: Real) -> Self;

    fn min(self, other: Self) -> Self {
        if other.value() < self.value() { other } else { self }
    }

    fn max(self, other: Self) -> Self {
        if other.value() > self.value() { other } else { self }
    }

    fn is_finite(&self) -> bool {
        self.value().is_finite()
    }

    /// Sentinel used for "not yet assigned" storage.
    fn undefined() -> Self {
        Self::constant(Real::NAN)
    }

    fn is_undefined(&self) -> bool {
        self.value().is_nan()
    }
}

impl Evaluation for f64 {
    #[inline]
    fn constant(value: Real) -> Self {
        value
    }

    #[inline]
    fn value(&self) -> Real {
        *self
    }

    #[inline]
    fn powf(self, exponent: Real) -> Self {
        f64::powf(self, exponent)
    }
}

impl Evaluation for Dual64 {
    #[inline]
    fn constant(value: Real) -> Self {
        Dual64::from(value)
    }

    #[inline]
    fn value(&self) -> Real {
        self.re
    }

    #[inline]
    fn powf(self, exponent: Real) -> Self {
        DualNum::powf(&self, exponent)
    }
}

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Absolute-only tolerance of sqrt(machine epsilon).
    pub fn saturated_line() -> Self {
        Self {
            abs: SQRT_EPSILON,
            rel: 0.0,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::InvalidArg { what })
    }
}

//! Piecewise-linear interpolation tables.
//!
//! All tables extrapolate linearly with the slope of the nearest segment.
//! Clamping would flatten derivatives outside the tabulated range and stall
//! Newton iterations of the caller.

use bo_core::{Evaluation, ensure_finite};

use crate::error::{PvtError, PvtResult};

/// Index `i` of the segment `[keys[i], keys[i + 1]]` used for `v`.
///
/// Values outside the key range map to the first or last segment.
/// `keys` must hold at least two strictly increasing values.
fn segment_index(keys: &[f64], v: f64) -> usize {
    let n = keys.len();
    debug_assert!(n >= 2);
    if !(v > keys[1]) {
        return 0;
    }
    if v >= keys[n - 2] {
        return n - 2;
    }
    keys.partition_point(|&k| k <= v).saturating_sub(1).min(n - 2)
}

fn check_keys(what: &'static str, keys: &[f64], min: usize) -> PvtResult<()> {
    if keys.len() < min {
        return Err(PvtError::TooFewSamples {
            what,
            min,
            got: keys.len(),
        });
    }
    for &k in keys {
        ensure_finite(k, what)?;
    }
    if let Some(index) = keys.windows(2).position(|w| w[1] <= w[0]) {
        return Err(PvtError::NonMonotonicKeys {
            what,
            index: index + 1,
        });
    }
    Ok(())
}

/// `(1 + x/2) / (1 - x/2)` with `x = (b - a) / ((a + b) / 2)`.
///
/// Scale factor for extending a table column by the relative step of another.
pub(crate) fn relative_step(a: f64, b: f64) -> f64 {
    let x = (b - a) / ((a + b) / 2.0);
    (1.0 + x / 2.0) / (1.0 - x / 2.0)
}

/// One-dimensional table `y(x)` with strictly increasing `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabulated1D {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Tabulated1D {
    /// Create a table from sampling points.
    ///
    /// Requires at least two samples, finite values and strictly increasing keys.
    pub fn new(what: &'static str, x: Vec<f64>, y: Vec<f64>) -> PvtResult<Self> {
        if x.len() != y.len() {
            return Err(PvtError::LengthMismatch {
                what,
                keys: x.len(),
                values: y.len(),
            });
        }
        check_keys(what, &x, 2)?;
        for &v in &y {
            ensure_finite(v, what)?;
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    /// Evaluate at `x`, extrapolating linearly outside the key range.
    pub fn eval<E: Evaluation>(&self, x: E) -> E {
        let i = segment_index(&self.x, x.value());
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        (x - x0) * ((y1 - y0) / (x1 - x0)) + y0
    }

    /// Slope of the segment used for `x`.
    pub fn eval_derivative(&self, x: f64) -> f64 {
        let i = segment_index(&self.x, x);
        (self.y[i + 1] - self.y[i]) / (self.x[i + 1] - self.x[i])
    }

    /// Whether the values never decrease along the keys.
    pub fn is_non_decreasing(&self) -> bool {
        self.y.windows(2).all(|w| w[1] >= w[0])
    }

    /// Solve `y(x) = y` for `x` on a table with non-decreasing values.
    ///
    /// Flat segments cannot be inverted and are skipped; outside the value
    /// range the nearest rising segment is extrapolated. A table without any
    /// rising segment yields its first key.
    pub fn eval_inverse<E: Evaluation>(&self, y: E) -> E {
        let target = y.value();
        let mut chosen = None;
        let mut last_rising = None;
        for i in 0..self.y.len() - 1 {
            if self.y[i + 1] > self.y[i] {
                last_rising = Some(i);
                if target <= self.y[i + 1] {
                    chosen = Some(i);
                    break;
                }
            }
        }
        let Some(i) = chosen.or(last_rising) else {
            return E::constant(self.x[0]);
        };
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let (y0, y1) = (self.y[i], self.y[i + 1]);
        (y - y0) * ((x1 - x0) / (y1 - y0)) + x0
    }
}

/// Two-dimensional table `v(x, y)` sampled on columns of varying `y`.
///
/// The `x` keys are strictly increasing; every column is its own
/// [`Tabulated1D`] over `y`. Evaluation interpolates each neighbouring column
/// at `y` and then linearly in `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformXTabulated2D {
    x: Vec<f64>,
    columns: Vec<Tabulated1D>,
}

impl UniformXTabulated2D {
    pub fn new(what: &'static str, x: Vec<f64>, columns: Vec<Tabulated1D>) -> PvtResult<Self> {
        if x.len() != columns.len() {
            return Err(PvtError::LengthMismatch {
                what,
                keys: x.len(),
                values: columns.len(),
            });
        }
        check_keys(what, &x, 1)?;
        Ok(Self { x, columns })
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn column(&self, i: usize) -> &Tabulated1D {
        &self.columns[i]
    }

    pub fn eval<E: Evaluation>(&self, x: E, y: E) -> E {
        if self.x.len() == 1 {
            return self.columns[0].eval(y);
        }
        let i = segment_index(&self.x, x.value());
        let (x0, x1) = (self.x[i], self.x[i + 1]);
        let alpha = (x - x0) / (x1 - x0);
        let s1 = self.columns[i].eval(y);
        let s2 = self.columns[i + 1].eval(y);
        s1 + (s2 - s1) * alpha
    }
}

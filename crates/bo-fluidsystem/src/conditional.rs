//! Compile-time optional storage.
//!
//! A fluid state only stores temperature, enthalpy or dissolution factors when
//! the corresponding feature is switched on. Each feature is a [`Toggle`]
//! type; its [`Toggle::Storage`] is either [`Present<T>`], which holds the
//! value, or [`Absent<T>`], which is zero-sized. Reading or writing an absent
//! slot is a programming error and panics.

use core::fmt::{self, Debug};
use core::marker::PhantomData;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Enabled {}
    impl Sealed for super::Disabled {}
}

/// Type-level on/off switch.
pub trait Toggle: sealed::Sealed + Copy + Debug + Default + Send + Sync + 'static {
    const ENABLED: bool;

    /// Storage for a `T` under this switch.
    type Storage<T: Copy + Debug>: Slot<T>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Enabled;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disabled;

impl Toggle for Enabled {
    const ENABLED: bool = true;
    type Storage<T: Copy + Debug> = Present<T>;
}

impl Toggle for Disabled {
    const ENABLED: bool = false;
    type Storage<T: Copy + Debug> = Absent<T>;
}

/// Logical or of two toggles.
pub trait Or<B: Toggle>: Toggle {
    type Output: Toggle;
}

impl<B: Toggle> Or<B> for Enabled {
    type Output = Enabled;
}

impl<B: Toggle> Or<B> for Disabled {
    type Output = B;
}

/// Storage of a `T` that exists only when `C` is [`Enabled`].
pub type ConditionalStorage<C, T> = <C as Toggle>::Storage<T>;

/// Access to a conditionally stored value.
pub trait Slot<T>: Copy + Debug {
    const PRESENT: bool;

    fn new(value: T) -> Self;

    fn try_get(&self) -> Option<&T>;

    fn try_get_mut(&mut self) -> Option<&mut T>;

    /// Stored value. Panics if the slot is absent.
    #[track_caller]
    fn get(&self, what: &'static str) -> &T {
        match self.try_get() {
            Some(value) => value,
            None => disabled(what),
        }
    }

    /// Mutable stored value. Panics if the slot is absent.
    #[track_caller]
    fn get_mut(&mut self, what: &'static str) -> &mut T {
        match self.try_get_mut() {
            Some(value) => value,
            None => disabled(what),
        }
    }
}

#[cold]
#[track_caller]
fn disabled(what: &'static str) -> ! {
    panic!("{what} is not enabled for this fluid state")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Present<T>(T);

pub struct Absent<T>(PhantomData<T>);

impl<T> Clone for Absent<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Absent<T> {}

impl<T> Debug for Absent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Absent")
    }
}

impl<T: Copy + Debug> Slot<T> for Present<T> {
    const PRESENT: bool = true;

    #[inline]
    fn new(value: T) -> Self {
        Present(value)
    }

    #[inline]
    fn try_get(&self) -> Option<&T> {
        Some(&self.0)
    }

    #[inline]
    fn try_get_mut(&mut self) -> Option<&mut T> {
        Some(&mut self.0)
    }
}

impl<T: Copy + Debug> Slot<T> for Absent<T> {
    const PRESENT: bool = false;

    #[inline]
    fn new(_value: T) -> Self {
        Absent(PhantomData)
    }

    #[inline]
    fn try_get(&self) -> Option<&T> {
        None
    }

    #[inline]
    fn try_get_mut(&mut self) -> Option<&mut T> {
        None
    }
}

/// Compile-time feature set of a fluid state.
pub trait FluidFeatures: Copy + Debug + Default + Send + Sync + 'static {
    /// Temperature is a primary quantity.
    type Temperature: Toggle;
    /// Enthalpy is stored; implies a stored temperature.
    type Energy: Toggle;
    /// Rs and Rv are stored.
    type Dissolution: Toggle;
    /// Temperature storage: `Temperature` or `Energy`.
    type StoredTemperature: Toggle;
}

/// Feature set assembled from three toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Features<T, E, D>(PhantomData<(T, E, D)>);

impl<T, E, D> FluidFeatures for Features<T, E, D>
where
    T: Toggle + Or<E>,
    E: Toggle,
    D: Toggle,
{
    type Temperature = T;
    type Energy = E;
    type Dissolution = D;
    type StoredTemperature = <T as Or<E>>::Output;
}

/// Isothermal immiscible phases.
pub type Immiscible = Features<Disabled, Disabled, Disabled>;
/// Isothermal black-oil with dissolved gas and vaporized oil.
pub type BlackOil = Features<Disabled, Disabled, Enabled>;
/// Black-oil with a temperature primary variable.
pub type ThermalBlackOil = Features<Enabled, Disabled, Enabled>;
/// Black-oil with energy conservation.
pub type EnergyBlackOil = Features<Disabled, Enabled, Enabled>;

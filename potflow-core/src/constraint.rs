//! Numeric constraints checked once at construction time.
//!
//! A [`Constrained<T, C>`] value is guaranteed to satisfy the constraint `C`
//! for as long as it exists, so code receiving one never re-validates it.
//!
//! # Provided Constraints
//!
//! - [`StrictlyPositive`]: Greater than zero (densities).
//! - [`Finite`]: Neither infinite nor NaN (amplitudes, locations, angles).

use std::{cmp::Ordering, marker::PhantomData};

use num_traits::Zero;
use thiserror::Error;

use crate::FlowError;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value must be finite")]
    Infinite,
}

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use potflow_core::constraint::{Constrained, StrictlyPositive};
///
/// let n = Constrained::<_, StrictlyPositive>::new(1.2).unwrap();
/// assert_eq!(n.into_inner(), 1.2);
///
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker for values greater than zero.
///
/// Works with primitive floats and with `uom` quantities such as `MassDensity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// Marker for finite floating point values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

impl Constraint<f64> for Finite {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}

/// Checks that a named flow parameter is finite.
///
/// # Errors
///
/// Returns [`FlowError::InvalidParameter`] naming the offending parameter.
pub fn finite(name: &'static str, value: f64) -> Result<f64, FlowError> {
    Constrained::<f64, Finite>::new(value)
        .map(Constrained::into_inner)
        .map_err(|_| FlowError::InvalidParameter { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::MassDensity, mass_density::kilogram_per_cubic_meter};

    #[test]
    fn strictly_positive_floats() {
        assert!(Constrained::<f64, StrictlyPositive>::new(2.0).is_ok());
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(0.0),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(-1.0),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn strictly_positive_density() {
        let water = MassDensity::new::<kilogram_per_cubic_meter>(998.2);
        let density = Constrained::<_, StrictlyPositive>::new(water).unwrap();
        assert_eq!(density.into_inner(), water);

        let vacuum = MassDensity::new::<kilogram_per_cubic_meter>(0.0);
        assert!(Constrained::<_, StrictlyPositive>::new(vacuum).is_err());
    }

    #[test]
    fn finite_parameters() {
        assert_eq!(finite("amplitude", 3.5), Ok(3.5));
        assert_eq!(
            finite("amplitude", f64::INFINITY),
            Err(FlowError::InvalidParameter {
                name: "amplitude",
                value: f64::INFINITY,
            })
        );
        assert!(finite("x0", f64::NAN).is_err());
    }
}

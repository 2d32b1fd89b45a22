use num_complex::Complex64;

use crate::FlowError;

/// A finite real scale factor.
///
/// Used for a composite's input scale (applied to coordinates) and output
/// scale (applied to the result), and for a primitive's input scale.
///
/// Construction rejects NaN, infinities, and complex values with a nonzero
/// imaginary part, so a flow can never be scaled into a non-real potential.
///
/// # Example
///
/// ```
/// use potflow_core::{Complex64, Scale};
///
/// assert_eq!(Scale::try_from(2.5).unwrap().value(), 2.5);
/// assert!(Scale::try_from(Complex64::new(1.0, 1.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Scale(f64);

impl Scale {
    /// The identity scale.
    pub const ONE: Self = Self(1.0);

    /// Creates a scale factor.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidScale`] if `value` is not finite.
    pub fn new(value: f64) -> Result<Self, FlowError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(FlowError::InvalidScale { re: value, im: 0.0 })
        }
    }

    /// Returns the factor as an `f64`.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns `true` for the identity scale.
    #[must_use]
    pub fn is_one(self) -> bool {
        self == Self::ONE
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Scale {
    type Error = FlowError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<f32> for Scale {
    type Error = FlowError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(f64::from(value))
    }
}

impl TryFrom<i32> for Scale {
    type Error = FlowError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(f64::from(value))
    }
}

/// Accepts complex values only when they lie on the real axis.
impl TryFrom<Complex64> for Scale {
    type Error = FlowError;

    fn try_from(value: Complex64) -> Result<Self, Self::Error> {
        if value.im == 0.0 && value.re.is_finite() {
            Ok(Self(value.re))
        } else {
            Err(FlowError::InvalidScale {
                re: value.re,
                im: value.im,
            })
        }
    }
}

impl From<Scale> for f64 {
    fn from(scale: Scale) -> Self {
        scale.0
    }
}

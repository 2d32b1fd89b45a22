//! Shared pieces of the flows with a point singularity.

use num_complex::Complex64;
use potflow_core::Velocity;

/// Magnitude of the real part of [`clamped_ln`] at the origin.
///
/// Source and vortex potentials stay finite at their center by substituting
/// this value for `ln|w| = −∞`.
pub const POTENTIAL_SENTINEL: f64 = 1.0e10;

/// Returns `ln(w)`, or `−POTENTIAL_SENTINEL` when `w` is zero.
///
/// # Example
///
/// ```
/// use potflow_flows::{POTENTIAL_SENTINEL, clamped_ln};
/// use potflow_core::Complex64;
///
/// assert_eq!(clamped_ln(Complex64::new(0.0, 0.0)).re, -POTENTIAL_SENTINEL);
/// assert_eq!(clamped_ln(Complex64::new(1.0, 0.0)).re, 0.0);
/// ```
#[must_use]
pub fn clamped_ln(w: Complex64) -> Complex64 {
    if w.re == 0.0 && w.im == 0.0 {
        Complex64::new(-POTENTIAL_SENTINEL, 0.0)
    } else {
        w.ln()
    }
}

/// Converts polar velocity components at offset `w` to Cartesian ones.
///
/// `components` maps the polar coordinates `(r, θ)` of `w` to `(vr, vθ)`. At `r = 0` the velocity is
/// clamped to zero when `clamp` is set, and left to IEEE arithmetic otherwise.
pub(crate) fn polar_velocity(
    w: Complex64,
    clamp: bool,
    components: impl FnOnce(f64, f64) -> (f64, f64),
) -> Velocity {
    let (r, theta) = potflow_core::polar::to_polar(w.re, w.im);
    if clamp && r == 0.0 {
        return Velocity::ZERO;
    }
    let (vr, vt) = components(r, theta);
    Velocity::from_polar(vr, vt, theta)
}

/// Defines a flow with a strength, a center `z0`, and an input scale.
///
/// The generated type evaluates at the offset `w = s·z − z0` and provides the
/// shared constructors. The `Flow` impl is left to each module.
macro_rules! point_singularity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            strength: f64,
            center: ::num_complex::Complex64,
            input_scale: ::potflow_core::Scale,
        }

        impl $name {
            /// Creates a flow of the given strength centered at the origin.
            ///
            /// # Errors
            ///
            /// Returns [`FlowError::InvalidParameter`] if `strength` is not finite.
            ///
            /// [`FlowError::InvalidParameter`]: ::potflow_core::FlowError::InvalidParameter
            pub fn new(strength: f64) -> Result<Self, ::potflow_core::FlowError> {
                Ok(Self {
                    strength: ::potflow_core::constraint::finite("strength", strength)?,
                    center: ::num_complex::Complex64::new(0.0, 0.0),
                    input_scale: ::potflow_core::Scale::ONE,
                })
            }

            /// Returns this flow moved to `(x0, y0)`.
            ///
            /// # Errors
            ///
            /// Returns [`FlowError::InvalidParameter`] if either coordinate is
            /// not finite.
            ///
            /// [`FlowError::InvalidParameter`]: ::potflow_core::FlowError::InvalidParameter
            pub fn at(self, x0: f64, y0: f64) -> Result<Self, ::potflow_core::FlowError> {
                let x0 = ::potflow_core::constraint::finite("x0", x0)?;
                let y0 = ::potflow_core::constraint::finite("y0", y0)?;
                Ok(Self {
                    center: ::num_complex::Complex64::new(x0, y0),
                    ..self
                })
            }

            /// Returns this flow with coordinates multiplied by `input_scale`.
            #[must_use]
            pub fn with_input_scale(self, input_scale: ::potflow_core::Scale) -> Self {
                Self { input_scale, ..self }
            }

            #[must_use]
            pub fn strength(&self) -> f64 {
                self.strength
            }

            /// Returns the location `z0` of the singularity in scaled coordinates.
            #[must_use]
            pub fn center(&self) -> ::num_complex::Complex64 {
                self.center
            }

            #[must_use]
            pub fn input_scale(&self) -> ::potflow_core::Scale {
                self.input_scale
            }

            fn offset(&self, z: ::num_complex::Complex64) -> ::num_complex::Complex64 {
                z * self.input_scale.value() - self.center
            }

            fn offset_expr(&self) -> ::potflow_core::symbolic::Expr {
                use ::potflow_core::symbolic::Expr;
                Expr::real(self.input_scale.value()) * Expr::z() - Expr::constant(self.center)
            }
        }
    };
}

pub(crate) use point_singularity;

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn ln_is_finite_at_origin() {
        let w = clamped_ln(Complex64::new(0.0, 0.0));
        assert!(w.re.is_finite() && w.im.is_finite());
        assert_eq!(w, Complex64::new(-POTENTIAL_SENTINEL, 0.0));

        let w = clamped_ln(Complex64::new(0.0, 2.0));
        assert_relative_eq!(w.re, 2.0_f64.ln());
        assert_relative_eq!(w.im, std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn clamp_only_applies_at_origin() {
        let radial = |r: f64, _: f64| (1.0 / r, 0.0);

        assert_eq!(
            polar_velocity(Complex64::new(0.0, 0.0), true, radial),
            Velocity::ZERO
        );
        assert!(!polar_velocity(Complex64::new(0.0, 0.0), false, radial).is_finite());

        let v = polar_velocity(Complex64::new(0.0, 2.0), true, radial);
        assert_relative_eq!(v.vx, 0.0, epsilon = 1e-16);
        assert_relative_eq!(v.vy, 0.5);
    }
}

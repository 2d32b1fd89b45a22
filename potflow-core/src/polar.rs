//! Cartesian and polar coordinate conversions.

use std::f64::consts::PI;

/// Converts `(x, y)` to `(r, θ)` with `θ` in `(−π, π]`.
///
/// # Example
///
/// ```
/// use potflow_core::polar::to_polar;
///
/// let (r, theta) = to_polar(0.0, 2.0);
/// assert_eq!(r, 2.0);
/// assert_eq!(theta, std::f64::consts::FRAC_PI_2);
/// ```
#[must_use]
pub fn to_polar(x: f64, y: f64) -> (f64, f64) {
    let theta = y.atan2(x);
    // atan2 returns −π for a negative-zero `y` on the negative x axis.
    let theta = if theta == -PI { PI } else { theta };
    (x.hypot(y), theta)
}

/// Converts `(r, θ)` to `(x, y)`.
#[must_use]
pub fn to_cartesian(r: f64, theta: f64) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    (r * cos, r * sin)
}

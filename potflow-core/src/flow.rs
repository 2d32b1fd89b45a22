use std::{
    fmt,
    ops::{Add, AddAssign, Mul, Neg},
    sync::Arc,
};

use num_complex::Complex64;

use crate::{Composite, FlowError, Scale, symbolic::Expr};

/// A planar velocity vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    /// The zero velocity.
    pub const ZERO: Self = Self { vx: 0.0, vy: 0.0 };

    /// Creates a velocity from its Cartesian components.
    #[must_use]
    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    /// Creates a velocity from radial and tangential components at angle `theta`.
    ///
    /// Applies the rotation
    /// `(vx, vy) = (vr·cosθ − vθ·sinθ, vr·sinθ + vθ·cosθ)`.
    #[must_use]
    pub fn from_polar(vr: f64, vt: f64, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            vx: vr * cos - vt * sin,
            vy: vr * sin + vt * cos,
        }
    }

    /// Creates a velocity from the complex velocity `w = dF/dz = vx − i·vy`.
    #[must_use]
    pub fn from_complex_velocity(w: Complex64) -> Self {
        Self { vx: w.re, vy: -w.im }
    }

    /// Returns `|v|²`.
    #[must_use]
    pub fn speed_squared(self) -> f64 {
        self.vx * self.vx + self.vy * self.vy
    }

    /// Returns `|v|`.
    #[must_use]
    pub fn speed(self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.vx.is_finite() && self.vy.is_finite()
    }
}

impl Add for Velocity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            vx: self.vx + rhs.vx,
            vy: self.vy + rhs.vy,
        }
    }
}

impl AddAssign for Velocity {
    fn add_assign(&mut self, rhs: Self) {
        self.vx += rhs.vx;
        self.vy += rhs.vy;
    }
}

impl Mul<f64> for Velocity {
    type Output = Self;

    fn mul(self, k: f64) -> Self {
        Self {
            vx: self.vx * k,
            vy: self.vy * k,
        }
    }
}

impl Neg for Velocity {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            vx: -self.vx,
            vy: -self.vy,
        }
    }
}

/// The core trait for two-dimensional potential flows.
///
/// A `Flow` is defined by its complex potential `F(z) = φ + i·ψ`, where `φ` is
/// the velocity potential and `ψ` the stream function, together with a
/// closed-form velocity. The two must agree: `dF/dz = vx − i·vy` wherever
/// the flow is regular.
///
/// ## Implementing `Flow`
///
/// Implement [`complex_potential_at()`] and [`velocity_at()`] for a single
/// point `z = x + i·y`. Array evaluation, superposition and scaling are
/// provided for every flow through [`Fields`] and [`FlowExt`].
///
/// Flows are immutable once built and are shared between composites through
/// [`FlowRef`], hence the `Send + Sync` bound.
///
/// [`complex_potential_at()`]: Flow::complex_potential_at
/// [`velocity_at()`]: Flow::velocity_at
/// [`Fields`]: crate::Fields
pub trait Flow: fmt::Debug + Send + Sync {
    /// Returns the complex potential `F(z)`.
    fn complex_potential_at(&self, z: Complex64) -> Complex64;

    /// Returns the velocity at `z`.
    fn velocity_at(&self, z: Complex64) -> Velocity;

    /// Returns the stream function `ψ = Im F(z)`.
    fn stream_at(&self, z: Complex64) -> f64 {
        self.complex_potential_at(z).im
    }

    /// Returns the velocity potential `φ = Re F(z)`.
    fn potential_at(&self, z: Complex64) -> f64 {
        self.complex_potential_at(z).re
    }

    /// Returns the complex potential as a symbolic expression, if available.
    ///
    /// Defaults to `None`.
    fn symbolic(&self) -> Option<Expr> {
        None
    }
}

/// A shared, type-erased flow.
///
/// Composites hold their children as `FlowRef`s, so one primitive can appear
/// in any number of composites without being copied.
pub type FlowRef = Arc<dyn Flow>;

impl<F: Flow + ?Sized> Flow for Arc<F> {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        (**self).complex_potential_at(z)
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        (**self).velocity_at(z)
    }

    fn stream_at(&self, z: Complex64) -> f64 {
        (**self).stream_at(z)
    }

    fn potential_at(&self, z: Complex64) -> f64 {
        (**self).potential_at(z)
    }

    fn symbolic(&self) -> Option<Expr> {
        (**self).symbolic()
    }
}

/// Superposition and scaling for owned flows.
///
/// Blanket-implemented for every sized `Flow`. For flows that are already
/// shared as a [`FlowRef`], use [`combine`] and [`scale`] instead.
///
/// [`combine`]: crate::combine
/// [`scale`]: crate::scale
pub trait FlowExt: Flow + Sized + 'static {
    /// Moves this flow behind a [`FlowRef`].
    fn shared(self) -> FlowRef {
        Arc::new(self)
    }

    /// Superposes this flow with another, unscaled.
    ///
    /// The result nests: adding to a composite wraps it rather than
    /// flattening its children.
    ///
    /// # Example
    ///
    /// ```
    /// use potflow_core::{Complex64, Flow, FlowExt, symbolic::{Expr, Symbolic}};
    ///
    /// let stream = Symbolic::new(Expr::real(2.0) * Expr::z());
    /// let doubled = Symbolic::new(Expr::real(2.0) * Expr::z()).plus(stream);
    ///
    /// let v = doubled.velocity_at(Complex64::new(1.0, 1.0));
    /// assert_eq!((v.vx, v.vy), (4.0, 0.0));
    /// ```
    fn plus<Other: Flow + 'static>(self, other: Other) -> Composite {
        Composite::new(vec![self.shared(), other.shared()])
    }

    /// Multiplies this flow by a real factor `k`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidScale`] if `k` is not a finite real number,
    /// including complex values with a nonzero imaginary part.
    fn scale<K>(self, k: K) -> Result<Composite, FlowError>
    where
        K: TryInto<Scale, Error = FlowError>,
    {
        let k = k.try_into()?;
        Ok(Composite::new(vec![self.shared()]).with_output_scale(k))
    }
}

impl<F: Flow + Sized + 'static> FlowExt for F {}

use num_complex::Complex64;
use potflow_core::{Flow, Velocity, symbolic::Expr};

use crate::kernel::{clamped_ln, point_singularity, polar_velocity};

point_singularity! {
    /// A point source (positive strength) or sink (negative strength).
    ///
    /// With `w = s·z − z0`, the complex potential is `F(z) = A·ln(w)` and the
    /// velocity is purely radial, `vr = s·A / r`.
    ///
    /// At the center the velocity is clamped to zero and the potential uses
    /// [`POTENTIAL_SENTINEL`] in place of `ln 0`.
    ///
    /// [`POTENTIAL_SENTINEL`]: crate::POTENTIAL_SENTINEL
    ///
    /// # Example
    ///
    /// ```
    /// use potflow_core::{Complex64, Flow};
    /// use potflow_flows::Source;
    ///
    /// let source = Source::new(2.0).unwrap();
    /// let v = source.velocity_at(Complex64::new(2.0, 0.0));
    /// assert_eq!((v.vx, v.vy), (1.0, 0.0));
    /// ```
    Source
}

impl Flow for Source {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        clamped_ln(self.offset(z)) * self.strength
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        let k = self.input_scale.value() * self.strength;
        polar_velocity(self.offset(z), true, |r, _| (k / r, 0.0))
    }

    fn symbolic(&self) -> Option<Expr> {
        Some((Expr::real(self.strength) * self.offset_expr().ln()).simplify())
    }
}

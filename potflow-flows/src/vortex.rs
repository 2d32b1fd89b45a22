use num_complex::Complex64;
use potflow_core::{Flow, Velocity, symbolic::Expr};

use crate::kernel::{clamped_ln, point_singularity, polar_velocity};

point_singularity! {
    /// An irrotational point vortex, counterclockwise for positive strength.
    ///
    /// With `w = s·z − z0`, the complex potential is `F(z) = −i·A·ln(w)` and
    /// the velocity is purely tangential, `vθ = s·A / r`.
    ///
    /// Shares the center policy of [`Source`](crate::Source): zero velocity
    /// and a sentinel potential at `z0`.
    Vortex
}

impl Flow for Vortex {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        clamped_ln(self.offset(z)) * Complex64::new(0.0, -self.strength)
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        let k = self.input_scale.value() * self.strength;
        polar_velocity(self.offset(z), true, |r, _| (0.0, k / r))
    }

    fn symbolic(&self) -> Option<Expr> {
        let coefficient = Expr::constant(Complex64::new(0.0, -self.strength));
        Some((coefficient * self.offset_expr().ln()).simplify())
    }
}

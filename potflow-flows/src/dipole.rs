use num_complex::Complex64;
use potflow_core::{Flow, Velocity, symbolic::Expr};

use crate::kernel::{point_singularity, polar_velocity};

point_singularity! {
    /// A doublet: a source and sink pair in the limit of zero separation.
    ///
    /// With `w = s·z − z0`, the complex potential is `F(z) = A / w`, giving
    /// `vr = −(s·A / r²)·cosθ` and `vθ = −(s·A / r²)·sinθ`.
    ///
    /// The center is not clamped. Evaluating exactly at `z0` produces
    /// non-finite values, which never affect other samples of a grid.
    Dipole
}

impl Flow for Dipole {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        Complex64::new(self.strength, 0.0) / self.offset(z)
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        let k = self.input_scale.value() * self.strength;
        polar_velocity(self.offset(z), false, |r, theta| {
            let magnitude = -k / (r * r);
            let (sin, cos) = theta.sin_cos();
            (magnitude * cos, magnitude * sin)
        })
    }

    fn symbolic(&self) -> Option<Expr> {
        Some((Expr::real(self.strength) / self.offset_expr()).simplify())
    }
}

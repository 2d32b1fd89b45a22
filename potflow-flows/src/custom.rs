use std::{fmt, sync::Arc};

use num_complex::Complex64;
use potflow_core::{
    Flow, Velocity,
    symbolic::{Expr, Symbolic},
};

type PotentialFn = Arc<dyn Fn(Complex64) -> Complex64 + Send + Sync>;
type VelocityFn = Arc<dyn Fn(Complex64) -> Velocity + Send + Sync>;

/// A flow defined by caller-supplied functions.
///
/// The caller is responsible for keeping the velocity consistent with the
/// potential, `dF/dz = vx − i·vy`. [`Custom::from_symbolic`] guarantees this
/// by deriving both from one expression.
///
/// # Example
///
/// ```
/// use potflow_core::{Complex64, Flow, Velocity};
/// use potflow_flows::Custom;
///
/// // Flow in a right-angle corner: F(z) = z².
/// let corner = Custom::new(|z| z * z, |z| Velocity::from_complex_velocity(z * 2.0));
///
/// let v = corner.velocity_at(Complex64::new(1.0, 1.0));
/// assert_eq!((v.vx, v.vy), (2.0, -2.0));
/// ```
#[derive(Clone)]
pub struct Custom {
    potential: PotentialFn,
    velocity: VelocityFn,
    symbolic: Option<Expr>,
}

impl Custom {
    pub fn new<P, V>(potential: P, velocity: V) -> Self
    where
        P: Fn(Complex64) -> Complex64 + Send + Sync + 'static,
        V: Fn(Complex64) -> Velocity + Send + Sync + 'static,
    {
        Self {
            potential: Arc::new(potential),
            velocity: Arc::new(velocity),
            symbolic: None,
        }
    }

    /// Creates a flow whose potential and velocity are both evaluated from
    /// the closed form `potential` and its exact derivative.
    #[must_use]
    pub fn from_symbolic(potential: Expr) -> Self {
        let closed = Arc::new(Symbolic::new(potential));
        let symbolic = closed.expr().clone();
        let for_velocity = Arc::clone(&closed);

        Self {
            potential: Arc::new(move |z| closed.complex_potential_at(z)),
            velocity: Arc::new(move |z| for_velocity.velocity_at(z)),
            symbolic: Some(symbolic),
        }
    }

    /// Attaches a symbolic form to a function-defined flow.
    #[must_use]
    pub fn with_symbolic(self, expr: Expr) -> Self {
        Self {
            symbolic: Some(expr),
            ..self
        }
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("symbolic", &self.symbolic)
            .finish_non_exhaustive()
    }
}

impl Flow for Custom {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        (self.potential)(z)
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        (self.velocity)(z)
    }

    fn symbolic(&self) -> Option<Expr> {
        self.symbolic.clone()
    }
}

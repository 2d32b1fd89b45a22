use thiserror::Error;

use crate::constraint::ConstraintError;

/// Errors that may occur when building or evaluating a flow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    /// Pressure was requested before a Bernoulli reference was captured.
    ///
    /// Call [`FlowContext::with_initial_conditions`] first.
    ///
    /// [`FlowContext::with_initial_conditions`]: crate::FlowContext::with_initial_conditions
    #[error("initial conditions must be set before evaluating pressure")]
    MissingInitialConditions,

    /// A scale factor is not a finite real number.
    #[error("scale factor must be a finite real number, got {re} + {im}i")]
    InvalidScale { re: f64, im: f64 },

    /// The velocity at the requested reference point is not finite.
    ///
    /// The reference point must be a regular point of the flow.
    #[error("velocity at reference point ({x}, {y}) is not finite")]
    SingularReference { x: f64, y: f64 },

    /// The `x` and `y` coordinate arrays differ in shape.
    #[error("coordinate arrays differ in shape: {x:?} vs {y:?}")]
    ShapeMismatch { x: Vec<usize>, y: Vec<usize> },

    /// The fluid density violates its constraint.
    #[error("invalid density: {0}")]
    InvalidDensity(#[from] ConstraintError),

    /// A flow parameter is not a finite number.
    #[error("parameter `{name}` must be finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A uniform-flow direction is neither an axis token nor a finite angle.
    #[error("direction must be `x`, `y`, or a finite angle in radians, got `{0}`")]
    InvalidDirection(String),

    /// A flow name was not recognized.
    #[error("unknown flow `{0}`")]
    UnknownFlow(String),

    /// A composition was requested over zero flows.
    #[error("cannot compose an empty list of flows")]
    EmptyComposition,
}

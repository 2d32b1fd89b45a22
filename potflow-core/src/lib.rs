//! Composable two-dimensional potential flow.
//!
//! A [`Flow`] is anything with an analytic complex potential `F(z)` and a
//! matching closed-form velocity. Flows superpose linearly, so elementary
//! flows can be added and scaled into a [`Composite`] that is itself a flow.
//!
//! Derived fields (stream function, velocity potential, velocity arrays) are
//! provided once for every flow through [`Fields`]. Pressure depends on a
//! fluid density and a Bernoulli reference, both held by a [`FlowContext`].

mod composite;
mod context;
mod error;
mod fields;
mod flow;
mod scale;

pub mod constraint;
pub mod grid;
pub mod polar;
pub mod symbolic;

pub use composite::{Composite, combine, scale};
pub use context::{FlowContext, InitialConditions};
pub use error::FlowError;
pub use fields::{Fields, speed};
pub use flow::{Flow, FlowExt, FlowRef, Velocity};
pub use grid::Grid;
pub use scale::Scale;

pub use num_complex::Complex64;

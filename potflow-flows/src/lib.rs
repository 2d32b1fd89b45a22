//! Elementary two-dimensional potential flows.
//!
//! Each flow here implements [`Flow`] with a closed-form complex potential and
//! velocity, and an exact symbolic form. Flows superpose with `+` into a
//! [`Composite`], or can be built by name through the [`catalog`].

mod custom;
mod dipole;
mod kernel;
mod source;
mod uniform;
mod vortex;

pub mod catalog;

pub use custom::Custom;
pub use dipole::Dipole;
pub use kernel::{POTENTIAL_SENTINEL, clamped_ln};
pub use source::Source;
pub use uniform::{Direction, Uniform};
pub use vortex::Vortex;

use potflow_core::{Composite, Flow, FlowExt};

/// Implements `+` for flow types, superposing them into a [`Composite`].
macro_rules! impl_superposition {
    ($($flow:ty),+ $(,)?) => {
        $(
            impl<Rhs: Flow + 'static> std::ops::Add<Rhs> for $flow {
                type Output = Composite;

                fn add(self, rhs: Rhs) -> Composite {
                    self.plus(rhs)
                }
            }
        )+
    };
}

impl_superposition!(Uniform, Source, Vortex, Dipole, Custom);

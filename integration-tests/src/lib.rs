//! Shared fixtures for the cross-crate tests.

use potflow_core::{Complex64, Composite, Flow, FlowContext, FlowError};
use potflow_flows::catalog::{FlowSpec, compose};
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{MassDensity, Pressure},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
};

/// Initializes logging once per test binary. Set `RUST_LOG` to see output.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns the central-difference gradient `(∂f/∂x, ∂f/∂y)` of `f` at `z`.
pub fn gradient(f: impl Fn(Complex64) -> f64, z: Complex64, h: f64) -> (f64, f64) {
    let dx = Complex64::new(h, 0.0);
    let dy = Complex64::new(0.0, h);
    (
        (f(z + dx) - f(z - dx)) / (2.0 * h),
        (f(z + dy) - f(z - dy)) / (2.0 * h),
    )
}

/// Returns the gradient of the velocity potential, which equals the velocity.
pub fn potential_gradient<F: Flow + ?Sized>(flow: &F, z: Complex64) -> (f64, f64) {
    gradient(|z| flow.potential_at(z), z, 1e-6)
}

/// A complete flow configuration, as it might be stored alongside a plot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    /// Fluid density in kg/m³. Defaults to 1.
    pub density: Option<f64>,
    pub reference: Option<Reference>,
    pub flows: Vec<FlowSpec>,
}

/// A Bernoulli reference point with its static pressure in pascals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reference {
    pub x0: f64,
    pub y0: f64,
    pub pressure: f64,
}

impl Scenario {
    /// Parses a scenario from TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error, including unknown flow labels.
    pub fn from_toml(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Composes the flows and applies the density and reference.
    ///
    /// # Errors
    ///
    /// Returns a [`FlowError`] from composition or context configuration.
    pub fn context(&self) -> Result<FlowContext<Composite>, FlowError> {
        let mut context = FlowContext::new(compose(&self.flows)?);

        if let Some(density) = self.density {
            context =
                context.with_density(MassDensity::new::<kilogram_per_cubic_meter>(density))?;
        }

        if let Some(Reference { x0, y0, pressure }) = self.reference {
            context = context.with_initial_conditions(x0, y0, Pressure::new::<pascal>(pressure))?;
        }

        Ok(context)
    }
}

//! Building flows by name.
//!
//! A [`FlowSpec`] describes one term of a superposition the way a form or a
//! configuration file would: a [`FlowKind`] label plus plain numeric
//! parameters. [`compose`] sums a list of them into a single flow.
//!
//! # Example
//!
//! ```
//! use potflow_core::{Complex64, Flow};
//! use potflow_flows::catalog::{FlowKind, FlowSpec, compose};
//!
//! let flow = compose(&[
//!     FlowSpec::default(),
//!     FlowSpec {
//!         kind: "Fuente".parse().unwrap(),
//!         amplitude: 2.0,
//!         x0: -1.0,
//!         ..FlowSpec::default()
//!     },
//! ])
//! .unwrap();
//!
//! let v = flow.velocity_at(Complex64::new(0.0, 0.0));
//! assert_eq!((v.vx, v.vy), (3.0, 0.0));
//! ```

use std::{fmt, str::FromStr};

use potflow_core::{Composite, FlowError, FlowExt, FlowRef, Scale};

use crate::{Direction, Dipole, Source, Uniform, Vortex};

/// The elementary flows that can be built by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum FlowKind {
    #[default]
    Uniform,
    Source,
    Vortex,
    Dipole,
}

impl FlowKind {
    pub const ALL: [FlowKind; 4] = [Self::Uniform, Self::Source, Self::Vortex, Self::Dipole];

    /// Returns the display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Uniform => "Uniform",
            Self::Source => "Source",
            Self::Vortex => "Irrotational Vortex",
            Self::Dipole => "Dipole",
        }
    }
}

/// Parses a label case-insensitively.
///
/// Besides the display labels, accepts the short forms `"vortex"` and
/// `"doublet"`, `"sink"` for a source, and the Spanish labels `"Uniforme"`,
/// `"Fuente"`, `"Vortice Irrotacional"` and `"Doblete"`.
impl FromStr for FlowKind {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match label.as_str() {
            "uniform" | "uniforme" => Ok(Self::Uniform),
            "source" | "sink" | "fuente" => Ok(Self::Source),
            "irrotational vortex" | "vortex" | "vortice irrotacional" | "vórtice irrotacional" => {
                Ok(Self::Vortex)
            }
            "dipole" | "doublet" | "doblete" => Ok(Self::Dipole),
            _ => Err(FlowError::UnknownFlow(s.to_owned())),
        }
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<String> for FlowKind {
    type Error = FlowError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<FlowKind> for String {
    fn from(kind: FlowKind) -> Self {
        kind.label().to_owned()
    }
}

/// One term of a superposition.
///
/// Builds `output_scale · kind(amplitude, input_scale, (x0, y0))`. Uniform
/// streams have no location and ignore `x0` and `y0`; `direction` applies to
/// them alone.
///
/// Every field defaults, so a configuration only names what differs from a
/// unit uniform stream along `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FlowSpec {
    pub kind: FlowKind,
    pub amplitude: f64,
    pub input_scale: f64,
    pub output_scale: f64,
    pub x0: f64,
    pub y0: f64,
    pub direction: Direction,
}

impl Default for FlowSpec {
    fn default() -> Self {
        Self {
            kind: FlowKind::Uniform,
            amplitude: 1.0,
            input_scale: 1.0,
            output_scale: 1.0,
            x0: 0.0,
            y0: 0.0,
            direction: Direction::X,
        }
    }
}

impl FlowSpec {
    /// Creates a spec of the given kind with every other field defaulted.
    #[must_use]
    pub fn new(kind: FlowKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Builds the scaled flow.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidScale`] for a non-finite scale, or
    /// [`FlowError::InvalidParameter`] for a non-finite amplitude, location,
    /// or direction angle.
    pub fn build(&self) -> Result<Composite, FlowError> {
        let input_scale = Scale::new(self.input_scale)?;

        let flow: FlowRef = match self.kind {
            FlowKind::Uniform => Uniform::new(self.amplitude)?
                .with_direction(self.direction)?
                .with_input_scale(input_scale)
                .shared(),
            FlowKind::Source => Source::new(self.amplitude)?
                .at(self.x0, self.y0)?
                .with_input_scale(input_scale)
                .shared(),
            FlowKind::Vortex => Vortex::new(self.amplitude)?
                .at(self.x0, self.y0)?
                .with_input_scale(input_scale)
                .shared(),
            FlowKind::Dipole => Dipole::new(self.amplitude)?
                .at(self.x0, self.y0)?
                .with_input_scale(input_scale)
                .shared(),
        };

        log::debug!(
            "built {} (A = {}, s = {}, k = {}) at ({}, {})",
            self.kind,
            self.amplitude,
            self.input_scale,
            self.output_scale,
            self.x0,
            self.y0
        );

        potflow_core::scale(flow, self.output_scale)
    }
}

/// Builds every spec and sums them in order.
///
/// Terms are added left to right, so the result nests as
/// `((f₁ + f₂) + f₃) + …`.
///
/// # Errors
///
/// Returns [`FlowError::EmptyComposition`] if `specs` is empty, or the first
/// error from [`FlowSpec::build`].
pub fn compose(specs: &[FlowSpec]) -> Result<Composite, FlowError> {
    let (first, rest) = specs.split_first().ok_or(FlowError::EmptyComposition)?;

    rest.iter()
        .try_fold(first.build()?, |sum, spec| Ok(sum + spec.build()?))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use potflow_core::{Complex64, Flow};

    use super::*;

    #[test]
    fn parses_labels_and_aliases() {
        for kind in FlowKind::ALL {
            assert_eq!(kind.to_string().parse::<FlowKind>(), Ok(kind));
        }

        assert_eq!("uniforme".parse(), Ok(FlowKind::Uniform));
        assert_eq!("FUENTE".parse(), Ok(FlowKind::Source));
        assert_eq!("Vortice  Irrotacional".parse(), Ok(FlowKind::Vortex));
        assert_eq!("vortex".parse(), Ok(FlowKind::Vortex));
        assert_eq!("Doblete".parse(), Ok(FlowKind::Dipole));
        assert_eq!(
            "Sumidero".parse::<FlowKind>(),
            Err(FlowError::UnknownFlow("Sumidero".into()))
        );
    }

    #[test]
    fn default_spec_is_unit_stream() -> Result<(), FlowError> {
        let flow = FlowSpec::default().build()?;
        let v = flow.velocity_at(Complex64::new(4.0, -1.0));
        assert_relative_eq!(v.vx, 1.0);
        assert_relative_eq!(v.vy, 0.0);
        Ok(())
    }

    #[test]
    fn build_applies_every_parameter() -> Result<(), FlowError> {
        let spec = FlowSpec {
            kind: FlowKind::Vortex,
            amplitude: 2.0,
            input_scale: 0.5,
            output_scale: -3.0,
            x0: 1.0,
            y0: 0.0,
            ..FlowSpec::default()
        };
        let flow = spec.build()?;

        // w = 0.5·z − 1 vanishes at z = 2; at z = 4, w = 1.
        let v = flow.velocity_at(Complex64::new(4.0, 0.0));
        assert_relative_eq!(v.vx, 0.0, epsilon = 1e-15);
        assert_relative_eq!(v.vy, -3.0 * 0.5 * 2.0);

        Ok(())
    }

    #[test]
    fn compose_sums_left_to_right() -> Result<(), FlowError> {
        let specs = [
            FlowSpec::default(),
            FlowSpec::new(FlowKind::Source),
            FlowSpec::new(FlowKind::Dipole),
        ];
        let flow = compose(&specs)?;

        assert_eq!(flow.len(), 2);
        let z = Complex64::new(0.5, 1.5);
        let expected: Complex64 = specs
            .iter()
            .map(|spec| spec.build().map(|f| f.complex_potential_at(z)))
            .sum::<Result<_, _>>()?;
        assert_relative_eq!(flow.complex_potential_at(z).re, expected.re, max_relative = 1e-12);
        assert_relative_eq!(flow.complex_potential_at(z).im, expected.im, max_relative = 1e-12);

        Ok(())
    }

    #[test]
    fn compose_rejects_empty_and_invalid() {
        assert_eq!(compose(&[]).unwrap_err(), FlowError::EmptyComposition);

        let bad = FlowSpec {
            input_scale: f64::INFINITY,
            ..FlowSpec::default()
        };
        assert_eq!(
            compose(&[FlowSpec::default(), bad]).unwrap_err(),
            FlowError::InvalidScale {
                re: f64::INFINITY,
                im: 0.0
            }
        );
    }
}

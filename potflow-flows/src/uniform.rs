use std::{f64::consts::FRAC_PI_2, fmt, str::FromStr};

use num_complex::Complex64;
use potflow_core::{Flow, FlowError, Scale, Velocity, constraint::finite, symbolic::Expr};

/// The direction of a uniform stream.
///
/// Parses from `"x"`, `"y"` (case-insensitive), or an angle in radians
/// measured counterclockwise from the `+x` axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DirectionRepr", into = "DirectionRepr")
)]
pub enum Direction {
    #[default]
    X,
    Y,
    Angle(f64),
}

impl Direction {
    /// Returns the angle from the `+x` axis in radians.
    #[must_use]
    pub fn angle(self) -> f64 {
        match self {
            Self::X => 0.0,
            Self::Y => FRAC_PI_2,
            Self::Angle(angle) => angle,
        }
    }

    /// Returns `(cos α, sin α)`, exact for the axis directions.
    #[must_use]
    pub fn unit(self) -> (f64, f64) {
        match self {
            Self::X => (1.0, 0.0),
            Self::Y => (0.0, 1.0),
            Self::Angle(angle) => {
                let (sin, cos) = angle.sin_cos();
                (cos, sin)
            }
        }
    }
}

impl FromStr for Direction {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("x") {
            return Ok(Self::X);
        }
        if s.eq_ignore_ascii_case("y") {
            return Ok(Self::Y);
        }
        match s.parse::<f64>() {
            Ok(angle) if angle.is_finite() => Ok(Self::Angle(angle)),
            _ => Err(FlowError::InvalidDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
            Self::Angle(angle) => write!(f, "{angle}"),
        }
    }
}

/// Serialized form of a [`Direction`]: an axis token or a bare angle.
#[cfg(feature = "serde-derive")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum DirectionRepr {
    Angle(f64),
    Token(String),
}

#[cfg(feature = "serde-derive")]
impl TryFrom<DirectionRepr> for Direction {
    type Error = FlowError;

    fn try_from(repr: DirectionRepr) -> Result<Self, Self::Error> {
        match repr {
            DirectionRepr::Angle(angle) => Ok(Self::Angle(finite("direction", angle)?)),
            DirectionRepr::Token(token) => token.parse(),
        }
    }
}

#[cfg(feature = "serde-derive")]
impl From<Direction> for DirectionRepr {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Angle(angle) => Self::Angle(angle),
            axis => Self::Token(axis.to_string()),
        }
    }
}

/// A uniform stream of amplitude `A` in direction `α`.
///
/// The complex potential is `F(z) = A·(s·z)·e^{−iα}`, so the velocity is the
/// constant `(s·A·cos α, s·A·sin α)` everywhere.
///
/// # Example
///
/// ```
/// use potflow_core::{Complex64, Flow};
/// use potflow_flows::{Direction, Uniform};
///
/// let stream = Uniform::new(3.0).unwrap().with_direction(Direction::Y).unwrap();
/// let v = stream.velocity_at(Complex64::new(-7.0, 2.0));
/// assert_eq!((v.vx, v.vy), (0.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uniform {
    amplitude: f64,
    direction: Direction,
    input_scale: Scale,
}

impl Uniform {
    /// Creates a stream along `+x`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] if `amplitude` is not finite.
    pub fn new(amplitude: f64) -> Result<Self, FlowError> {
        Ok(Self {
            amplitude: finite("amplitude", amplitude)?,
            direction: Direction::X,
            input_scale: Scale::ONE,
        })
    }

    /// Returns this stream pointed in `direction`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidParameter`] if an angle is not finite.
    pub fn with_direction(self, direction: Direction) -> Result<Self, FlowError> {
        finite("direction", direction.angle())?;
        Ok(Self { direction, ..self })
    }

    #[must_use]
    pub fn with_input_scale(self, input_scale: Scale) -> Self {
        Self {
            input_scale,
            ..self
        }
    }

    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn input_scale(&self) -> Scale {
        self.input_scale
    }

    /// Returns `A·e^{−iα}`.
    fn coefficient(&self) -> Complex64 {
        let (cos, sin) = self.direction.unit();
        Complex64::new(self.amplitude * cos, -self.amplitude * sin)
    }
}

impl Flow for Uniform {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        self.coefficient() * (z * self.input_scale.value())
    }

    fn velocity_at(&self, _z: Complex64) -> Velocity {
        let (cos, sin) = self.direction.unit();
        let speed = self.input_scale.value() * self.amplitude;
        Velocity::new(speed * cos, speed * sin)
    }

    fn symbolic(&self) -> Option<Expr> {
        let argument = Expr::real(self.input_scale.value()) * Expr::z();
        Some((Expr::constant(self.coefficient()) * argument).simplify())
    }
}

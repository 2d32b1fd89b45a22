use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use num_complex::Complex64;
use uom::si::{
    f64::{MassDensity, Pressure},
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
};

use crate::{
    Fields, Flow, FlowError, Velocity,
    constraint::{Constrained, StrictlyPositive},
    fields::check_shapes,
};

/// The Bernoulli reference state of a flow.
///
/// Captured by [`FlowContext::with_initial_conditions`] at a regular point of
/// the flow, conventionally a far-field point when the ambient state is a
/// free stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialConditions {
    /// The reference point `(x0, y0)`.
    pub point: (f64, f64),
    /// The flow velocity at the reference point.
    pub velocity: Velocity,
    /// The static pressure at the reference point.
    pub pressure: Pressure,
}

/// A flow together with the fluid properties needed to evaluate pressure.
///
/// Flows describe geometry only and are freely shared between composites.
/// The fluid density and the Bernoulli reference live here instead, so one
/// context fixes a single density for every flow in its tree, and changing it
/// never touches a shared primitive.
///
/// Reconfiguration methods consume the context and return a new one.
///
/// # Example
///
/// ```
/// use potflow_core::{FlowContext, symbolic::{Expr, Symbolic}};
/// use uom::si::{f64::Pressure, pressure::pascal};
///
/// // A uniform stream with speed 2 along +x.
/// let stream = Symbolic::new(Expr::real(2.0) * Expr::z());
///
/// let context = FlowContext::new(stream)
///     .with_initial_conditions(1e10, 0.0, Pressure::new::<pascal>(101_300.0))
///     .unwrap();
///
/// let p = context.pressure_at(0.0, 0.0).unwrap();
/// assert_eq!(p.get::<pascal>(), 101_300.0);
/// ```
#[derive(Debug, Clone)]
pub struct FlowContext<F> {
    flow: F,
    density: MassDensity,
    initial_conditions: Option<InitialConditions>,
}

impl<F: Flow> FlowContext<F> {
    /// Creates a context with a density of 1 kg/m³ and no reference state.
    pub fn new(flow: F) -> Self {
        Self {
            flow,
            density: MassDensity::new::<kilogram_per_cubic_meter>(1.0),
            initial_conditions: None,
        }
    }

    /// Returns this context with a new fluid density.
    ///
    /// The reference state, if any, is kept.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidDensity`] unless `density` is strictly positive.
    pub fn with_density(self, density: MassDensity) -> Result<Self, FlowError> {
        let density = Constrained::<_, StrictlyPositive>::new(density)?.into_inner();
        log::debug!(
            "density set to {} kg/m³",
            density.get::<kilogram_per_cubic_meter>()
        );
        Ok(Self { density, ..self })
    }

    /// Returns this context with a Bernoulli reference captured at `(x0, y0)`.
    ///
    /// The flow velocity at `(x0, y0)` is evaluated once and stored with the
    /// given static pressure.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::SingularReference`] if the velocity at `(x0, y0)`
    /// is not finite, or [`FlowError::InvalidParameter`] if the pressure is
    /// not finite.
    pub fn with_initial_conditions(
        self,
        x0: f64,
        y0: f64,
        pressure: Pressure,
    ) -> Result<Self, FlowError> {
        crate::constraint::finite("pressure", pressure.get::<pascal>())?;

        let velocity = self.flow.velocity_at(Complex64::new(x0, y0));
        if !velocity.is_finite() {
            return Err(FlowError::SingularReference { x: x0, y: y0 });
        }

        log::debug!(
            "reference captured at ({x0}, {y0}): v = ({}, {}), p = {} Pa",
            velocity.vx,
            velocity.vy,
            pressure.get::<pascal>()
        );

        Ok(Self {
            initial_conditions: Some(InitialConditions {
                point: (x0, y0),
                velocity,
                pressure,
            }),
            ..self
        })
    }

    /// Returns the flow.
    pub fn flow(&self) -> &F {
        &self.flow
    }

    /// Consumes the context and returns the flow.
    pub fn into_flow(self) -> F {
        self.flow
    }

    pub fn density(&self) -> MassDensity {
        self.density
    }

    /// Returns the reference state, if one has been captured.
    pub fn initial_conditions(&self) -> Option<&InitialConditions> {
        self.initial_conditions.as_ref()
    }

    /// Evaluates the complex potential. See [`Fields::complex_potential`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    pub fn complex_potential<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<Complex64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        self.flow.complex_potential(x, y)
    }

    /// Evaluates the velocity components. See [`Fields::velocity`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    pub fn velocity<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<(Array<f64, D>, Array<f64, D>), FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        self.flow.velocity(x, y)
    }

    /// Evaluates the stream function. See [`Fields::stream`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    pub fn stream<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<f64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        self.flow.stream(x, y)
    }

    /// Evaluates the velocity potential. See [`Fields::potential`].
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    pub fn potential<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<f64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        self.flow.potential(x, y)
    }

    /// Returns the static pressure at `(x, y)` using `p = p₀ + ρ/2·(|v₀|² − |v|²)`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::MissingInitialConditions`] if no reference state
    /// has been captured.
    pub fn pressure_at(&self, x: f64, y: f64) -> Result<Pressure, FlowError> {
        let bernoulli = self.bernoulli()?;
        let v = self.flow.velocity_at(Complex64::new(x, y));
        Ok(Pressure::new::<pascal>(bernoulli(v)))
    }

    /// Evaluates the static pressure field in pascals.
    ///
    /// Samples where the velocity is not finite yield a non-finite pressure
    /// without affecting other samples.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::MissingInitialConditions`] if no reference state
    /// has been captured, or [`FlowError::ShapeMismatch`] if `x` and `y`
    /// differ in shape.
    pub fn pressure<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<f64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        let bernoulli = self.bernoulli()?;
        check_shapes(x, y)?;
        Ok(Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| bernoulli(self.flow.velocity_at(Complex64::new(x, y)))))
    }

    /// Returns the Bernoulli relation for the current density and reference.
    fn bernoulli(&self) -> Result<impl Fn(Velocity) -> f64, FlowError> {
        let reference = self
            .initial_conditions
            .ok_or(FlowError::MissingInitialConditions)?;

        let rho = self.density.get::<kilogram_per_cubic_meter>();
        let p0 = reference.pressure.get::<pascal>();
        let v0_squared = reference.velocity.speed_squared();

        Ok(move |v: Velocity| p0 + 0.5 * rho * (v0_squared - v.speed_squared()))
    }
}

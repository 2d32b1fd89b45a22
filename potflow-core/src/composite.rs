use std::ops::Add;

use num_complex::Complex64;

use crate::{Flow, FlowError, FlowExt, FlowRef, Scale, Velocity, symbolic::Expr};

/// A superposition of child flows.
///
/// Every evaluation multiplies the coordinates by `input_scale`, evaluates
/// every child at the scaled point, sums the results, and multiplies the sum
/// by `output_scale`. Potential, stream function and velocity all follow
/// this rule, so a composite's velocity is the output-scaled sum of its
/// children's velocities at the scaled point.
///
/// Children are held as shared [`FlowRef`]s and kept in insertion order.
/// Composites nest: a composite of composites is evaluated recursively.
#[derive(Debug, Clone, Default)]
pub struct Composite {
    children: Vec<FlowRef>,
    input_scale: Scale,
    output_scale: Scale,
}

impl Composite {
    /// Creates an unscaled composite over the given children.
    #[must_use]
    pub fn new(children: Vec<FlowRef>) -> Self {
        log::trace!("composing {} flow(s)", children.len());
        Self {
            children,
            input_scale: Scale::ONE,
            output_scale: Scale::ONE,
        }
    }

    /// Returns this composite with the given input scale.
    #[must_use]
    pub fn with_input_scale(self, input_scale: Scale) -> Self {
        Self {
            input_scale,
            ..self
        }
    }

    /// Returns this composite with the given output scale.
    #[must_use]
    pub fn with_output_scale(self, output_scale: Scale) -> Self {
        Self {
            output_scale,
            ..self
        }
    }

    /// Returns the child flows in insertion order.
    #[must_use]
    pub fn children(&self) -> &[FlowRef] {
        &self.children
    }

    #[must_use]
    pub fn input_scale(&self) -> Scale {
        self.input_scale
    }

    #[must_use]
    pub fn output_scale(&self) -> Scale {
        self.output_scale
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the composite has no children.
    ///
    /// An empty composite is the zero flow.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Flow for Composite {
    fn complex_potential_at(&self, z: Complex64) -> Complex64 {
        let z = z * self.input_scale.value();
        let sum: Complex64 = self
            .children
            .iter()
            .map(|child| child.complex_potential_at(z))
            .sum();
        sum * self.output_scale.value()
    }

    fn velocity_at(&self, z: Complex64) -> Velocity {
        let z = z * self.input_scale.value();
        let sum = self
            .children
            .iter()
            .fold(Velocity::ZERO, |acc, child| acc + child.velocity_at(z));
        sum * self.output_scale.value()
    }

    /// Returns `k · Σ Fᵢ(s·z)`, or `None` if any child has no symbolic form.
    ///
    /// With `s ≠ 1` the exact derivative of this form is `s` times the
    /// composite velocity, which samples child velocities without that factor.
    fn symbolic(&self) -> Option<Expr> {
        let sum = self
            .children
            .iter()
            .map(|child| child.symbolic())
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .reduce(|acc, term| acc + term)
            .unwrap_or_else(|| Expr::real(0.0));

        let argument = Expr::real(self.input_scale.value()) * Expr::z();
        let scaled = Expr::real(self.output_scale.value()) * sum.substitute(&argument);
        Some(scaled.simplify())
    }
}

impl<Rhs: Flow + 'static> Add<Rhs> for Composite {
    type Output = Composite;

    fn add(self, rhs: Rhs) -> Composite {
        self.plus(rhs)
    }
}

/// Superposes any number of shared flows into one unscaled composite.
///
/// Unlike repeated [`FlowExt::plus`], the result is flat: every flow becomes
/// a direct child.
pub fn combine<I>(flows: I) -> Composite
where
    I: IntoIterator<Item = FlowRef>,
{
    Composite::new(flows.into_iter().collect())
}

/// Wraps a shared flow in a composite with output scale `k`.
///
/// # Errors
///
/// Returns [`FlowError::InvalidScale`] if `k` is not a finite real number.
pub fn scale<K>(flow: FlowRef, k: K) -> Result<Composite, FlowError>
where
    K: TryInto<Scale, Error = FlowError>,
{
    let k = k.try_into()?;
    Ok(Composite::new(vec![flow]).with_output_scale(k))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use approx::assert_relative_eq;

    use super::*;
    use crate::symbolic::Symbolic;

    /// `F(z) = z²`, so `F'(z) = 2z`.
    #[derive(Debug)]
    struct Square;

    impl Flow for Square {
        fn complex_potential_at(&self, z: Complex64) -> Complex64 {
            z * z
        }

        fn velocity_at(&self, z: Complex64) -> Velocity {
            Velocity::from_complex_velocity(z * 2.0)
        }
    }

    #[test]
    fn sums_children_and_scales_output() -> Result<(), FlowError> {
        let z = Complex64::new(1.0, 2.0);
        let flow = Square.plus(Square).scale(3.0)?;

        let expected = Square.complex_potential_at(z) * 6.0;
        assert_relative_eq!(flow.complex_potential_at(z).re, expected.re);
        assert_relative_eq!(flow.complex_potential_at(z).im, expected.im);

        let v = flow.velocity_at(z);
        let expected = Square.velocity_at(z) * 6.0;
        assert_relative_eq!(v.vx, expected.vx);
        assert_relative_eq!(v.vy, expected.vy);

        Ok(())
    }

    #[test]
    fn input_scale_moves_the_evaluation_point() {
        let flow = Composite::new(vec![Arc::new(Square)])
            .with_input_scale(Scale::try_from(2.0).unwrap());
        let z = Complex64::new(0.5, -1.0);

        // F(z) = (2z)²
        let f = flow.complex_potential_at(z);
        assert_relative_eq!(f.re, (z * 2.0 * z * 2.0).re);
        assert_relative_eq!(f.im, (z * 2.0 * z * 2.0).im);

        // Children are evaluated at 2z; no extra factor is applied.
        let v = flow.velocity_at(z);
        let expected = Square.velocity_at(z * 2.0);
        assert_relative_eq!(v.vx, expected.vx);
        assert_relative_eq!(v.vy, expected.vy);
    }

    #[test]
    fn velocity_is_output_scaled_sum_at_scaled_point() {
        let s = 2.0;
        let k = 3.0;
        let flow = Composite::new(vec![Arc::new(Square), Arc::new(Symbolic::new(Expr::z().ln()))])
            .with_input_scale(Scale::try_from(s).unwrap())
            .with_output_scale(Scale::try_from(k).unwrap());

        for z in [Complex64::new(1.0, 1.0), Complex64::new(-0.5, 2.0)] {
            let expected = (Square.velocity_at(z * s)
                + Symbolic::new(Expr::z().ln()).velocity_at(z * s))
                * k;
            let v = flow.velocity_at(z);
            assert_relative_eq!(v.vx, expected.vx, max_relative = 1e-12);
            assert_relative_eq!(v.vy, expected.vy, max_relative = 1e-12);

            let expected = (Square.complex_potential_at(z * s) + (z * s).ln()) * k;
            let f = flow.complex_potential_at(z);
            assert_relative_eq!(f.re, expected.re, max_relative = 1e-12);
            assert_relative_eq!(f.im, expected.im, max_relative = 1e-12);
        }
    }

    #[test]
    fn empty_composite_is_zero_flow() {
        let flow = Composite::default();
        assert!(flow.is_empty());
        assert_eq!(flow.complex_potential_at(Complex64::new(3.0, 4.0)), Complex64::new(0.0, 0.0));
        assert_eq!(flow.velocity_at(Complex64::new(3.0, 4.0)), Velocity::ZERO);
    }

    #[test]
    fn shared_children_are_not_copied() {
        let shared: FlowRef = Arc::new(Square);
        let a = combine([shared.clone(), shared.clone()]);
        let b = scale(shared.clone(), -1.0).unwrap();

        assert_eq!(Arc::strong_count(&shared), 4);
        assert!(Arc::ptr_eq(&a.children()[0], &b.children()[0]));
    }

    #[test]
    fn adding_nests_instead_of_flattening() {
        let nested = (Square.plus(Square) + Square) + Square;
        assert_eq!(nested.len(), 2);

        let flat = combine([
            Arc::new(Square) as FlowRef,
            Arc::new(Square),
            Arc::new(Square),
            Arc::new(Square),
        ]);
        assert_eq!(flat.len(), 4);

        let z = Complex64::new(-0.3, 0.7);
        assert_relative_eq!(
            nested.complex_potential_at(z).re,
            flat.complex_potential_at(z).re
        );
    }

    #[test]
    fn deep_nesting_evaluates() {
        let mut flow = Composite::new(vec![Arc::new(Square)]);
        for _ in 0..64 {
            flow = flow + Square;
        }

        let z = Complex64::new(1.0, 0.0);
        assert_relative_eq!(flow.complex_potential_at(z).re, 65.0);
    }

    #[test]
    fn symbolic_form_requires_every_child() {
        let without = Square.plus(Symbolic::new(Expr::z()));
        assert!(without.symbolic().is_none());

        let with = Composite::new(vec![Arc::new(Symbolic::new(Expr::z()))])
            .with_input_scale(Scale::try_from(3.0).unwrap())
            .with_output_scale(Scale::try_from(2.0).unwrap());
        let expr = with.symbolic().unwrap();

        let z = Complex64::new(1.5, -0.5);
        assert_relative_eq!(expr.eval(z).re, (z * 6.0).re);
        assert_relative_eq!(expr.eval(z).im, (z * 6.0).im);
    }

    #[test]
    fn rejects_complex_scale() {
        let err = Square.scale(Complex64::new(0.0, 1.0)).unwrap_err();
        assert_eq!(err, FlowError::InvalidScale { re: 0.0, im: 1.0 });
    }
}

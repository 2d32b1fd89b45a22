use ndarray::{Array, ArrayBase, Data, Dimension, Zip};
use num_complex::Complex64;

use crate::{Flow, FlowError};

/// Array evaluation of a flow's fields.
///
/// Blanket-implemented for every [`Flow`], including `dyn Flow`. Each method
/// takes coordinate arrays `x` and `y` of identical shape, such as the arrays
/// of a [`Grid`], and returns arrays of that shape.
///
/// Evaluation is elementwise: a sample on a singular point yields whatever
/// the flow defines there and never affects the other samples.
///
/// [`Grid`]: crate::Grid
pub trait Fields: Flow {
    /// Evaluates the complex potential `F(x + i·y)`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    fn complex_potential<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<Complex64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        check_shapes(x, y)?;
        Ok(Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| self.complex_potential_at(Complex64::new(x, y))))
    }

    /// Evaluates the velocity components `(vx, vy)`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    fn velocity<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<(Array<f64, D>, Array<f64, D>), FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        check_shapes(x, y)?;
        let mut vx = Array::zeros(x.raw_dim());
        let mut vy = Array::zeros(x.raw_dim());
        Zip::from(&mut vx)
            .and(&mut vy)
            .and(x)
            .and(y)
            .for_each(|vx, vy, &x, &y| {
                let v = self.velocity_at(Complex64::new(x, y));
                *vx = v.vx;
                *vy = v.vy;
            });
        Ok((vx, vy))
    }

    /// Evaluates the stream function `ψ = Im F`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    fn stream<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<f64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        check_shapes(x, y)?;
        Ok(Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| self.stream_at(Complex64::new(x, y))))
    }

    /// Evaluates the velocity potential `φ = Re F`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::ShapeMismatch`] if `x` and `y` differ in shape.
    fn potential<Sx, Sy, D>(
        &self,
        x: &ArrayBase<Sx, D>,
        y: &ArrayBase<Sy, D>,
    ) -> Result<Array<f64, D>, FlowError>
    where
        Sx: Data<Elem = f64>,
        Sy: Data<Elem = f64>,
        D: Dimension,
    {
        check_shapes(x, y)?;
        Ok(Zip::from(x)
            .and(y)
            .map_collect(|&x, &y| self.potential_at(Complex64::new(x, y))))
    }
}

impl<F: Flow + ?Sized> Fields for F {}

/// Returns the speed `|v|` for each pair of velocity components.
///
/// # Errors
///
/// Returns [`FlowError::ShapeMismatch`] if `vx` and `vy` differ in shape.
pub fn speed<Sx, Sy, D>(
    vx: &ArrayBase<Sx, D>,
    vy: &ArrayBase<Sy, D>,
) -> Result<Array<f64, D>, FlowError>
where
    Sx: Data<Elem = f64>,
    Sy: Data<Elem = f64>,
    D: Dimension,
{
    check_shapes(vx, vy)?;
    Ok(Zip::from(vx).and(vy).map_collect(|&vx, &vy| vx.hypot(vy)))
}

pub(crate) fn check_shapes<Sx, Sy, D>(
    x: &ArrayBase<Sx, D>,
    y: &ArrayBase<Sy, D>,
) -> Result<(), FlowError>
where
    Sx: Data<Elem = f64>,
    Sy: Data<Elem = f64>,
    D: Dimension,
{
    if x.shape() == y.shape() {
        Ok(())
    } else {
        Err(FlowError::ShapeMismatch {
            x: x.shape().to_vec(),
            y: y.shape().to_vec(),
        })
    }
}

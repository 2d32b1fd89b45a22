//! Rectangular sampling grids.

use ndarray::{Array1, Array2, ArrayView1};

/// A meshgrid of linearly spaced samples over a rectangle.
///
/// Uses `xy` indexing: both arrays have shape `(ny, nx)`, rows run along `y`
/// and columns along `x`, so `x[[i, j]] == x_axis[j]` and
/// `y[[i, j]] == y_axis[i]`.
///
/// # Example
///
/// ```
/// use potflow_core::Grid;
///
/// let grid = Grid::new((-1.0, 1.0), (0.0, 2.0), 3, 2);
/// assert_eq!(grid.shape(), (2, 3));
/// assert_eq!(grid.x[[1, 2]], 1.0);
/// assert_eq!(grid.y[[1, 2]], 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl Grid {
    /// Creates a grid with `nx` samples over `x_range` and `ny` over `y_range`.
    ///
    /// Both ranges are inclusive of their endpoints. Each count is raised to
    /// at least one; a single sample sits at the start of its range.
    #[must_use]
    pub fn new(x_range: (f64, f64), y_range: (f64, f64), nx: usize, ny: usize) -> Self {
        let (nx, ny) = (nx.max(1), ny.max(1));
        let xs = Array1::linspace(x_range.0, x_range.1, nx);
        let ys = Array1::linspace(y_range.0, y_range.1, ny);

        Self {
            x: Array2::from_shape_fn((ny, nx), |(_, j)| xs[j]),
            y: Array2::from_shape_fn((ny, nx), |(i, _)| ys[i]),
        }
    }

    /// Creates a grid with `per_unit` samples per unit length along each axis.
    ///
    /// Each axis gets at least two samples, so both endpoints are present.
    #[must_use]
    pub fn with_resolution(x_range: (f64, f64), y_range: (f64, f64), per_unit: f64) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let samples = |(start, end): (f64, f64)| {
            let n = (per_unit * (end - start).abs()).round();
            if n.is_finite() && n > 2.0 { n as usize } else { 2 }
        };

        Self::new(x_range, y_range, samples(x_range), samples(y_range))
    }

    /// Returns `(ny, nx)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// Returns the `x` sample positions.
    #[must_use]
    pub fn x_axis(&self) -> ArrayView1<'_, f64> {
        self.x.row(0)
    }

    /// Returns the `y` sample positions.
    #[must_use]
    pub fn y_axis(&self) -> ArrayView1<'_, f64> {
        self.y.column(0)
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    #[test]
    fn meshgrid_layout() {
        let grid = Grid::new((0.0, 2.0), (-1.0, 1.0), 3, 3);

        assert_eq!(grid.x_axis(), array![0.0, 1.0, 2.0]);
        assert_eq!(grid.y_axis(), array![-1.0, 0.0, 1.0]);
        assert_eq!(grid.x.column(1), array![1.0, 1.0, 1.0]);
        assert_eq!(grid.y.row(2), array![1.0, 1.0, 1.0]);
    }

    #[test]
    fn resolution_scales_with_span() {
        // Five samples per unit over a span of ten.
        let grid = Grid::with_resolution((-5.0, 5.0), (-2.0, 2.0), 5.0);
        assert_eq!(grid.shape(), (20, 50));
    }

    #[test]
    fn resolution_keeps_both_endpoints() {
        let grid = Grid::with_resolution((0.0, 0.1), (0.0, 0.0), 5.0);
        assert_eq!(grid.shape(), (2, 2));
        assert_eq!(grid.x_axis(), array![0.0, 0.1]);
    }

    #[test]
    fn zero_samples_still_have_axes() {
        let grid = Grid::new((0.0, 1.0), (-2.0, 2.0), 3, 0);
        assert_eq!(grid.shape(), (1, 3));
        assert_eq!(grid.x_axis(), array![0.0, 0.5, 1.0]);
        assert_eq!(grid.y_axis(), array![-2.0]);

        let grid = Grid::new((4.0, 5.0), (0.0, 1.0), 0, 0);
        assert_eq!(grid.shape(), (1, 1));
        assert_eq!(grid.x_axis(), array![4.0]);
    }
}

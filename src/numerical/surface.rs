//! Surface sampling over a regular grid.
//!
//! One sampling routine serves both plot views: the 3D surface and the 2D
//! contour projection render the same `SampledSurface`. Evaluation failures
//! at individual nodes leave NaN holes instead of failing the whole grid.

use crate::symbolic::symbolic_lambdify::CompiledFunction;
use crate::symbolic::utils::linspace;
use nalgebra::DMatrix;

/// Sampling rectangle and resolution for plot grids.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRegion {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Number of grid cells per axis; grid_size + 1 samples per axis
    /// inclusive of both bounds.
    pub grid_size: usize,
}

impl Default for GridRegion {
    fn default() -> Self {
        GridRegion {
            x_range: (-5.0, 5.0),
            y_range: (-5.0, 5.0),
            grid_size: 50,
        }
    }
}

/// Function values over a regular lattice: z[(i, j)] = f(x[i], y[j]).
/// Cells where the function is undefined carry NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledSurface {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: DMatrix<f64>,
}

impl SampledSurface {
    /// Minimum and maximum finite z values, ignoring NaN holes. None when
    /// the whole grid is undefined.
    pub fn z_bounds(&self) -> Option<(f64, f64)> {
        let mut bounds: Option<(f64, f64)> = None;
        for &v in self.z.iter() {
            if v.is_finite() {
                let (lo, hi) = bounds.unwrap_or((v, v));
                bounds = Some((lo.min(v), hi.max(v)));
            }
        }
        bounds
    }
}

/// Evaluates f at every lattice node of the region.
pub fn sample_grid(f: &CompiledFunction, region: &GridRegion) -> SampledSurface {
    let nodes = region.grid_size + 1;
    let x = linspace(region.x_range.0, region.x_range.1, nodes);
    let y = linspace(region.y_range.0, region.y_range.1, nodes);
    let z = DMatrix::from_fn(nodes, nodes, |i, j| {
        f.eval(x[i], y[j]).unwrap_or(f64::NAN)
    });
    SampledSurface { x, y, z }
}

//! The narrow functional interface consumed by UI and presentation code.
//!
//! Exactly four operations: parse, differentiate, find critical points,
//! sample a surface. Parse and differentiation failures are returned as
//! typed errors; an empty critical point list is a legitimate result, not a
//! failure, and no operation ever substitutes a default expression or a
//! placeholder point.

use crate::errors::{DifferentiationError, ParseError};
use crate::numerical::critical_points::{CriticalPoint, SearchRegion, search_critical_points};
use crate::numerical::surface::{GridRegion, SampledSurface, sample_grid};
use crate::symbolic::parse_expr::parse_expression;
use crate::symbolic::symbolic_engine_derivatives::DerivativeSet;
use crate::symbolic::symbolic_lambdify::CompiledFunction;

/// Compiles an expression text into an evaluable function of (x, y).
pub fn parse(expression: &str) -> Result<CompiledFunction, ParseError> {
    Ok(parse_expression(expression)?.lambdify2d())
}

/// Builds the five compiled partial derivatives {fx, fy, fxx, fyy, fxy} of
/// an expression text, all derived from the same tree.
pub fn differentiate(expression: &str) -> Result<DerivativeSet, DifferentiationError> {
    parse_expression(expression)?.partial_derivatives()
}

/// Scans the rectangle for critical points on a lattice of grid_size + 1
/// nodes per axis and classifies each with the Hessian test.
///
/// Returns Ok with an empty vector when no gradient zero lies on the grid;
/// fails only for malformed or non-differentiable input.
pub fn find_critical_points(
    expression: &str,
    x_range: (f64, f64),
    y_range: (f64, f64),
    grid_size: usize,
) -> Result<Vec<CriticalPoint>, DifferentiationError> {
    let expr = parse_expression(expression)?;
    let f = expr.lambdify2d();
    let derivatives = expr.partial_derivatives()?;
    let region = SearchRegion {
        x_range,
        y_range,
        grid_size,
        ..SearchRegion::default()
    };
    Ok(search_critical_points(&f, &derivatives, &region))
}

/// Samples f over the rectangle for the 3D surface and 2D contour views.
/// Undefined cells carry NaN; the call itself cannot fail past parsing.
pub fn sample_surface(
    expression: &str,
    x_range: (f64, f64),
    y_range: (f64, f64),
    grid_size: usize,
) -> Result<SampledSurface, ParseError> {
    let f = parse(expression)?;
    let region = GridRegion {
        x_range,
        y_range,
        grid_size,
    };
    Ok(sample_grid(&f, &region))
}

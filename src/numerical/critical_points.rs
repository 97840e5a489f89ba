//! Grid-based critical point search.
//!
//! The search evaluates fx and fy at every node of a regular lattice over the
//! search rectangle and flags nodes where both are within the gradient
//! tolerance of zero. Flagged candidates are classified with the Hessian
//! test at the node. This is a sampling heuristic, not a root finder: zero
//! crossings between nodes can be missed, and flat neighborhoods can
//! produce several adjacent candidates.
//!
//! An empty result is a meaningful outcome ("no critical points in range"),
//! never an error, and is never patched with a placeholder point. A node
//! where any evaluation fails is skipped; a single bad node cannot abort
//! the scan.

use crate::numerical::hessian::{Classification, classify};
use crate::symbolic::symbolic_engine_derivatives::DerivativeSet;
use crate::symbolic::symbolic_lambdify::CompiledFunction;
use crate::symbolic::utils::linspace;
use itertools::iproduct;
use std::collections::HashSet;
use tabled::Tabled;

/// Search rectangle and lattice resolution for the critical point scan.
///
/// `gradient_tol` is a coarse grid-search tolerance in gradient units, not a
/// convergence bound; it is exposed so callers can adapt it to the scale of
/// their function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchRegion {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    /// Number of grid cells per axis; the lattice has grid_size + 1 nodes
    /// per axis inclusive of both bounds.
    pub grid_size: usize,
    pub gradient_tol: f64,
}

impl Default for SearchRegion {
    fn default() -> Self {
        SearchRegion {
            x_range: (-10.0, 10.0),
            y_range: (-10.0, 10.0),
            grid_size: 20,
            gradient_tol: 0.01,
        }
    }
}

/// A classified grid sample where both partial derivatives vanish within
/// tolerance. Coordinates and value are rounded to 3 decimal places for
/// display stability; the classification is assigned at creation and never
/// mutated.
#[derive(Clone, Copy, Debug, PartialEq, Tabled)]
pub struct CriticalPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[tabled(rename = "type")]
    pub classification: Classification,
}

/// Scans the lattice for near-zero-gradient nodes and classifies them.
/// Points are returned in scan order (x-major); candidates that collapse to
/// the same rounded coordinates are reported once.
pub fn search_critical_points(
    f: &CompiledFunction,
    derivatives: &DerivativeSet,
    region: &SearchRegion,
) -> Vec<CriticalPoint> {
    let nodes = region.grid_size + 1;
    let xs = linspace(region.x_range.0, region.x_range.1, nodes);
    let ys = linspace(region.y_range.0, region.y_range.1, nodes);

    let mut points = Vec::new();
    let mut seen: HashSet<(i64, i64)> = HashSet::new();
    for (&x, &y) in iproduct!(&xs, &ys) {
        let (fx, fy) = match (derivatives.fx.eval(x, y), derivatives.fy.eval(x, y)) {
            (Ok(fx), Ok(fy)) => (fx, fy),
            _ => {
                log::trace!("gradient undefined at ({x}, {y}), node skipped");
                continue;
            }
        };
        if fx.abs() >= region.gradient_tol || fy.abs() >= region.gradient_tol {
            continue;
        }
        let (fxx, fyy, fxy) = match (
            derivatives.fxx.eval(x, y),
            derivatives.fyy.eval(x, y),
            derivatives.fxy.eval(x, y),
        ) {
            (Ok(fxx), Ok(fyy), Ok(fxy)) => (fxx, fyy, fxy),
            _ => {
                log::trace!("second derivatives undefined at ({x}, {y}), node skipped");
                continue;
            }
        };
        let z = match f.eval(x, y) {
            Ok(z) => z,
            Err(_) => {
                log::trace!("function undefined at ({x}, {y}), node skipped");
                continue;
            }
        };
        let point = CriticalPoint {
            x: round3(x),
            y: round3(y),
            z: round3(z),
            classification: classify(fxx, fyy, fxy),
        };
        if seen.insert(dedup_key(point.x, point.y)) {
            points.push(point);
        }
    }
    log::debug!(
        "critical point scan over {}x{} nodes found {} point(s)",
        nodes,
        nodes,
        points.len()
    );
    points
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn dedup_key(x: f64, y: f64) -> (i64, i64) {
    ((x * 1000.0).round() as i64, (y * 1000.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse_expression;

    fn search(input: &str, region: &SearchRegion) -> Vec<CriticalPoint> {
        let expr = parse_expression(input).unwrap();
        let f = expr.lambdify2d();
        let derivatives = expr.partial_derivatives().unwrap();
        search_critical_points(&f, &derivatives, region)
    }

    #[test]
    fn test_paraboloid_has_single_minimum() {
        let points = search("x^2 + y^2", &SearchRegion::default());
        assert_eq!(points.len(), 1);
        assert_eq!(
            points[0],
            CriticalPoint {
                x: 0.0,
                y: 0.0,
                z: 0.0,
                classification: Classification::LocalMin,
            }
        );
    }

    #[test]
    fn test_hyperbolic_paraboloid_has_single_saddle() {
        let points = search("x^2 - y^2", &SearchRegion::default());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].classification, Classification::Saddle);
        assert_eq!((points[0].x, points[0].y, points[0].z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_inverted_paraboloid_maximum() {
        let points = search("4 - x^2 - y^2", &SearchRegion::default());
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].classification, Classification::LocalMax);
        assert_eq!(points[0].z, 4.0);
    }

    #[test]
    fn test_constant_function_is_undetermined_everywhere() {
        // every node has a zero gradient and a zero Hessian determinant
        let points = search("5", &SearchRegion::default());
        assert_eq!(points.len(), 21 * 21);
        assert!(
            points
                .iter()
                .all(|p| p.classification == Classification::Undetermined)
        );
        assert!(points.iter().all(|p| p.z == 5.0));
    }

    #[test]
    fn test_no_critical_points_is_an_empty_set() {
        // the gradient of x + y is (1, 1) everywhere; no placeholder point
        // may be substituted
        let points = search("x + y", &SearchRegion::default());
        assert!(points.is_empty());
    }

    #[test]
    fn test_domain_failures_skip_nodes_without_aborting() {
        // sqrt(x) is undefined for x < 0: half the grid fails, the scan
        // still completes and finds nothing (fx never drops below tol)
        let points = search("sqrt(x) + y^2", &SearchRegion::default());
        assert!(points.is_empty());
    }

    #[test]
    fn test_gradient_tolerance_is_configurable() {
        let region = SearchRegion {
            gradient_tol: 2.5,
            ..SearchRegion::default()
        };
        // |2x| < 2.5 at x in {-1, 0, 1}, same for y: 9 lattice candidates
        let points = search("x^2 + y^2", &region);
        assert_eq!(points.len(), 9);
        assert!(
            points
                .iter()
                .all(|p| p.classification == Classification::LocalMin)
        );
    }

    #[test]
    fn test_candidates_with_identical_rounded_coordinates_dedupe() {
        let region = SearchRegion {
            x_range: (0.0, 0.0004),
            y_range: (0.0, 0.0004),
            grid_size: 1,
            gradient_tol: 0.01,
        };
        // all four nodes round to (0.0, 0.0); one point is reported
        let points = search("0", &region);
        assert_eq!(points.len(), 1);
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
    }

    #[test]
    fn test_results_are_in_scan_order() {
        let points = search("5", &SearchRegion::default());
        assert_eq!((points[0].x, points[0].y), (-10.0, -10.0));
        assert_eq!((points[1].x, points[1].y), (-10.0, -9.0));
        let last = points.last().unwrap();
        assert_eq!((last.x, last.y), (10.0, 10.0));
    }

    #[test]
    fn test_rounding_to_three_decimals() {
        let region = SearchRegion {
            x_range: (-1.0, 1.0),
            y_range: (-1.0, 1.0),
            grid_size: 3,
            gradient_tol: 2.0,
            // nodes at +-1/3 round to +-0.333
        };
        let points = search("x^2 + y^2", &region);
        assert!(!points.is_empty());
        assert!(points.iter().any(|p| p.x == -0.333 || p.x == 0.333));
    }
}

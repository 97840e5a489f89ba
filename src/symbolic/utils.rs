//! Numeric helpers shared by the grid routines and the derivative tests.

use crate::symbolic::symbolic_lambdify::CompiledFunction;

/// `n` evenly spaced values over [start, end], inclusive of both endpoints.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n as f64 - 1.0);
    (0..n).map(|i| start + step * i as f64).collect()
}

/// Central finite-difference approximation of the gradient of f at (x, y).
///
/// This is the explicit numerical fallback and the validation oracle for the
/// symbolic differentiator; it is never used as a silent substitute for it.
pub fn numerical_gradient_2d(f: &CompiledFunction, x: f64, y: f64, step: f64) -> (f64, f64) {
    let fx = (f.call(x + step, y) - f.call(x - step, y)) / (2.0 * step);
    let fy = (f.call(x, y + step) - f.call(x, y - step)) / (2.0 * step);
    (fx, fy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbolic::parse_expr::parse_expression;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints_and_count() {
        let xs = linspace(-10.0, 10.0, 21);
        assert_eq!(xs.len(), 21);
        assert_eq!(xs[0], -10.0);
        assert_eq!(xs[20], 10.0);
        assert_eq!(xs[10], 0.0);
    }

    #[test]
    fn test_linspace_single_point() {
        assert_eq!(linspace(3.0, 5.0, 1), vec![3.0]);
    }

    #[test]
    fn test_numerical_gradient() {
        let f = parse_expression("x^2 + 3*y").unwrap().lambdify2d();
        let (fx, fy) = numerical_gradient_2d(&f, 2.0, 1.0, 1e-5);
        assert_relative_eq!(fx, 4.0, epsilon = 1e-6);
        assert_relative_eq!(fy, 3.0, epsilon = 1e-6);
    }
}

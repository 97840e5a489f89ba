/// Symbolic layer: expression trees, parsing, analytical differentiation and
/// conversion of trees into plain Rust closures.
///
/// # Example
/// ```
/// use critgrid::symbolic::parse_expr::parse_expression;
///
/// let f = parse_expression("x^2*y + sin(y)").unwrap();
/// let fx = f.diff("x").unwrap();
/// let fx = fx.simplify();
/// let fx_fn = fx.lambdify2d();
/// assert!((fx_fn.call(3.0, 2.0) - 12.0).abs() < 1e-12);
/// ```
pub mod parse_expr;
/// The `Expr` tree itself with constructors, operator overloads and display.
pub mod symbolic_engine;
/// Analytical differentiation rules and the five-field derivative set.
pub mod symbolic_engine_derivatives;
/// Conversion of expression trees into evaluable `(x, y) -> f64` closures.
pub mod symbolic_lambdify;
/// Constant folding and algebraic identities for readable derivatives.
pub mod symbolic_simplify;
/// Numeric helpers: linspace and central finite differences.
pub mod utils;

//! Conversion of expression trees into executable closures over (x, y).
//!
//! The closure tree mirrors the expression tree: every node captures the
//! compiled closures of its children, so evaluation is a plain recursive
//! descent with no runtime parsing. The resulting [`CompiledFunction`] is
//! `Send + Sync`, holds no shared mutable state and is cheap to recreate.

use crate::errors::EvaluationError;
use crate::symbolic::symbolic_engine::Expr;
use std::fmt;

type EvalFn = Box<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// A pure function (x, y) -> real compiled from one expression tree, paired
/// with the canonical text of that tree.
pub struct CompiledFunction {
    expression: String,
    func: EvalFn,
}

impl CompiledFunction {
    /// Raw evaluation. Domain failures surface as non-finite values.
    pub fn call(&self, x: f64, y: f64) -> f64 {
        (self.func)(x, y)
    }

    /// Checked evaluation: a non-finite result (log of a non-positive
    /// argument, division by zero, overflow) becomes an [`EvaluationError`]
    /// local to this sample.
    pub fn eval(&self, x: f64, y: f64) -> Result<f64, EvaluationError> {
        let value = self.call(x, y);
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::OutOfDomain { x, y })
        }
    }

    /// Canonical textual form of the compiled expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Debug for CompiledFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CompiledFunction")
            .field("expression", &self.expression)
            .finish()
    }
}

impl Expr {
    /// Compiles the tree into a `CompiledFunction` over the bindings (x, y).
    pub fn lambdify2d(&self) -> CompiledFunction {
        CompiledFunction {
            expression: self.to_string(),
            func: build(self),
        }
    }
}

fn build(expr: &Expr) -> EvalFn {
    match expr {
        Expr::Var(name) => match name.as_str() {
            "x" => Box::new(|x, _| x),
            "y" => Box::new(|_, y| y),
            // the parser only admits x and y; a hand-built tree with another
            // variable evaluates to NaN and fails locally
            _ => Box::new(|_, _| f64::NAN),
        },
        Expr::Const(val) => {
            let val = *val;
            Box::new(move |_, _| val)
        }
        Expr::Add(lhs, rhs) => {
            let lf = build(lhs);
            let rf = build(rhs);
            Box::new(move |x, y| lf(x, y) + rf(x, y))
        }
        Expr::Sub(lhs, rhs) => {
            let lf = build(lhs);
            let rf = build(rhs);
            Box::new(move |x, y| lf(x, y) - rf(x, y))
        }
        Expr::Mul(lhs, rhs) => {
            let lf = build(lhs);
            let rf = build(rhs);
            Box::new(move |x, y| lf(x, y) * rf(x, y))
        }
        Expr::Div(lhs, rhs) => {
            let lf = build(lhs);
            let rf = build(rhs);
            Box::new(move |x, y| lf(x, y) / rf(x, y))
        }
        Expr::Pow(base, exp) => {
            let bf = build(base);
            let ef = build(exp);
            Box::new(move |x, y| bf(x, y).powf(ef(x, y)))
        }
        Expr::Exp(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).exp())
        }
        Expr::Ln(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).ln())
        }
        Expr::Log10(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).log10())
        }
        Expr::Sqrt(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).sqrt())
        }
        Expr::Abs(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).abs())
        }
        Expr::Floor(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).floor())
        }
        Expr::Ceil(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).ceil())
        }
        Expr::sin(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).sin())
        }
        Expr::cos(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).cos())
        }
        Expr::tan(e) => {
            let f = build(e);
            Box::new(move |x, y| f(x, y).tan())
        }
        Expr::sec(e) => {
            let f = build(e);
            Box::new(move |x, y| 1.0 / f(x, y).cos())
        }
        Expr::csc(e) => {
            let f = build(e);
            Box::new(move |x, y| 1.0 / f(x, y).sin())
        }
        Expr::cot(e) => {
            let f = build(e);
            Box::new(move |x, y| 1.0 / f(x, y).tan())
        }
    }
}

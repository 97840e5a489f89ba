//! Light algebraic simplification.
//!
//! Differentiation rules generate trees littered with `* 1`, `+ 0` and
//! foldable constants. `simplify` runs constant folding and the basic
//! identities to a fixed point so that derivative sets stay small and their
//! displayed strings readable. It never folds an operation whose constant
//! result would be non-finite: those stay in the tree and fail locally at
//! evaluation time, as the error policy requires.

use crate::symbolic::symbolic_engine::Expr;

impl Expr {
    /// Applies one simplification pass repeatedly until the tree stops
    /// changing.
    pub fn simplify(&self) -> Expr {
        let mut current = self.clone();
        loop {
            let next = current.simplify_once();
            if next == current {
                return next;
            }
            current = next;
        }
    }

    fn simplify_once(&self) -> Expr {
        match self {
            Expr::Var(_) | Expr::Const(_) => self.clone(),
            Expr::Add(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => fold(a + b, Expr::Add(lhs.clone().boxed(), rhs.clone().boxed())),
                    (Expr::Const(a), _) if *a == 0.0 => rhs,
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    _ => Expr::Add(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Sub(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => fold(a - b, Expr::Sub(lhs.clone().boxed(), rhs.clone().boxed())),
                    (_, Expr::Const(b)) if *b == 0.0 => lhs,
                    _ => Expr::Sub(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Mul(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    (Expr::Const(a), Expr::Const(b)) => fold(a * b, Expr::Mul(lhs.clone().boxed(), rhs.clone().boxed())),
                    (Expr::Const(a), _) if *a == 0.0 => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(0.0),
                    (Expr::Const(a), _) if *a == 1.0 => rhs,
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Mul(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Div(lhs, rhs) => {
                let lhs = lhs.simplify_once();
                let rhs = rhs.simplify_once();
                match (&lhs, &rhs) {
                    // division by a zero constant is left in place so the
                    // failure stays local to evaluation
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => {
                        fold(a / b, Expr::Div(lhs.clone().boxed(), rhs.clone().boxed()))
                    }
                    (Expr::Const(a), rhs_) if *a == 0.0 && !rhs_.is_zero() => Expr::Const(0.0),
                    (_, Expr::Const(b)) if *b == 1.0 => lhs,
                    _ => Expr::Div(lhs.boxed(), rhs.boxed()),
                }
            }
            Expr::Pow(base, exp) => {
                let base = base.simplify_once();
                let exp = exp.simplify_once();
                match (&base, &exp) {
                    (Expr::Const(a), Expr::Const(b)) => {
                        fold(a.powf(*b), Expr::Pow(base.clone().boxed(), exp.clone().boxed()))
                    }
                    (_, Expr::Const(b)) if *b == 0.0 => Expr::Const(1.0),
                    (_, Expr::Const(b)) if *b == 1.0 => base,
                    _ => Expr::Pow(base.boxed(), exp.boxed()),
                }
            }
            Expr::Exp(e) => fold_unary(e, f64::exp, Expr::Exp),
            Expr::Ln(e) => fold_unary(e, f64::ln, Expr::Ln),
            Expr::Log10(e) => fold_unary(e, f64::log10, Expr::Log10),
            Expr::Sqrt(e) => fold_unary(e, f64::sqrt, Expr::Sqrt),
            Expr::Abs(e) => fold_unary(e, f64::abs, Expr::Abs),
            Expr::Floor(e) => fold_unary(e, f64::floor, Expr::Floor),
            Expr::Ceil(e) => fold_unary(e, f64::ceil, Expr::Ceil),
            Expr::sin(e) => fold_unary(e, f64::sin, Expr::sin),
            Expr::cos(e) => fold_unary(e, f64::cos, Expr::cos),
            Expr::tan(e) => fold_unary(e, f64::tan, Expr::tan),
            Expr::sec(e) => fold_unary(e, |v| 1.0 / v.cos(), Expr::sec),
            Expr::csc(e) => fold_unary(e, |v| 1.0 / v.sin(), Expr::csc),
            Expr::cot(e) => fold_unary(e, |v| 1.0 / v.tan(), Expr::cot),
        }
    }
}

/// Keeps the folded constant only when it is finite, otherwise the original
/// subtree survives and fails at the offending sample during evaluation.
fn fold(value: f64, original: Expr) -> Expr {
    if value.is_finite() {
        Expr::Const(value)
    } else {
        original
    }
}

fn fold_unary(
    inner: &Expr,
    eval: impl Fn(f64) -> f64,
    rebuild: impl Fn(Box<Expr>) -> Expr,
) -> Expr {
    let inner = inner.simplify_once();
    if let Expr::Const(v) = inner {
        let folded = eval(v);
        if folded.is_finite() {
            return Expr::Const(folded);
        }
    }
    rebuild(inner.boxed())
}

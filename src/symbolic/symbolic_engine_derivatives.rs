//! Analytical differentiation of expression trees.
//!
//! `diff` implements the standard rules (sum, product, quotient, chain) plus a
//! derivative rule for every function in the vocabulary. The power rule is
//! split in two: a constant exponent uses n*u^(n-1)*u', which stays defined
//! for negative bases and arbitrary real n, while a variable exponent falls
//! back to the general u^v * (v'*ln(u) + v*u'/u) form.
//!
//! floor and ceil have no derivative; asking for one is a
//! [`DifferentiationError`], not a silent zero, because an
//! almost-everywhere-zero derivative would flood the grid search with
//! candidates and corrupt the Hessian test.

use crate::errors::DifferentiationError;
use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_lambdify::CompiledFunction;
use std::f64::consts::LN_10;

/// The five compiled partial derivatives of one expression. All fields are
/// derived from the same tree; the mixed partial is computed once as
/// d(fx)/dy and reused for both off-diagonal Hessian entries (Clairaut).
#[derive(Debug)]
pub struct DerivativeSet {
    pub fx: CompiledFunction,
    pub fy: CompiledFunction,
    pub fxx: CompiledFunction,
    pub fyy: CompiledFunction,
    pub fxy: CompiledFunction,
}

impl Expr {
    /// Analytical partial derivative with respect to `var`.
    pub fn diff(&self, var: &str) -> Result<Expr, DifferentiationError> {
        let expr = match self {
            Expr::Var(name) => {
                if name == var {
                    Expr::Const(1.0)
                } else {
                    Expr::Const(0.0)
                }
            }
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Add(lhs, rhs) => {
                Expr::Add(Box::new(lhs.diff(var)?), Box::new(rhs.diff(var)?))
            }
            Expr::Sub(lhs, rhs) => {
                Expr::Sub(Box::new(lhs.diff(var)?), Box::new(rhs.diff(var)?))
            }
            Expr::Mul(lhs, rhs) => Expr::Add(
                Box::new(Expr::Mul(Box::new(lhs.diff(var)?), rhs.clone())),
                Box::new(Expr::Mul(lhs.clone(), Box::new(rhs.diff(var)?))),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(Box::new(lhs.diff(var)?), rhs.clone())),
                    Box::new(Expr::Mul(Box::new(rhs.diff(var)?), lhs.clone())),
                )),
                Box::new(Expr::Mul(rhs.clone(), rhs.clone())),
            ),
            Expr::Pow(base, exp) => {
                if exp.is_constant() {
                    // n * u^(n-1) * u', valid for all real n and negative bases
                    Expr::Mul(
                        Box::new(Expr::Mul(
                            exp.clone(),
                            Box::new(Expr::Pow(
                                base.clone(),
                                Box::new(Expr::Sub(exp.clone(), Box::new(Expr::Const(1.0)))),
                            )),
                        )),
                        Box::new(base.diff(var)?),
                    )
                } else {
                    // u^v * (v' * ln(u) + v * u' / u)
                    Expr::Mul(
                        Box::new(self.clone()),
                        Box::new(Expr::Add(
                            Box::new(Expr::Mul(
                                Box::new(exp.diff(var)?),
                                Box::new(Expr::Ln(base.clone())),
                            )),
                            Box::new(Expr::Div(
                                Box::new(Expr::Mul(exp.clone(), Box::new(base.diff(var)?))),
                                base.clone(),
                            )),
                        )),
                    )
                }
            }
            Expr::Exp(expr) => {
                Expr::Mul(Box::new(Expr::Exp(expr.clone())), Box::new(expr.diff(var)?))
            }
            Expr::Ln(expr) => Expr::Div(Box::new(expr.diff(var)?), expr.clone()),
            Expr::Log10(expr) => Expr::Div(
                Box::new(expr.diff(var)?),
                Box::new(Expr::Mul(expr.clone(), Box::new(Expr::Const(LN_10)))),
            ),
            Expr::Sqrt(expr) => Expr::Div(
                Box::new(expr.diff(var)?),
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(2.0)),
                    Box::new(Expr::Sqrt(expr.clone())),
                )),
            ),
            // d|u| = u * u' / |u|, undefined at u = 0 which surfaces as a
            // local evaluation failure at that sample
            Expr::Abs(expr) => Expr::Div(
                Box::new(Expr::Mul(expr.clone(), Box::new(expr.diff(var)?))),
                Box::new(Expr::Abs(expr.clone())),
            ),
            Expr::Floor(_) => return Err(DifferentiationError::NonDifferentiable("floor")),
            Expr::Ceil(_) => return Err(DifferentiationError::NonDifferentiable("ceil")),
            Expr::sin(expr) => {
                Expr::Mul(Box::new(Expr::cos(expr.clone())), Box::new(expr.diff(var)?))
            }
            Expr::cos(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::sin(expr.clone())),
                )),
                Box::new(expr.diff(var)?),
            ),
            Expr::tan(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::cos(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)?),
            ),
            Expr::cot(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Pow(
                        Box::new(Expr::sin(expr.clone())),
                        Box::new(Expr::Const(2.0)),
                    )),
                )),
                Box::new(expr.diff(var)?),
            ),
            Expr::sec(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::sec(expr.clone())),
                    Box::new(Expr::tan(expr.clone())),
                )),
                Box::new(expr.diff(var)?),
            ),
            Expr::csc(expr) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(-1.0)),
                    Box::new(Expr::Mul(
                        Box::new(Expr::csc(expr.clone())),
                        Box::new(Expr::cot(expr.clone())),
                    )),
                )),
                Box::new(expr.diff(var)?),
            ),
        };
        Ok(expr)
    }

    /// Builds the full derivative set {fx, fy, fxx, fyy, fxy} of this tree,
    /// each simplified and compiled to an evaluable function.
    pub fn partial_derivatives(&self) -> Result<DerivativeSet, DifferentiationError> {
        let fx = self.diff("x")?.simplify();
        let fy = self.diff("y")?.simplify();
        let fxx = fx.diff("x")?.simplify();
        let fyy = fy.diff("y")?.simplify();
        let fxy = fx.diff("y")?.simplify();
        Ok(DerivativeSet {
            fx: fx.lambdify2d(),
            fy: fy.lambdify2d(),
            fxx: fxx.lambdify2d(),
            fyy: fyy.lambdify2d(),
            fxy: fxy.lambdify2d(),
        })
    }
}

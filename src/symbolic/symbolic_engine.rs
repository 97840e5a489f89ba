//! # Symbolic Engine Module
//!
//! Core expression tree for scalar functions of the two variables `x` and `y`.
//! An `Expr` is an immutable abstract syntax tree over constants, variables,
//! the arithmetic operators and a fixed function vocabulary; every
//! transformation (substitution, differentiation, simplification) produces a
//! new tree.
//!
//! The function vocabulary is closed: sin, cos, tan, sec, csc, cot, exp,
//! log (natural), log10, sqrt, abs, floor, ceil. The parser rejects anything
//! else, so downstream code can match exhaustively.

#![allow(non_camel_case_types)]

use std::fmt;

/// Symbolic expression tree. Uses `Box<Expr>` for recursive structure,
/// enabling arbitrarily nested expressions.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// Symbolic variable, `"x"` or `"y"`
    Var(String),
    /// Numerical constant
    Const(f64),
    /// left + right
    Add(Box<Expr>, Box<Expr>),
    /// left - right
    Sub(Box<Expr>, Box<Expr>),
    /// left * right
    Mul(Box<Expr>, Box<Expr>),
    /// left / right
    Div(Box<Expr>, Box<Expr>),
    /// base ^ exponent, arbitrary real exponents
    Pow(Box<Expr>, Box<Expr>),
    /// e^u
    Exp(Box<Expr>),
    /// natural logarithm ln(u); spelled `log` in input text
    Ln(Box<Expr>),
    /// decimal logarithm
    Log10(Box<Expr>),
    /// square root
    Sqrt(Box<Expr>),
    /// absolute value
    Abs(Box<Expr>),
    /// floor(u), largest integer <= u
    Floor(Box<Expr>),
    /// ceil(u), smallest integer >= u
    Ceil(Box<Expr>),
    sin(Box<Expr>),
    cos(Box<Expr>),
    tan(Box<Expr>),
    sec(Box<Expr>),
    csc(Box<Expr>),
    cot(Box<Expr>),
}

/// Canonical textual form with explicit parentheses. Parsing the rendered
/// string yields a tree that evaluates identically.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Const(val) => write!(f, "{}", val),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Exp(expr) => write!(f, "exp({})", expr),
            Expr::Ln(expr) => write!(f, "log({})", expr),
            Expr::Log10(expr) => write!(f, "log10({})", expr),
            Expr::Sqrt(expr) => write!(f, "sqrt({})", expr),
            Expr::Abs(expr) => write!(f, "abs({})", expr),
            Expr::Floor(expr) => write!(f, "floor({})", expr),
            Expr::Ceil(expr) => write!(f, "ceil({})", expr),
            Expr::sin(expr) => write!(f, "sin({})", expr),
            Expr::cos(expr) => write!(f, "cos({})", expr),
            Expr::tan(expr) => write!(f, "tan({})", expr),
            Expr::sec(expr) => write!(f, "sec({})", expr),
            Expr::csc(expr) => write!(f, "csc({})", expr),
            Expr::cot(expr) => write!(f, "cot({})", expr),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Const(-1.0)), Box::new(self))
    }
}

impl Expr {
    /// Shorthand for a named variable.
    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    /// Wraps the expression in a `Box` for recursive construction.
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    /// Power expression self^rhs.
    pub fn pow(self, rhs: Expr) -> Expr {
        Expr::Pow(self.boxed(), rhs.boxed())
    }

    /// True for the constant 0.0 exactly.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Const(val) if *val == 0.0)
    }

    /// True if the expression is a constant subtree (contains no variable at all).
    pub fn is_constant(&self) -> bool {
        match self {
            Expr::Var(_) => false,
            Expr::Const(_) => true,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => lhs.is_constant() && rhs.is_constant(),
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::Sqrt(expr)
            | Expr::Abs(expr)
            | Expr::Floor(expr)
            | Expr::Ceil(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tan(expr)
            | Expr::sec(expr)
            | Expr::csc(expr)
            | Expr::cot(expr) => expr.is_constant(),
        }
    }

    /// True if the expression mentions the named variable.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Const(_) => false,
            Expr::Add(lhs, rhs)
            | Expr::Sub(lhs, rhs)
            | Expr::Mul(lhs, rhs)
            | Expr::Div(lhs, rhs)
            | Expr::Pow(lhs, rhs) => {
                lhs.contains_variable(var_name) || rhs.contains_variable(var_name)
            }
            Expr::Exp(expr)
            | Expr::Ln(expr)
            | Expr::Log10(expr)
            | Expr::Sqrt(expr)
            | Expr::Abs(expr)
            | Expr::Floor(expr)
            | Expr::Ceil(expr)
            | Expr::sin(expr)
            | Expr::cos(expr)
            | Expr::tan(expr)
            | Expr::sec(expr)
            | Expr::csc(expr)
            | Expr::cot(expr) => expr.contains_variable(var_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_overloads() {
        let x = Expr::var("x");
        let y = Expr::var("y");
        let expr = x.clone() * x + y;
        assert_eq!(
            expr,
            Expr::Add(
                Box::new(Expr::Mul(
                    Box::new(Expr::Var("x".to_string())),
                    Box::new(Expr::Var("x".to_string()))
                )),
                Box::new(Expr::Var("y".to_string()))
            )
        );
    }

    #[test]
    fn test_display_roundtrips_through_parser() {
        use crate::symbolic::parse_expr::parse_expression;
        let expr = parse_expression("x^2 + sin(y)/2").unwrap();
        let reparsed = parse_expression(&expr.to_string()).unwrap();
        assert_eq!(expr, reparsed);
    }

    #[test]
    fn test_contains_variable() {
        let expr = Expr::var("x").pow(Expr::Const(2.0)) + Expr::sin(Expr::var("y").boxed());
        assert!(expr.contains_variable("x"));
        assert!(expr.contains_variable("y"));
        assert!(!expr.contains_variable("z"));
    }

    #[test]
    fn test_is_constant() {
        let expr = Expr::Const(2.0).pow(Expr::Const(3.0));
        assert!(expr.is_constant());
        let expr = Expr::Const(2.0).pow(Expr::var("y"));
        assert!(!expr.is_constant());
    }

    #[test]
    fn test_neg_is_mul_by_minus_one() {
        let expr = -Expr::var("x");
        assert_eq!(
            expr,
            Expr::Mul(
                Box::new(Expr::Const(-1.0)),
                Box::new(Expr::Var("x".to_string()))
            )
        );
    }
}

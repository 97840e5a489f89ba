//! Error taxonomy for the analysis pipeline.
//!
//! Parse and differentiation failures are terminal for the whole request and
//! carry the reason the input was rejected. Evaluation failures are always
//! local to a single (x, y) sample: the grid scan skips the node and the
//! surface sampler stores a NaN marker instead.

use thiserror::Error;

/// Failure to turn a textual expression into a syntax tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    EmptyExpression,
    #[error("invalid character '{0}' in expression")]
    InvalidCharacter(char),
    #[error("unknown function '{0}'")]
    UnknownFunction(String),
    #[error("unknown variable '{0}', only x and y are supported")]
    UnknownVariable(String),
    #[error("malformed expression: {0}")]
    Malformed(String),
}

/// Failure to build the derivative set of an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DifferentiationError {
    #[error("'{0}' is not differentiable")]
    NonDifferentiable(&'static str),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Domain failure at one specific sample point. Never propagated past the
/// grid node that triggered it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("expression is undefined at ({x}, {y})")]
    OutOfDomain { x: f64, y: f64 },
}

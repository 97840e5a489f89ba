//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Examples;
pub mod Utils;
pub mod analysis;
pub mod errors;
pub mod numerical;
pub mod symbolic;

pub use analysis::{differentiate, find_critical_points, parse, sample_surface};
pub use errors::{DifferentiationError, EvaluationError, ParseError};
pub use numerical::critical_points::{CriticalPoint, SearchRegion};
pub use numerical::hessian::Classification;
pub use numerical::surface::{GridRegion, SampledSurface};
pub use symbolic::symbolic_engine::Expr;
pub use symbolic::symbolic_engine_derivatives::DerivativeSet;
pub use symbolic::symbolic_lambdify::CompiledFunction;

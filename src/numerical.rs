/// Numerical layer: grid-based critical point search, Hessian classification
/// and surface sampling for plot views.
pub mod critical_points;
pub mod hessian;
pub mod surface;

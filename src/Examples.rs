//! examples of usage of critgrid
/// Critical point search and surface sampling examples
pub mod critical_points_examples;

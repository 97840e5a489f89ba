#![allow(non_snake_case)]
/// Presentation collaborators around the numeric core: PNG plots, CSV export
/// and logger setup. Nothing in here is part of the core contract; the
/// numeric path itself emits no console output.
pub mod logger;
pub mod plots;

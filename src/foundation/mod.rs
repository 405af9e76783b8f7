//! Shared primitives: frame indices, viewports, errors and interpolation.

pub mod core;
pub mod error;
pub mod math;

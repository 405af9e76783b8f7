//! Scroll progress, spring smoothing and progress-to-frame mapping.

pub mod mapper;
pub mod progress;
pub mod spring;

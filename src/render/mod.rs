//! CPU canvas rendering.

/// Cover-fit placement.
pub mod geometry;
/// Frame-to-canvas drawing with change tracking.
pub mod renderer;
/// Draw surface trait and the DPR-aware CPU surface.
pub mod surface;

use crate::foundation::core::clamp_unit;

/// Read-only view of a scroll-progress value owned by the host (browser, window system, test).
pub trait ProgressSource {
    /// Current raw progress. Values outside `[0, 1]` are clamped by consumers.
    fn progress(&self) -> f64;
}

impl<F> ProgressSource for F
where
    F: Fn() -> f64,
{
    fn progress(&self) -> f64 {
        self()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tracks how far a tall region has been scrolled through the viewport.
///
/// Progress is 0 when the region's top meets the viewport's top and 1 when the region's bottom
/// meets the viewport's bottom.
pub struct ScrollTracker {
    /// Document offset of the region's top edge.
    pub region_top: f64,
    /// Region height in logical pixels.
    pub region_height: f64,
    /// Viewport height in logical pixels.
    pub viewport_height: f64,
    /// Current document scroll offset.
    pub scroll_y: f64,
}

impl ScrollTracker {
    pub fn new(region_top: f64, region_height: f64, viewport_height: f64) -> Self {
        Self {
            region_top,
            region_height,
            viewport_height,
            scroll_y: 0.0,
        }
    }

    /// A region `multiple` viewports tall starting at the document top.
    pub fn viewport_multiple(multiple: f64, viewport_height: f64) -> Self {
        Self::new(0.0, viewport_height * multiple, viewport_height)
    }

    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }

    /// Keeps a viewport-relative region height in step with the viewport.
    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
    }

    /// Scroll distance over which progress runs from 0 to 1.
    pub fn scroll_span(&self) -> f64 {
        self.region_height - self.viewport_height
    }

    /// Scroll offset that produces `progress`.
    pub fn scroll_y_for(&self, progress: f64) -> f64 {
        self.region_top + clamp_unit(progress) * self.scroll_span().max(0.0)
    }
}

impl ProgressSource for ScrollTracker {
    fn progress(&self) -> f64 {
        let span = self.scroll_span();
        let travelled = self.scroll_y - self.region_top;
        if !span.is_finite() || span <= 0.0 {
            return if travelled < 0.0 { 0.0 } else { 1.0 };
        }
        clamp_unit(travelled / span)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/progress.rs"]
mod tests;

use crate::{
    assets::store::FrameStore,
    foundation::{
        core::{FrameIndex, Viewport},
        error::ZenithResult,
    },
    render::{
        geometry::cover_fit,
        surface::{DrawSurface, Surface},
    },
};

/// Draws frames from a [`FrameStore`] into a full-viewport surface with cover-fit scaling.
#[derive(Debug)]
pub struct CanvasRenderer<S = Surface> {
    surface: S,
    current: Option<FrameIndex>,
    draws: u64,
}

impl CanvasRenderer<Surface> {
    /// CPU renderer; `clear_rgba` is premultiplied.
    pub fn cpu(viewport: Viewport, clear_rgba: [u8; 4]) -> ZenithResult<Self> {
        Ok(Self::new(Surface::new(viewport, clear_rgba)?))
    }
}

impl<S: DrawSurface> CanvasRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
            draws: 0,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The most recently requested frame, drawn or not.
    pub fn current_index(&self) -> Option<FrameIndex> {
        self.current
    }

    /// Completed draw calls since construction.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    /// Clear and draw `index`. Returns `false` without touching the surface when the frame is not
    /// loaded yet.
    pub fn draw(&mut self, index: FrameIndex, store: &FrameStore) -> ZenithResult<bool> {
        self.current = Some(index);
        let Some(image) = store.get(index) else {
            return Ok(false);
        };
        let Some(fit) = cover_fit(self.surface.viewport().logical_size(), image.size()) else {
            return Ok(false);
        };

        self.surface.clear();
        self.surface.draw_image(image, fit.dest)?;
        self.draws += 1;
        Ok(true)
    }

    /// Reallocate for `viewport` and immediately redraw the current frame.
    pub fn resize(&mut self, viewport: Viewport, store: &FrameStore) -> ZenithResult<bool> {
        self.surface.resize(viewport)?;
        match self.current {
            Some(index) => self.draw(index, store),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;

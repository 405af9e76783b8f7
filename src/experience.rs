//! The scroll-driven product story: frames, smoothing, canvas and copy overlays wired together.

use crate::{
    animation::{mapper::FrameMapper, progress::ProgressSource, progress::ScrollTracker},
    assets::{
        decode::premultiply_pixel,
        source::FrameSource,
        store::{FrameStore, LoadOptions, LoadState},
    },
    config::LandingConfig,
    foundation::{
        core::{FrameIndex, Viewport},
        error::ZenithResult,
    },
    overlay::sequencer::{OverlayFrame, OverlaySequencer},
    render::{renderer::CanvasRenderer, surface::FrameRGBA},
};

/// Loading screen shown until every frame decoded.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct LoadingOverlay {
    pub visible: bool,
    pub percent: u8,
    pub label: String,
}

#[derive(Debug)]
pub struct ScrollExperience {
    store: FrameStore,
    tracker: ScrollTracker,
    mapper: FrameMapper,
    renderer: CanvasRenderer,
    overlays: OverlaySequencer,
    scroll_viewports: f64,
}

impl ScrollExperience {
    pub fn new(config: &LandingConfig, viewport: Viewport) -> ZenithResult<Self> {
        config.validate()?;
        viewport.validate()?;

        let tracker = ScrollTracker::viewport_multiple(config.scroll_viewports, viewport.height);
        let mapper = FrameMapper::new(config.frames.count, config.spring, tracker.progress())?;
        let clear = premultiply_pixel(config.clear_rgba);
        Ok(Self {
            store: FrameStore::new(config.frames.clone()),
            tracker,
            mapper,
            renderer: CanvasRenderer::cpu(viewport, clear)?,
            overlays: OverlaySequencer::new(config.overlays.clone())?,
            scroll_viewports: config.scroll_viewports,
        })
    }

    /// Preload every frame, then paint the frame the scroll position currently selects.
    pub fn load_frames<S>(&mut self, source: &S, opts: &LoadOptions) -> ZenithResult<()>
    where
        S: FrameSource + ?Sized,
    {
        self.store.load(source, opts, |percent| {
            tracing::debug!(percent, "loading frames");
        })?;
        self.on_frames_ready().map(|_| ())
    }

    /// Paint the currently selected frame; `Ok(false)` while frames are still missing.
    pub fn on_frames_ready(&mut self) -> ZenithResult<bool> {
        self.renderer.draw(self.mapper.current_index(), &self.store)
    }

    pub fn loading_overlay(&self) -> LoadingOverlay {
        let percent = self.store.progress().percent();
        LoadingOverlay {
            visible: self.store.state() != LoadState::Ready,
            percent,
            label: format!("Loading Zenith X Experience {percent}%"),
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.tracker.set_scroll_y(scroll_y);
    }

    pub fn scroll_to_progress(&mut self, progress: f64) {
        let y = self.tracker.scroll_y_for(progress);
        self.tracker.set_scroll_y(y);
    }

    /// Advance smoothing by `dt_secs`; redraws only when the visible frame changes.
    pub fn tick(&mut self, dt_secs: f64) -> ZenithResult<Option<FrameIndex>> {
        let Some(index) = self.mapper.tick(&self.tracker, dt_secs) else {
            return Ok(None);
        };
        self.renderer.draw(index, &self.store)?;
        Ok(Some(index))
    }

    /// Tick until the smoothing settles or `max_ticks` elapse; returns the ticks used.
    pub fn settle(&mut self, dt_secs: f64, max_ticks: usize) -> ZenithResult<usize> {
        let mut ticks = 0;
        while ticks < max_ticks {
            self.tick(dt_secs)?;
            ticks += 1;
            if self.mapper.is_settled() {
                break;
            }
        }
        Ok(ticks)
    }

    /// Track a new viewport and redraw the selected frame into the reallocated canvas.
    pub fn resize(&mut self, viewport: Viewport) -> ZenithResult<bool> {
        viewport.validate()?;
        self.tracker.set_viewport_height(viewport.height);
        self.tracker.region_height = viewport.height * self.scroll_viewports;
        self.renderer.resize(viewport, &self.store)
    }

    /// Overlays follow raw scroll progress, not the smoothed value.
    pub fn overlays(&self) -> ZenithResult<Vec<OverlayFrame<'_>>> {
        self.overlays.evaluate_all(self.tracker.progress())
    }

    pub fn frame(&self) -> FrameRGBA {
        self.renderer.surface().to_frame()
    }

    pub fn current_index(&self) -> FrameIndex {
        self.mapper.current_index()
    }

    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    pub fn mapper(&self) -> &FrameMapper {
        &self.mapper
    }

    /// For subscribing to frame changes.
    pub fn mapper_mut(&mut self) -> &mut FrameMapper {
        &mut self.mapper
    }

    pub fn renderer(&self) -> &CanvasRenderer {
        &self.renderer
    }
}

#[cfg(test)]
#[path = "../tests/unit/experience.rs"]
mod tests;

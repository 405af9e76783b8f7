use crate::{
    animation::{
        progress::ProgressSource,
        spring::{Spring, SpringParams},
    },
    foundation::{
        core::{FrameIndex, clamp_unit},
        error::{ZenithError, ZenithResult},
    },
};

/// Real-valued frame position in `[1, frame_count]` for a progress in `[0, 1]`.
pub fn frame_position(progress: f64, frame_count: u32) -> f64 {
    let n = f64::from(frame_count.max(1));
    1.0 + clamp_unit(progress) * (n - 1.0)
}

/// Integer frame for `progress`: floor of [`frame_position`], clamped to `[1, frame_count]`.
pub fn frame_index_for(progress: f64, frame_count: u32) -> FrameIndex {
    let pos = frame_position(progress, frame_count).floor();
    FrameIndex(pos as u32).clamp_to(frame_count)
}

/// Handle returned by [`FrameMapper::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(FrameIndex) + Send>;

/// Turns a raw scroll-progress source into a smoothed, integer frame index.
///
/// Listeners fire only when the floored index changes, never on sub-frame movement.
pub struct FrameMapper {
    frame_count: u32,
    spring: Spring,
    current: FrameIndex,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl std::fmt::Debug for FrameMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameMapper")
            .field("frame_count", &self.frame_count)
            .field("spring", &self.spring)
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl FrameMapper {
    /// Start at rest on `initial_progress` (the page's scroll position at mount).
    pub fn new(frame_count: u32, params: SpringParams, initial_progress: f64) -> ZenithResult<Self> {
        if frame_count == 0 {
            return Err(ZenithError::validation("frame mapper needs at least one frame"));
        }
        let spring = Spring::new(params, initial_progress)?;
        let current = frame_index_for(spring.value(), frame_count);
        Ok(Self {
            frame_count,
            spring,
            current,
            next_id: 0,
            listeners: Vec::new(),
        })
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn current_index(&self) -> FrameIndex {
        self.current
    }

    pub fn smoothed_progress(&self) -> f64 {
        self.spring.value()
    }

    pub fn frame_position(&self) -> f64 {
        frame_position(self.spring.value(), self.frame_count)
    }

    pub fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }

    /// Register a listener for integer index changes.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(FrameIndex) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Chase `source` for `dt_secs`; returns the new index if it changed.
    pub fn tick<S>(&mut self, source: &S, dt_secs: f64) -> Option<FrameIndex>
    where
        S: ProgressSource + ?Sized,
    {
        self.spring.set_target(source.progress());
        let smoothed = self.spring.step(dt_secs);
        self.apply(smoothed)
    }

    /// Snap to `progress` without smoothing; returns the new index if it changed.
    pub fn jump_to(&mut self, progress: f64) -> Option<FrameIndex> {
        self.spring.jump_to(progress);
        self.apply(self.spring.value())
    }

    fn apply(&mut self, smoothed: f64) -> Option<FrameIndex> {
        let next = frame_index_for(smoothed, self.frame_count);
        if next == self.current {
            return None;
        }
        tracing::trace!(from = self.current.0, to = next.0, "frame index changed");
        self.current = next;
        for (_, listener) in &mut self.listeners {
            listener(next);
        }
        Some(next)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/mapper.rs"]
mod tests;

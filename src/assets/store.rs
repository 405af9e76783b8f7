use std::sync::{
    Arc,
    atomic::{AtomicU32, Ordering},
};

use rayon::prelude::*;

use crate::{
    assets::{
        decode::{FrameImage, decode_frame},
        sequence::FrameSequenceSpec,
        source::FrameSource,
    },
    foundation::{
        core::FrameIndex,
        error::{ZenithError, ZenithResult},
    },
};

/// Shared completion counter for an in-flight load.
///
/// Cloned out of the store via [`FrameStore::progress`] so another thread can poll it while
/// [`FrameStore::load`] runs.
#[derive(Debug)]
pub struct LoadProgress {
    loaded: AtomicU32,
    total: u32,
}

impl LoadProgress {
    fn new(total: u32) -> Self {
        Self {
            loaded: AtomicU32::new(0),
            total,
        }
    }

    pub fn loaded(&self) -> u32 {
        self.loaded.load(Ordering::Acquire)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// `floor(loaded / total * 100)`.
    pub fn percent(&self) -> u8 {
        percent_of(self.loaded(), self.total)
    }

    fn record(&self) -> u8 {
        let loaded = self.loaded.fetch_add(1, Ordering::AcqRel) + 1;
        percent_of(loaded, self.total)
    }
}

fn percent_of(loaded: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    ((u64::from(loaded.min(total)) * 100) / u64::from(total)) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Lifecycle of a [`FrameStore`]. `Ready` and `Failed` are terminal.
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug, Default)]
/// Loader knobs.
pub struct LoadOptions {
    /// Worker threads for fetch+decode. `None` issues every frame at once.
    pub threads: Option<usize>,
}

#[derive(Debug)]
/// Fixed-size ordered set of decoded frames.
pub struct FrameStore {
    spec: FrameSequenceSpec,
    progress: Arc<LoadProgress>,
    frames: Vec<FrameImage>,
    state: LoadState,
    failure: Option<String>,
}

impl FrameStore {
    pub fn new(spec: FrameSequenceSpec) -> Self {
        let progress = Arc::new(LoadProgress::new(spec.count));
        Self {
            spec,
            progress,
            frames: Vec::new(),
            state: LoadState::Idle,
            failure: None,
        }
    }

    /// Fetch and decode every frame concurrently.
    ///
    /// `on_progress` receives the updated percentage after each individual frame decodes, in
    /// completion order, possibly from several worker threads. Readiness flips only once all
    /// frames decoded; the first failure aborts the load and leaves the store permanently
    /// not-ready. There is no retry and no placeholder substitution.
    #[tracing::instrument(skip(self, source, opts, on_progress), fields(count = self.spec.count))]
    pub fn load<S, F>(&mut self, source: &S, opts: &LoadOptions, on_progress: F) -> ZenithResult<()>
    where
        S: FrameSource + ?Sized,
        F: Fn(u8) + Sync,
    {
        if self.state != LoadState::Idle {
            return Err(ZenithError::validation(format!(
                "frame store already loaded (state {:?})",
                self.state
            )));
        }
        self.spec.validate()?;
        self.state = LoadState::Loading;

        let threads = opts.threads.unwrap_or(self.spec.count as usize);
        let pool = match build_thread_pool(threads) {
            Ok(pool) => pool,
            Err(err) => return Err(self.fail(err)),
        };

        tracing::debug!(threads, "preloading frames");
        let spec = &self.spec;
        let progress = &self.progress;
        let indices: Vec<FrameIndex> = spec.indices().collect();

        let result = pool.install(|| {
            indices
                .par_iter()
                .map(|&index| -> ZenithResult<FrameImage> {
                    let rel = spec.relative_path(index);
                    let frame = source
                        .fetch(&rel)
                        .and_then(|bytes| decode_frame(&bytes))
                        .map_err(|e| ZenithError::asset(format!("frame {index} ('{rel}'): {e}")))?;
                    on_progress(progress.record());
                    Ok(frame)
                })
                .collect::<ZenithResult<Vec<_>>>()
        });

        match result {
            Ok(frames) => {
                self.frames = frames;
                self.state = LoadState::Ready;
                tracing::info!(frames = self.frames.len(), "frame sequence ready");
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: ZenithError) -> ZenithError {
        tracing::error!(error = %err, "error preloading frames");
        self.state = LoadState::Failed;
        self.failure = Some(err.to_string());
        self.frames.clear();
        err
    }

    pub fn spec(&self) -> &FrameSequenceSpec {
        &self.spec
    }

    pub fn frame_count(&self) -> u32 {
        self.spec.count
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// Message of the failure that aborted loading, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn progress(&self) -> Arc<LoadProgress> {
        Arc::clone(&self.progress)
    }

    /// The decoded frame at `index`, or `None` until the store is ready.
    pub fn get(&self, index: FrameIndex) -> Option<&FrameImage> {
        if !self.is_ready() {
            return None;
        }
        self.frames.get(index.slot()?)
    }
}

fn build_thread_pool(threads: usize) -> ZenithResult<rayon::ThreadPool> {
    if threads == 0 {
        return Err(ZenithError::validation(
            "frame loader 'threads' must be >= 1 when set",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| ZenithError::asset(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

use crate::foundation::error::{ZenithError, ZenithResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// 1-based index into a frame sequence.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u32);

impl FrameIndex {
    /// First frame of every sequence.
    pub const FIRST: Self = Self(1);

    /// Clamp into `[1, count]`. A zero `count` collapses to [`FrameIndex::FIRST`].
    pub fn clamp_to(self, count: u32) -> Self {
        Self(self.0.clamp(1, count.max(1)))
    }

    /// Zero-based slot for slice lookups.
    pub fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical viewport plus device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, dpr: f64) -> ZenithResult<Self> {
        let vp = Self { width, height, dpr };
        vp.validate()?;
        Ok(vp)
    }

    pub fn validate(&self) -> ZenithResult<()> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("dpr", self.dpr),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ZenithError::validation(format!(
                    "viewport {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn logical_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Backing-store size in device pixels (`logical * dpr`, rounded, at least 1).
    pub fn device_size(&self) -> (u32, u32) {
        fn px(v: f64) -> u32 {
            v.round().clamp(1.0, f64::from(u32::MAX)) as u32
        }
        (px(self.width * self.dpr), px(self.height * self.dpr))
    }
}

/// Clamp a progress-like value into `[0, 1]`, mapping NaN to 0.
pub fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

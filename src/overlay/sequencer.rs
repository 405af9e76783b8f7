use crate::foundation::{
    core::clamp_unit,
    error::{ZenithError, ZenithResult},
    math::interpolate,
};

/// Progress span over which a block fades in (and, mirrored, out).
pub const FADE_SPAN: f64 = 0.05;
/// Vertical travel, in logical units, while entering and leaving.
pub const SLIDE_DISTANCE: f64 = 20.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
    #[default]
    Center,
}

impl Align {
    /// Left edge of a `block`-wide element anchored inside a `container`-wide layer.
    pub fn anchor_x(self, container: f64, block: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Right => container - block,
            Self::Center => (container - block) / 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A copy/CTA block shown over the canvas for a slice of the scroll.
pub struct OverlayBlock {
    pub id: String,
    /// `[start, end]` scroll-progress window.
    pub range: [f64; 2],
    #[serde(default)]
    pub align: Align,
    pub heading: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Call-to-action button label.
    #[serde(default)]
    pub cta: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct OverlayState {
    pub opacity: f64,
    /// Positive is below the resting position.
    pub offset_y: f64,
}

impl OverlayState {
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

impl OverlayBlock {
    pub fn new(id: impl Into<String>, range: [f64; 2], align: Align, heading: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            range,
            align,
            heading: heading.into(),
            body: None,
            cta: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_cta(mut self, cta: impl Into<String>) -> Self {
        self.cta = Some(cta.into());
        self
    }

    /// Range must lie in `[0, 1]` and be wide enough for both fades.
    pub fn validate(&self) -> ZenithResult<()> {
        let [start, end] = self.range;
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || end > 1.0 {
            return Err(ZenithError::validation(format!(
                "overlay '{}' range must lie within [0, 1], got [{start}, {end}]",
                self.id
            )));
        }
        if end - start < 2.0 * FADE_SPAN - 1e-9 {
            return Err(ZenithError::validation(format!(
                "overlay '{}' range [{start}, {end}] is narrower than two fades",
                self.id
            )));
        }
        Ok(())
    }

    /// `[start, start + fade, end - fade, end]`, kept ordered under rounding.
    fn control_points(&self) -> [f64; 4] {
        let [start, end] = self.range;
        let fade_in = (start + FADE_SPAN).min(end);
        let fade_out = (end - FADE_SPAN).clamp(fade_in, end);
        [start, fade_in, fade_out, end]
    }

    /// Opacity and slide offset at `progress`.
    pub fn evaluate(&self, progress: f64) -> ZenithResult<OverlayState> {
        self.validate()?;
        let xs = self.control_points();
        let p = clamp_unit(progress);
        Ok(OverlayState {
            opacity: interpolate(p, &xs, &[0.0, 1.0, 1.0, 0.0])?,
            offset_y: interpolate(p, &xs, &[SLIDE_DISTANCE, 0.0, 0.0, -SLIDE_DISTANCE])?,
        })
    }
}

/// Shipped copy for the Zenith X scroll story.
pub fn default_blocks() -> Vec<OverlayBlock> {
    vec![
        OverlayBlock::new("intro", [0.0, 0.15], Align::Center, "Zenith X.\nVision Perfected."),
        OverlayBlock::new("precision", [0.25, 0.45], Align::Left, "Precision Crafted Frames.")
            .with_body(
                "Aero-grade titanium alloy designed to withstand the extremes while weighing next to nothing.",
            ),
        OverlayBlock::new("optics", [0.55, 0.75], Align::Right, "Advanced Polarized Optics.")
            .with_body(
                "Proprietary lens technology that filters light for unmatched clarity and depth perception.",
            ),
        OverlayBlock::new("cta", [0.85, 1.0], Align::Center, "See Beyond.")
            .with_cta("Experience Zenith X"),
    ]
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverlayFrame<'a> {
    pub block: &'a OverlayBlock,
    #[serde(flatten)]
    pub state: OverlayState,
}

#[derive(Clone, Debug)]
/// Independent set of overlay blocks; no state is shared between blocks.
pub struct OverlaySequencer {
    blocks: Vec<OverlayBlock>,
}

impl OverlaySequencer {
    pub fn new(blocks: Vec<OverlayBlock>) -> ZenithResult<Self> {
        for b in &blocks {
            b.validate()?;
        }
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[OverlayBlock] {
        &self.blocks
    }

    pub fn evaluate_all(&self, progress: f64) -> ZenithResult<Vec<OverlayFrame<'_>>> {
        self.blocks
            .iter()
            .map(|block| {
                Ok(OverlayFrame {
                    block,
                    state: block.evaluate(progress)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/sequencer.rs"]
mod tests;

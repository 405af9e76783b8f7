use crate::foundation::{
    core::FrameIndex,
    error::{ZenithError, ZenithResult},
};

/// Largest sequence addressable with three-digit zero padding.
pub const MAX_FRAMES: u32 = 999;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Naming scheme for a fixed-size, 1-based frame sequence.
pub struct FrameSequenceSpec {
    /// Number of frames `N`; frames are addressed `1..=N`.
    pub count: u32,
    /// Directory the frames live under (web-root style, e.g. `/images`).
    pub directory: String,
    /// File name prefix placed before the zero-padded index.
    pub prefix: String,
    /// File extension including the dot.
    pub extension: String,
}

impl Default for FrameSequenceSpec {
    fn default() -> Self {
        Self {
            count: 40,
            directory: "/images".to_string(),
            prefix: "ezgif-frame-".to_string(),
            extension: ".jpg".to_string(),
        }
    }
}

impl FrameSequenceSpec {
    /// Validate the count fits the three-digit naming scheme.
    pub fn validate(&self) -> ZenithResult<()> {
        if self.count == 0 {
            return Err(ZenithError::validation("frame count must be >= 1"));
        }
        if self.count > MAX_FRAMES {
            return Err(ZenithError::validation(format!(
                "frame count must be <= {MAX_FRAMES}, got {}",
                self.count
            )));
        }
        Ok(())
    }

    /// `<prefix><index:03><extension>`.
    pub fn file_name(&self, index: FrameIndex) -> String {
        format!("{}{:03}{}", self.prefix, index.0, self.extension)
    }

    /// `<directory>/<file_name>` with a single separator.
    pub fn relative_path(&self, index: FrameIndex) -> String {
        let dir = self.directory.trim_end_matches('/');
        if dir.is_empty() {
            self.file_name(index)
        } else {
            format!("{dir}/{}", self.file_name(index))
        }
    }

    /// All indices `1..=count` in order.
    pub fn indices(&self) -> impl Iterator<Item = FrameIndex> + use<> {
        (1..=self.count).map(FrameIndex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/sequence.rs"]
mod tests;

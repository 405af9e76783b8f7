use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    animation::spring::SpringParams,
    assets::sequence::FrameSequenceSpec,
    foundation::error::{ZenithError, ZenithResult},
    overlay::sequencer::{OverlayBlock, default_blocks},
};

pub const ENV_KEY_ID: &str = "RAZORPAY_KEY_ID";
pub const ENV_KEY_SECRET: &str = "RAZORPAY_KEY_SECRET";
pub const ENV_PUBLIC_KEY_ID: &str = "PUBLIC_RAZORPAY_KEY_ID";

/// Everything the landing page needs besides secrets. Every field has a shipped default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub frames: FrameSequenceSpec,
    pub spring: SpringParams,
    /// Height of the scroll-tracking region in viewport heights.
    pub scroll_viewports: f64,
    pub product: ProductConfig,
    pub server: ServerConfig,
    pub overlays: Vec<OverlayBlock>,
    /// Canvas background, straight RGBA8.
    pub clear_rgba: [u8; 4],
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            frames: FrameSequenceSpec::default(),
            spring: SpringParams::default(),
            scroll_viewports: 4.0,
            product: ProductConfig::default(),
            server: ServerConfig::default(),
            overlays: default_blocks(),
            clear_rgba: [5, 5, 5, 255],
        }
    }
}

impl LandingConfig {
    pub fn from_json_file(path: &Path) -> ZenithResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ZenithError::serde(format!("parse config '{}': {e}", path.display())))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ZenithResult<()> {
        self.frames.validate()?;
        self.spring.validate()?;
        if !self.scroll_viewports.is_finite() || self.scroll_viewports <= 1.0 {
            return Err(ZenithError::validation(format!(
                "scroll_viewports must be > 1, got {}",
                self.scroll_viewports
            )));
        }
        for block in &self.overlays {
            block.validate()?;
        }
        self.product.validate()
    }
}

/// What is being sold and how the checkout widget presents it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Price in minor currency units (paise for INR).
    pub amount: u64,
    pub currency: String,
    /// Stored on the gateway order under `notes.product`.
    pub note: String,
    pub display_name: String,
    pub description: String,
    pub prefill: Prefill,
    pub theme_color: String,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            amount: 10_000 * 100,
            currency: "INR".to_string(),
            note: "Zenith X Sunglasses".to_string(),
            display_name: "Zenith X Optics".to_string(),
            description: "Zenith X Sunglasses Purchase".to_string(),
            prefill: Prefill::default(),
            theme_color: "#050505".to_string(),
        }
    }
}

impl ProductConfig {
    pub fn validate(&self) -> ZenithResult<()> {
        if self.amount == 0 {
            return Err(ZenithError::validation("product amount must be > 0"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ZenithError::validation(format!(
                "currency must be a 3-letter ISO code, got '{}'",
                self.currency
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

impl Default for Prefill {
    fn default() -> Self {
        Self {
            name: "Customer".to_string(),
            email: "customer@example.com".to_string(),
            contact: "+919876543210".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Server-side gateway key pair.
#[derive(Clone, PartialEq, Eq)]
pub struct GatewayCredentials {
    pub key_id: String,
    pub key_secret: String,
}

impl std::fmt::Debug for GatewayCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayCredentials")
            .field("key_id", &self.key_id)
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

impl GatewayCredentials {
    pub fn from_env() -> ZenithResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ZenithResult<Self> {
        Ok(Self {
            key_id: required(&lookup, ENV_KEY_ID)?,
            key_secret: required(&lookup, ENV_KEY_SECRET)?,
        })
    }
}

/// Client-visible key id used to initialise the checkout widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey(pub String);

impl PublicKey {
    pub fn from_env() -> ZenithResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ZenithResult<Self> {
        required(&lookup, ENV_PUBLIC_KEY_ID).map(Self)
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> ZenithResult<String> {
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ZenithError::config(format!(
            "environment variable {name} is not set"
        ))),
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

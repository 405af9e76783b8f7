//! Zenith X landing experience.
//!
//! The crate models a scroll-driven product page:
//!
//! - Preload a numbered frame sequence into a [`FrameStore`]
//! - Map scroll progress to a frame through a spring-smoothed [`FrameMapper`]
//! - Paint the selected frame cover-fit onto a DPR-aware canvas with [`CanvasRenderer`]
//! - Fade copy blocks in and out with the [`OverlaySequencer`]
//! - Create payment orders through [`OrderService`] served by [`OrderServer`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod checkout;
pub mod config;
pub mod experience;
pub mod foundation;
pub mod overlay;
pub mod render;

pub use crate::foundation::core::{Affine, FrameIndex, Point, Rect, Size, Viewport};
pub use crate::foundation::error::{ZenithError, ZenithResult};

pub use crate::animation::mapper::{FrameMapper, SubscriptionId};
pub use crate::animation::progress::{ProgressSource, ScrollTracker};
pub use crate::animation::spring::{Spring, SpringParams};
pub use crate::assets::decode::{FrameImage, decode_frame};
pub use crate::assets::sequence::FrameSequenceSpec;
pub use crate::assets::source::{DirSource, FrameSource, HttpSource, MemorySource};
pub use crate::assets::store::{FrameStore, LoadOptions, LoadProgress, LoadState};
pub use crate::checkout::client::{CheckoutClient, CheckoutOptions, CheckoutOutcome};
pub use crate::checkout::order::{GatewayError, Order, OrderGateway, OrderRequest};
pub use crate::checkout::razorpay::RazorpayGateway;
pub use crate::checkout::server::{ApiResponse, OrderServer, OrderService};
pub use crate::config::{GatewayCredentials, LandingConfig, ProductConfig, PublicKey};
pub use crate::experience::{LoadingOverlay, ScrollExperience};
pub use crate::overlay::sequencer::{Align, OverlayBlock, OverlaySequencer, OverlayState};
pub use crate::render::renderer::CanvasRenderer;
pub use crate::render::surface::{DrawSurface, FrameRGBA, Surface};

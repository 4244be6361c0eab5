//! Accent color derivation from the dashboard background
//!
//! Loading is split from processing: an [`ImageLoader`] turns a background
//! reference into raw bytes, [`processor`] decodes and averages them, and the
//! [`AppearanceResolver`] decides when to run the two and which result wins.

use thiserror::Error;

pub mod loader;
pub mod processor;
pub mod resolver;

pub use loader::{DataUriLoader, HttpImageLoader, SourceLoader};
pub use processor::{
    DEFAULT_SAMPLE_SIZE, FALLBACK_COLOR, dominant_color, dominant_color_of,
};
pub use resolver::{AppearanceResolver, ExtractionOutcome, PendingExtraction};

/// Failures while turning a background into a color
#[derive(Debug, Error)]
pub enum AppearanceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {url}")]
    Status { status: u16, url: String },

    #[error("Malformed data URI: {0}")]
    InvalidDataUri(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("No loader supports {0}")]
    UnsupportedSource(String),
}

pub type Result<T> = std::result::Result<T, AppearanceError>;

/// Source of raw image bytes
#[async_trait::async_trait]
pub trait ImageLoader: Send + Sync + std::fmt::Debug {
    /// Fetch the bytes behind `url`
    async fn load(&self, url: &str) -> Result<Vec<u8>>;

    /// Whether this loader understands `url`
    fn supports_url(&self, url: &str) -> bool;
}

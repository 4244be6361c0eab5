use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use glasspane_model::{Background, HexColor};
use tracing::{debug, info, warn};

use super::loader::SourceLoader;
use super::processor::{DEFAULT_SAMPLE_SIZE, dominant_color};
use super::{ImageLoader, Result};
use crate::config::AppearanceConfig;

/// Decides when a background is sampled for color and which sample wins.
///
/// Every extraction draws a number from a monotonically increasing sequence;
/// only the outcome carrying the latest number is ever applied, so a slow
/// download for an old background can never overwrite a newer color.
#[derive(Debug, Clone)]
pub struct AppearanceResolver {
    loader: Arc<dyn ImageLoader>,
    sample_size: u32,
    sequence: Arc<AtomicU64>,
}

impl AppearanceResolver {
    pub fn new(loader: Arc<dyn ImageLoader>, sample_size: u32) -> Self {
        Self {
            loader,
            sample_size,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &AppearanceConfig) -> Result<Self> {
        let loader = SourceLoader::standard(
            config.max_retries,
            Duration::from_millis(config.timeout_ms),
        )?;
        Ok(Self::new(Arc::new(loader), config.sample_size))
    }

    /// Sampling only happens in auto mode and only for image backgrounds
    pub fn should_extract(background: &Background, auto: bool) -> bool {
        auto && background.is_image()
    }

    /// Reserve the next sequence number for `background`
    pub fn begin(&self, background: &Background) -> PendingExtraction {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(sequence, kind = ?background.kind(), "color extraction scheduled");

        PendingExtraction {
            sequence,
            background: background.clone(),
            loader: Arc::clone(&self.loader),
            sample_size: self.sample_size,
        }
    }

    pub fn is_latest(&self, sequence: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == sequence
    }

    /// Invalidate every outstanding extraction without starting a new one
    pub fn cancel_pending(&self) {
        self.sequence.fetch_add(1, Ordering::SeqCst);
    }

    /// Load `image_url` and compute its dominant color
    pub async fn extract_dominant_color(&self, image_url: &str) -> Result<HexColor> {
        extract(self.loader.as_ref(), image_url, self.sample_size).await
    }
}

impl Default for AppearanceResolver {
    fn default() -> Self {
        Self::new(Arc::new(SourceLoader::new()), DEFAULT_SAMPLE_SIZE)
    }
}

async fn extract(
    loader: &dyn ImageLoader,
    image_url: &str,
    sample_size: u32,
) -> Result<HexColor> {
    let data = loader.load(image_url).await?;
    dominant_color(data, sample_size).await
}

/// An extraction detached from the resolver, ready to run on any task
#[derive(Debug)]
pub struct PendingExtraction {
    sequence: u64,
    background: Background,
    loader: Arc<dyn ImageLoader>,
    sample_size: u32,
}

impl PendingExtraction {
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Load and sample the background. Failures are logged and surface as
    /// an outcome without a color.
    pub async fn run(self) -> ExtractionOutcome {
        let color = match extract(
            self.loader.as_ref(),
            self.background.as_str(),
            self.sample_size,
        )
        .await
        {
            Ok(color) => {
                info!(sequence = self.sequence, %color, "extracted theme color");
                Some(color)
            }
            Err(e) => {
                warn!(sequence = self.sequence, "color extraction failed: {e}");
                None
            }
        };

        ExtractionOutcome {
            sequence: self.sequence,
            background: self.background,
            color,
        }
    }
}

/// Result of a finished extraction, to be fed back to its owner
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    pub sequence: u64,
    pub background: Background,
    pub color: Option<HexColor>,
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::appearance::loader::DataUriLoader;
    use crate::appearance::{AppearanceError, HttpImageLoader};

    fn solid_data_uri(rgb: [u8; 3]) -> String {
        let [r, g, b] = rgb;
        let image = RgbaImage::from_pixel(16, 16, Rgba([r, g, b, 255]));
        let mut buffer = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", BASE64.encode(buffer.into_inner()))
    }

    fn data_resolver() -> AppearanceResolver {
        let loader = SourceLoader::new().with_loader(Arc::new(DataUriLoader));
        AppearanceResolver::new(Arc::new(loader), DEFAULT_SAMPLE_SIZE)
    }

    #[test]
    fn gradients_never_extract() {
        let gradient = Background::from(
            "linear-gradient(135deg, #1e293b 0%, #0f172a 50%, #334155 100%)",
        );
        assert!(!AppearanceResolver::should_extract(&gradient, true));
        assert!(!AppearanceResolver::should_extract(&Background::default(), true));
    }

    #[test]
    fn manual_mode_never_extracts() {
        let image = Background::from("https://example.com/bg.jpg");
        assert!(AppearanceResolver::should_extract(&image, true));
        assert!(!AppearanceResolver::should_extract(&image, false));
    }

    #[tokio::test]
    async fn extracts_from_data_uri() {
        let resolver = data_resolver();
        let color = resolver
            .extract_dominant_color(&solid_data_uri([12, 34, 56]))
            .await
            .unwrap();
        assert_eq!(color.to_string(), "#0c2238");
    }

    #[tokio::test]
    async fn unreachable_url_is_an_error() {
        let loader = HttpImageLoader::new(0, Duration::from_secs(2)).unwrap();
        let resolver = AppearanceResolver::new(Arc::new(loader), DEFAULT_SAMPLE_SIZE);

        let result = resolver
            .extract_dominant_color("http://127.0.0.1:9/missing.png")
            .await;
        assert!(matches!(result, Err(AppearanceError::Network(_))));

        let outcome = resolver
            .begin(&Background::from("http://127.0.0.1:9/missing.png"))
            .run()
            .await;
        assert_eq!(outcome.color, None);
    }

    #[tokio::test]
    async fn later_extraction_supersedes_earlier() {
        let resolver = data_resolver();
        let first = resolver.begin(&Background::new(solid_data_uri([255, 0, 0])));
        let second = resolver.begin(&Background::new(solid_data_uri([0, 0, 255])));
        assert!(second.sequence() > first.sequence());

        // The second one finishes first; the first one's late result is stale.
        let second = second.run().await;
        let first = first.run().await;

        assert!(resolver.is_latest(second.sequence));
        assert!(!resolver.is_latest(first.sequence));
        assert_eq!(second.color.map(|c| c.rgb()), Some([0, 0, 255]));
    }

    #[tokio::test]
    async fn cancel_makes_outstanding_work_stale() {
        let resolver = data_resolver();
        let pending = resolver.begin(&Background::new(solid_data_uri([1, 2, 3])));
        resolver.cancel_pending();
        let outcome = pending.run().await;
        assert!(!resolver.is_latest(outcome.sequence));
    }
}

//! Image loaders for remote URLs and inline data URIs

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use tracing::{debug, warn};

use super::{AppearanceError, ImageLoader, Result};

/// Upper bound for a single backoff sleep
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Exponential backoff: 200ms, 400ms, 800ms, ... capped at [`MAX_RETRY_DELAY`]
fn retry_delay(attempt: u32) -> Duration {
    let millis = 2u64.saturating_pow(attempt).saturating_mul(100);
    Duration::from_millis(millis).min(MAX_RETRY_DELAY)
}

/// HTTP-based image loader with connection pooling and retry logic
#[derive(Debug, Clone)]
pub struct HttpImageLoader {
    client: Client,
    max_retries: u32,
}

impl HttpImageLoader {
    /// `max_retries` counts attempts after the first one
    pub fn new(max_retries: u32, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(4)
            .timeout(timeout)
            .build()
            .map_err(|e| AppearanceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            max_retries,
        })
    }

    async fn load_once(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppearanceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppearanceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppearanceError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl ImageLoader for HttpImageLoader {
    async fn load(&self, url: &str) -> Result<Vec<u8>> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(retry_delay(attempt)).await;
            }

            match self.load_once(url).await {
                Ok(data) => {
                    debug!(url, bytes = data.len(), "background image fetched");
                    return Ok(data);
                }
                // Client errors will not improve on retry
                Err(AppearanceError::Status { status, url })
                    if (400..500).contains(&status) =>
                {
                    return Err(AppearanceError::Status { status, url });
                }
                Err(e) => {
                    warn!(url, attempt = attempt + 1, "image load failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            AppearanceError::Network("Unknown error".to_string())
        }))
    }

    fn supports_url(&self, url: &str) -> bool {
        url.starts_with("http://") || url.starts_with("https://")
    }
}

/// Decodes `data:[<mime>][;base64],<payload>` URIs in-process
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriLoader;

impl DataUriLoader {
    pub fn decode(uri: &str) -> Result<Vec<u8>> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| invalid(uri, "missing data: prefix"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid(uri, "missing payload separator"))?;

        if header.split(';').any(|param| param.eq_ignore_ascii_case("base64")) {
            let compact: String =
                payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            BASE64
                .decode(compact.as_bytes())
                .map_err(|e| invalid(uri, &e.to_string()))
        } else {
            Ok(urlencoding::decode_binary(payload.as_bytes()).into_owned())
        }
    }
}

fn invalid(uri: &str, reason: &str) -> AppearanceError {
    let preview: String = uri.chars().take(32).collect();
    AppearanceError::InvalidDataUri(format!("{reason} ({preview}...)"))
}

#[async_trait::async_trait]
impl ImageLoader for DataUriLoader {
    async fn load(&self, url: &str) -> Result<Vec<u8>> {
        Self::decode(url)
    }

    fn supports_url(&self, url: &str) -> bool {
        url.starts_with("data:")
    }
}

/// Routes each URL to the first registered loader that supports it
#[derive(Debug, Clone, Default)]
pub struct SourceLoader {
    loaders: Vec<Arc<dyn ImageLoader>>,
}

impl SourceLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(mut self, loader: Arc<dyn ImageLoader>) -> Self {
        self.loaders.push(loader);
        self
    }

    /// HTTP(S) plus inline data URIs
    pub fn standard(max_retries: u32, timeout: Duration) -> Result<Self> {
        Ok(Self::new()
            .with_loader(Arc::new(HttpImageLoader::new(max_retries, timeout)?))
            .with_loader(Arc::new(DataUriLoader)))
    }

    fn route(&self, url: &str) -> Option<&Arc<dyn ImageLoader>> {
        self.loaders.iter().find(|loader| loader.supports_url(url))
    }
}

#[async_trait::async_trait]
impl ImageLoader for SourceLoader {
    async fn load(&self, url: &str) -> Result<Vec<u8>> {
        match self.route(url) {
            Some(loader) => loader.load(url).await,
            None => Err(AppearanceError::UnsupportedSource(
                url.chars().take(64).collect(),
            )),
        }
    }

    fn supports_url(&self, url: &str) -> bool {
        self.route(url).is_some()
    }
}

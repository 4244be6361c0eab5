/// Background of a fresh install: a plain gradient, so no image is sampled
pub const DEFAULT_BACKGROUND: &str =
    "linear-gradient(135deg, #1e293b 0%, #0f172a 50%, #334155 100%)";

/// How a background value is rendered and whether it can be sampled for color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BackgroundKind {
    /// Remote image addressed by an `http`/`https` URL
    ImageUrl,
    /// Inline image carried in a `data:` URI
    DataUri,
    /// Opaque CSS background value such as a gradient or solid color
    Style,
}

/// Dashboard background: an image reference or a raw CSS value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Background(String);

impl Background {
    pub fn new(value: impl Into<String>) -> Self {
        Background(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn kind(&self) -> BackgroundKind {
        if self.0.starts_with("http") {
            BackgroundKind::ImageUrl
        } else if self.0.starts_with("data:") {
            BackgroundKind::DataUri
        } else {
            BackgroundKind::Style
        }
    }

    /// Whether the value points at an image that can be sampled
    pub fn is_image(&self) -> bool {
        !matches!(self.kind(), BackgroundKind::Style)
    }
}

impl Default for Background {
    fn default() -> Self {
        Background(DEFAULT_BACKGROUND.to_string())
    }
}

impl std::fmt::Display for Background {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Background {
    fn from(value: &str) -> Self {
        Background(value.to_string())
    }
}

impl From<String> for Background {
    fn from(value: String) -> Self {
        Background(value)
    }
}

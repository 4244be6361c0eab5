use crate::error::{ModelError, Result};

/// Accent color used when nothing better is known
pub const DEFAULT_THEME_COLOR: &str = "#6280a3";

/// Card opacity of a fresh install
pub const DEFAULT_CARD_OPACITY: f32 = 0.1;

/// Light or dark rendering of the glass surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Dark => write!(f, "dark"),
            ThemeMode::Light => write!(f, "light"),
        }
    }
}

/// A validated `#rrggbb` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const fn from_rgb(rgb: [u8; 3]) -> Self {
        HexColor(rgb)
    }

    /// Parses `#rrggbb`, `rrggbb`, or the `#rgb` shorthand (case-insensitive)
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ModelError::InvalidColor(raw.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            expanded
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| ModelError::InvalidColor(raw.to_string()))
        };

        Ok(HexColor([channel(0..2)?, channel(2..4)?, channel(4..6)?]))
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    /// `"r, g, b"` form consumed by `rgba(var(--theme-primary-rgb), a)`
    pub fn rgb_triplet(&self) -> String {
        let [r, g, b] = self.0;
        format!("{r}, {g}, {b}")
    }

    /// The color mixed toward black by `amount` (0.0..=1.0), used for hover
    /// states.
    pub fn darken(&self, amount: f32) -> Self {
        let keep = 1.0 - amount.clamp(0.0, 1.0);
        let [r, g, b] = self.0;
        let scale = |c: u8| (c as f32 * keep).round() as u8;
        HexColor([scale(r), scale(g), scale(b)])
    }
}

impl Default for HexColor {
    fn default() -> Self {
        HexColor([0x62, 0x80, 0xa3])
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl std::str::FromStr for HexColor {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        HexColor::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ModelError;

    fn try_from(raw: String) -> Result<Self> {
        HexColor::parse(&raw)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Persisted theming choices
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ThemePreferences {
    pub card_opacity: f32,
    pub theme_color: HexColor,
    /// When set, the accent color follows the background image
    pub theme_color_auto: bool,
    pub theme_mode: ThemeMode,
}

impl Default for ThemePreferences {
    fn default() -> Self {
        Self {
            card_opacity: DEFAULT_CARD_OPACITY,
            theme_color: HexColor::default(),
            theme_color_auto: true,
            theme_mode: ThemeMode::Dark,
        }
    }
}

impl ThemePreferences {
    pub fn set_card_opacity(&mut self, opacity: f32) {
        self.card_opacity = clamp_opacity(opacity);
    }

    /// Repairs values that may have been stored out of range
    pub fn normalized(mut self) -> Self {
        self.card_opacity = clamp_opacity(self.card_opacity);
        self
    }
}

fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        DEFAULT_CARD_OPACITY
    } else {
        opacity.clamp(0.0, 1.0)
    }
}

/// Persisted card grid layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayoutPreferences {
    pub max_container_width: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub grid_columns: u32,
}

impl Default for LayoutPreferences {
    fn default() -> Self {
        Self {
            max_container_width: 900,
            card_width: 96,
            card_height: 96,
            grid_columns: 6,
        }
    }
}

/// Everything the preferences store keeps, as one flat document
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserPreferences {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub theme: ThemePreferences,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub layout: LayoutPreferences,
}

/// Partial preference update; unset fields leave stored values untouched
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PreferencesPatch {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub card_opacity: Option<f32>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub theme_color: Option<HexColor>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub theme_color_auto: Option<bool>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub theme_mode: Option<ThemeMode>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub layout: Option<LayoutPreferences>,
}

impl PreferencesPatch {
    /// Patch carrying every theme field
    pub fn from_theme(theme: &ThemePreferences) -> Self {
        Self {
            card_opacity: Some(theme.card_opacity),
            theme_color: Some(theme.theme_color),
            theme_color_auto: Some(theme.theme_color_auto),
            theme_mode: Some(theme.theme_mode),
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: LayoutPreferences) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &PreferencesPatch::default()
    }

    pub fn apply_to(&self, prefs: &mut UserPreferences) {
        if let Some(opacity) = self.card_opacity {
            prefs.theme.set_card_opacity(opacity);
        }
        if let Some(color) = self.theme_color {
            prefs.theme.theme_color = color;
        }
        if let Some(auto) = self.theme_color_auto {
            prefs.theme.theme_color_auto = auto;
        }
        if let Some(mode) = self.theme_mode {
            prefs.theme.theme_mode = mode;
        }
        if let Some(layout) = self.layout {
            prefs.layout = layout;
        }
    }

    /// Folds a later patch over this one, later fields winning
    pub fn merge(&mut self, later: PreferencesPatch) {
        self.card_opacity = later.card_opacity.or(self.card_opacity);
        self.theme_color = later.theme_color.or(self.theme_color);
        self.theme_color_auto = later.theme_color_auto.or(self.theme_color_auto);
        self.theme_mode = later.theme_mode.or(self.theme_mode);
        self.layout = later.layout.or(self.layout);
    }
}

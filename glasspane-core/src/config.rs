use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::appearance::DEFAULT_SAMPLE_SIZE;
use crate::navigation::highlight::DEFAULT_SETTLE_DELAY_MS;
use crate::navigation::{DisplayPolicy, SelectionPolicy};

/// Source that produced the dashboard configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// Top-level dashboard settings. Every section is optional in the file and
/// falls back to its defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub navigation: NavigationConfig,
    pub appearance: AppearanceConfig,
    pub highlight: HighlightConfig,
    pub storage: StorageConfig,
}

/// How clicks on the navigation rows move the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// What a category click does to the active sub-category
    pub selection_policy: SelectionPolicy,
    /// Whether an active sub-category filters the cards or only pins its own
    /// links to the front
    pub display_policy: DisplayPolicy,
}

/// Background sampling knobs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Per-request timeout (ms) for remote background images.
    pub timeout_ms: u64,
    /// Extra attempts after a failed download, with exponential backoff.
    pub max_retries: u32,
    /// Images are reduced to fit within this many pixels per side before
    /// their colors are averaged.
    pub sample_size: u32,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 2,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Delay (ms) the presentation layer waits for layout before measuring
    /// the active tab.
    pub settle_delay_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

/// Where the dashboard document lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// JSON document path. `None` keeps everything in memory.
    pub path: Option<PathBuf>,
    /// How long (ms) non-urgent preference writes are held back so bursts
    /// of changes hit the disk once.
    pub flush_delay_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            flush_delay_ms: 500,
        }
    }
}

/// Variable naming a config file; wins over everything else
pub const CONFIG_PATH_VAR: &str = "GLASSPANE_CONFIG_PATH";
/// Variable carrying the whole config as inline JSON
pub const CONFIG_JSON_VAR: &str = "GLASSPANE_CONFIG_JSON";
/// Looked up relative to the working directory, first match wins
const DEFAULT_FILES: [&str; 4] = [
    "glasspane.toml",
    "glasspane.json",
    "config/glasspane.toml",
    "config/glasspane.json",
];

/// Syntax of a configuration document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Guess from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" | "tml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl DashboardConfig {
    /// Resolve configuration from the process environment and working
    /// directory. See [`DashboardConfig::resolve`] for the precedence.
    pub fn load_from_env() -> anyhow::Result<(Self, ConfigSource)> {
        Self::resolve(|key| env::var(key).ok(), Path::new("."))
    }

    /// Pick the first configured source and parse it:
    /// an explicit file from [`CONFIG_PATH_VAR`], inline JSON from
    /// [`CONFIG_JSON_VAR`], a default file under `root`, then built-in
    /// defaults. Blank variables count as unset. A source that is present
    /// but broken is an error rather than a fall-through.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        root: &Path,
    ) -> anyhow::Result<(Self, ConfigSource)> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = var(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            return Ok((Self::load_from_file(&path)?, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = var(CONFIG_JSON_VAR) {
            let config = Self::parse(&raw, ConfigFormat::Json)
                .with_context(|| format!("invalid {CONFIG_JSON_VAR}"))?;
            return Ok((config, ConfigSource::EnvInline));
        }

        match DEFAULT_FILES
            .iter()
            .map(|name| root.join(name))
            .find(|path| path.is_file())
        {
            Some(path) => Ok((Self::load_from_file(&path)?, ConfigSource::File(path))),
            None => Ok((Self::default(), ConfigSource::Default)),
        }
    }

    /// Read a config file. Files without a known extension may hold either
    /// syntax.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let parsed = match ConfigFormat::from_path(path) {
            Some(format) => Self::parse(&contents, format),
            None => Self::parse(&contents, ConfigFormat::Toml).or_else(|toml_err| {
                Self::parse(&contents, ConfigFormat::Json).map_err(|json_err| {
                    anyhow!("neither TOML ({toml_err:#}) nor JSON ({json_err:#})")
                })
            }),
        };
        parsed.with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(contents: &str, format: ConfigFormat) -> anyhow::Result<Self> {
        match format {
            ConfigFormat::Toml => Ok(toml::from_str(contents)?),
            ConfigFormat::Json => Ok(serde_json::from_str(contents)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let raw = r#"
            [navigation]
            selection_policy = "clear_sub_category"

            [storage]
            path = "/var/lib/glasspane/dashboard.json"
        "#;
        let config = DashboardConfig::parse(raw, ConfigFormat::Toml).unwrap();

        assert_eq!(
            config.navigation.selection_policy,
            SelectionPolicy::ClearSubCategory
        );
        assert_eq!(config.navigation.display_policy, DisplayPolicy::Filtered);
        assert_eq!(
            config.storage.path,
            Some(PathBuf::from("/var/lib/glasspane/dashboard.json"))
        );
        assert_eq!(config.storage.flush_delay_ms, 500);
        assert_eq!(config.highlight.settle_delay_ms, 50);
        assert_eq!(config.appearance, AppearanceConfig::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let raw = r#"{"navigation": {"selection_policy": "random"}}"#;
        assert!(DashboardConfig::parse(raw, ConfigFormat::Json).is_err());
    }

    #[test]
    fn extensionless_file_accepts_either_syntax() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glasspanerc");

        fs::write(&path, r#"{"appearance": {"sample_size": 32}}"#).unwrap();
        let config = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(config.appearance.sample_size, 32);
        assert_eq!(config.appearance.max_retries, 2);

        fs::write(&path, "[highlight]\nsettle_delay_ms = 120\n").unwrap();
        let config = DashboardConfig::load_from_file(&path).unwrap();
        assert_eq!(config.highlight.settle_delay_ms, 120);

        fs::write(&path, "neither = [").unwrap();
        assert!(DashboardConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn nothing_configured_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, source) =
            DashboardConfig::resolve(env_of(&[]), dir.path()).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(source, ConfigSource::Default);
    }

    #[test]
    fn default_file_is_found_under_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        let path = dir.path().join("config/glasspane.toml");
        fs::write(&path, "[storage]\nflush_delay_ms = 5\n").unwrap();

        let (config, source) =
            DashboardConfig::resolve(env_of(&[]), dir.path()).unwrap();
        assert_eq!(config.storage.flush_delay_ms, 5);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn inline_json_beats_default_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("glasspane.toml"), "[storage]\nflush_delay_ms = 5\n")
            .unwrap();
        let env = env_of(&[(CONFIG_JSON_VAR, r#"{"storage": {"flush_delay_ms": 9}}"#)]);

        let (config, source) = DashboardConfig::resolve(env, dir.path()).unwrap();
        assert_eq!(config.storage.flush_delay_ms, 9);
        assert_eq!(source, ConfigSource::EnvInline);
    }

    #[test]
    fn explicit_path_beats_inline_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"highlight": {"settle_delay_ms": 75}}"#).unwrap();
        let env = env_of(&[
            (CONFIG_PATH_VAR, path.to_str().unwrap()),
            (CONFIG_JSON_VAR, r#"{"highlight": {"settle_delay_ms": 1}}"#),
        ]);

        let (config, source) = DashboardConfig::resolve(env, dir.path()).unwrap();
        assert_eq!(config.highlight.settle_delay_ms, 75);
        assert_eq!(source, ConfigSource::EnvPath(path));
    }

    #[test]
    fn blank_variables_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[(CONFIG_PATH_VAR, "  "), (CONFIG_JSON_VAR, "")]);
        let (_, source) = DashboardConfig::resolve(env, dir.path()).unwrap();
        assert_eq!(source, ConfigSource::Default);
    }

    #[test]
    fn broken_inline_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[(CONFIG_JSON_VAR, "{ nope")]);
        assert!(DashboardConfig::resolve(env, dir.path()).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let env = env_of(&[(CONFIG_PATH_VAR, missing.to_str().unwrap())]);
        assert!(DashboardConfig::resolve(env, dir.path()).is_err());
    }
}

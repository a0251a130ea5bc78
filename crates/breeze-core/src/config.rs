//! Configuration types for breeze.
//!
//! [`Config::load`] reads `~/.config/breeze/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[geocoding]
endpoint = "https://api.openweathermap.org/geo/1.0/direct"
limit    = 5
# api_key = "..."   # or set the OPENWEATHER_API_KEY environment variable

[search]
debounce_ms = 1000

[ui]
show_coordinates = true
theme            = "default"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/breeze/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[geocoding]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Maximum number of results requested per lookup.
    #[serde(default = "default_limit")]
    pub limit: u8,
    /// API credential for the geocoding service. The `OPENWEATHER_API_KEY`
    /// environment variable takes precedence; see [`GeocodingConfig::api_key`].
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    "https://api.openweathermap.org/geo/1.0/direct".to_string()
}
fn default_limit() -> u8 { 5 }

impl GeocodingConfig {
    /// Resolve the API key: environment variable first, then the config file.
    pub fn api_key(&self) -> Option<String> {
        std::env::var("OPENWEATHER_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            limit: default_limit(),
            api_key: None,
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Quiet window between the last keystroke and the lookup, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_debounce_ms() -> u64 { 1000 }

impl SearchConfig {
    pub fn debounce_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: default_debounce_ms() }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_coordinates")]
    pub show_coordinates: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_show_coordinates() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_coordinates: default_show_coordinates(),
            theme: default_theme(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/breeze/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("breeze")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

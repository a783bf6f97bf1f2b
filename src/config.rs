use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::offline::CacheConfig;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub registry: RegistrySettings,
    #[serde(default)]
    pub query: QuerySettings,
    #[serde(default)]
    pub offline: OfflineSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrySettings {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Directory for the file-backed store; `None` means the host injects
    /// its own substrate
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

fn default_storage_key() -> String {
    "pontosDeInteresseBH".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    #[serde(default = "default_radius_meters")]
    pub default_radius_meters: f64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_radius_meters: default_radius_meters(),
        }
    }
}

fn default_radius_meters() -> f64 {
    2000.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct OfflineSettings {
    #[serde(default = "default_cache_version")]
    pub version: String,
    /// Origin the relative manifest entries are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_manifest")]
    pub manifest: Vec<String>,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for OfflineSettings {
    fn default() -> Self {
        Self {
            version: default_cache_version(),
            base_url: default_base_url(),
            manifest: default_manifest(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

impl OfflineSettings {
    /// Build the worker configuration, resolving relative manifest entries
    /// against the base URL and passing absolute ones through untouched
    pub fn cache_config(&self) -> CacheConfig {
        let base = self.base_url.trim_end_matches('/');
        let manifest = self
            .manifest
            .iter()
            .map(|entry| {
                if entry.starts_with("http://") || entry.starts_with("https://") {
                    entry.clone()
                } else {
                    format!("{}/{}", base, entry.trim_start_matches('/'))
                }
            })
            .collect();

        CacheConfig {
            version: self.version.clone(),
            manifest,
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

fn default_cache_version() -> String {
    "pontos-bh-v1".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_manifest() -> Vec<String> {
    [
        "/",
        "/index.html",
        "/style.css",
        "/script.js",
        "/icons/icon-192.png",
        "/icons/icon-512.png",
        "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
        "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PONTOS_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local config file for development overrides
            .add_source(File::with_name("config/local").required(false))
            // e.g. PONTOS__QUERY__DEFAULT_RADIUS_METERS -> query.default_radius_meters
            .add_source(
                Environment::with_prefix("PONTOS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PONTOS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

// ============================
// crates/backend-lib/src/config.rs
// ============================
//! Configuration management.
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix, e.g. `MERGINGTON_BIND_ADDR`.
pub const ENV_PREFIX: &str = "MERGINGTON_";

/// Config file read by [`Settings::load`].
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Server bind address
    pub bind_addr: SocketAddr,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// JSON catalog replacing the built-in activity list
    pub catalog_path: Option<PathBuf>,
    /// Cross-origin settings
    pub cors: CorsSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Cross-origin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins; `"*"` allows any
    pub allowed_origins: Vec<String>,
}

/// Reasons a loaded configuration is refused
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),

    #[error("static_dir must not be empty")]
    EmptyStaticDir,

    #[error("invalid CORS origin {0:?}")]
    InvalidOrigin(String),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            static_dir: PathBuf::from("static"),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            catalog_path: None,
            cors: CorsSettings::default(),
        }
    }
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load settings from a specific TOML file, then the environment.
    ///
    /// A missing file is not an error: defaults and environment still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings: Settings = Self::figment(path)
            .extract()
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Provider chain: defaults, then file, then environment variables.
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        if self.static_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStaticDir);
        }
        for origin in &self.cors.allowed_origins {
            if origin != "*" && HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::InvalidOrigin(origin.clone()));
            }
        }
        Ok(())
    }
}

//! # Application Configuration
//!
//! Loads the server configuration from an optional `config.yml` next to the
//! crate manifest, then applies environment-variable overrides (`PORT`,
//! `TESSERACT_CMD`, `OCR_TIMEOUT_SECS`). Every field has a default, so the
//! server starts with no configuration at all.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Preferred location of the Tesseract executable, checked before the
    /// `PATH` search. Loaded from `TESSERACT_CMD` env var.
    #[serde(default = "default_tesseract_cmd")]
    pub tesseract_cmd: String,
    /// Upper bound in seconds on any single Tesseract invocation. Loaded from
    /// `OCR_TIMEOUT_SECS` env var.
    #[serde(default = "default_ocr_timeout_secs")]
    pub ocr_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            tesseract_cmd: default_tesseract_cmd(),
            ocr_timeout_secs: default_ocr_timeout_secs(),
        }
    }
}

fn default_port() -> u16 {
    9090
}

/// Lambda-layer style installs put the binary under `/opt/bin`.
fn default_tesseract_cmd() -> String {
    "/opt/bin/tesseract".to_string()
}

fn default_ocr_timeout_secs() -> u64 {
    5
}

/// Loads the application configuration from `config.yml` (if present) and
/// environment variables.
pub fn get_config() -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let config_path = format!("{base_path}/config.yml");

    let mut builder = ConfigBuilder::builder();
    if std::path::Path::new(&config_path).exists() {
        builder = builder.add_source(File::new(&config_path, FileFormat::Yaml));
    }

    let settings = builder.add_source(Environment::default()).build()?;
    Ok(settings.try_deserialize()?)
}

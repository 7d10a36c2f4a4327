//! YAML configuration file support.
//!
//! One file configures both the normalizer and the batch runner. Every
//! section is optional; missing keys fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! normalize:
//!   default_month: 7
//!   min_tenure_months: 7.0
//!   excluded_markers: ["intern", "stagiaire", "volunteer", "bénévole"]
//!   locale_languages:
//!     - countries: ["FR"]
//!       language: "Français"
//!       aliases: ["French"]
//!     - countries: ["US", "EN"]
//!       language: "English"
//!   present_label: "Present"
//!   month_year_format: "%b %Y"
//!   list_separator: ", "
//!   profile_url_base: "https://www.linkedin.com/in/"
//!
//! batch:
//!   parallel: true
//!   on_record_error: flag   # or `fail`
//! ```

use std::fs;
use std::path::Path;

use normalize::{ConfigError, NormalizeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::batch::BatchConfig;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(#[from] ConfigError),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub normalize: NormalizeConfig,

    #[serde(default)]
    pub batch: BatchConfig,
}

impl AppConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;
        self.normalize.validate()?;
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            normalize: NormalizeConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Load and validate a YAML configuration file.
pub fn load_config_from_file<P: AsRef<Path>>(path: P) -> Result<AppConfig, ConfigLoadError> {
    let content = fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parse and validate YAML configuration from a string.
pub fn load_config_from_str(yaml: &str) -> Result<AppConfig, ConfigLoadError> {
    let config: AppConfig = serde_yaml::from_str(yaml)?;
    config.validate()?;
    Ok(config)
}

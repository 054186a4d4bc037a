// Configuration module

mod models;

pub use models::*;

use crate::error::{Result, VisionError};
use config::{Config, Environment, File};
use std::path::PathBuf;

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest)
    /// 2. Config file
    /// 3. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the binary.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_config_path())
    }

    /// Same as [`AppConfig::load`] with an explicit config file path.
    pub fn load_from(path: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::with_name(path).required(false))
            // Override with environment variables, e.g. VISION_ASK_SERVER__PORT
            .add_source(
                Environment::with_prefix("VISION_ASK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e| VisionError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| VisionError::Config(e.to_string()))
    }

    fn default_config_path() -> String {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vision-ask")
            .join("config.toml")
            .to_string_lossy()
            .to_string()
    }
}

//! MediTrack core library
//!
//! Vital-sign status evaluation and the alerting flow built around it.

pub mod api;
pub mod core;
pub mod db;
pub mod error;
pub mod models;
pub mod notifications;

/// Application configuration
pub mod config {
    use std::path::Path;

    use config::{Environment, File};
    use serde::Deserialize;

    use crate::core::ThresholdTable;
    use crate::error::Result;

    /// Directory `load_config` reads, relative to the working directory.
    pub const CONFIG_DIR: &str = "config";

    #[derive(Debug, Clone, Deserialize)]
    pub struct Config {
        pub server: ServerConfig,
        #[serde(default)]
        pub log: LogConfig,
        #[serde(default)]
        pub evaluator: EvaluatorConfig,
        #[serde(default)]
        pub thresholds: ThresholdTable,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        pub host: String,
        pub port: u16,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct LogConfig {
        /// Emit JSON lines instead of human-readable output.
        #[serde(default)]
        pub json: bool,
    }

    #[derive(Debug, Clone, Default, Deserialize)]
    pub struct EvaluatorConfig {
        /// Classify an empty reading as normal instead of rejecting it.
        #[serde(default)]
        pub missing_as_normal: bool,
    }

    /// Load configuration from `config/`, selecting the environment file with
    /// `MEDITRACK_ENV`.
    pub fn load_config() -> Result<Config> {
        let env = std::env::var("MEDITRACK_ENV").unwrap_or_else(|_| "development".into());
        load_from(CONFIG_DIR, &env)
    }

    /// Like `load_config`, but `None` when there is no `config/` directory
    /// in the working directory.
    pub fn load_config_if_present() -> Result<Option<Config>> {
        if !Path::new(CONFIG_DIR).is_dir() {
            return Ok(None);
        }
        load_config().map(Some)
    }

    pub fn load_from(dir: impl AsRef<Path>, env: &str) -> Result<Config> {
        let dir = dir.as_ref();

        let settings = config::Config::builder()
            // Start with default settings
            .add_source(File::from(dir.join("default")))
            // Override with environment-specific settings
            .add_source(File::from(dir.join(env)).required(false))
            // Override with environment variables, e.g. MEDITRACK__SERVER__PORT
            .add_source(
                Environment::with_prefix("MEDITRACK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.thresholds.check()?;
        Ok(config)
    }
}

//! # configs
//!
//! Typed runtime settings for embedders of the core. Values come from the
//! environment (prefix `FRITTER`, `__` as the section separator), with
//! `.env` files honored for local development.
//!
//! ```text
//! FRITTER__SCORER__STRATEGY=constant
//! FRITTER__SCORER__CONSTANT=0.75
//! FRITTER__LOG__FILTER=services=debug
//! ```

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Which relevance scoring strategy the embedder should wire in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerStrategy {
    /// Uniform random draw (the reference policy)
    Uniform,
    /// Fixed rating, for reproducible deployments and tests
    Constant,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScorerSettings {
    pub strategy: ScorerStrategy,
    /// Rating used when `strategy = constant`
    pub constant: f64,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            strategy: ScorerStrategy::Uniform,
            constant: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing-subscriber` EnvFilter directive
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub scorer: ScorerSettings,
    pub log: LogSettings,
}

impl Settings {
    /// Loads settings from the environment, falling back to defaults for
    /// anything unset.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("FRITTER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

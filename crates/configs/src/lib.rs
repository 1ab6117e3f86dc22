//! # configs
//!
//! Runtime settings for the Uniboard binaries, read from the environment
//! (with `.env` support) under the `UNIBOARD_` prefix.

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// SQLite database URL, e.g. `sqlite:uniboard.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_database_url() -> String {
    "sqlite:uniboard.db".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    /// Loads settings from the process environment. A missing variable
    /// falls back to its default; a malformed one is an error.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let settings: Settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("UNIBOARD"))
            .build()?
            .try_deserialize()?;
        debug!(database_url = %settings.database_url, "settings loaded");
        Ok(settings)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let settings = Settings::default();
        assert_eq!(settings.database_url, "sqlite:uniboard.db");
        assert_eq!(settings.log_filter, "info");
    }
}

//! Configuration model.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Matching policy.
    pub matching: MatchingConfig,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Matching policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum score for a TMDB candidate to replace the extracted title.
    pub accept_threshold: f64,
    /// Score at which the candidate scan stops early.
    pub fast_exit_threshold: f64,
    /// Skip files instead of renaming them when no candidate is confident.
    pub require_confident_match: bool,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            language: "en-US".to_string(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 80.0,
            fast_exit_threshold: 98.0,
            require_confident_match: false,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reelname")
}

/// Default location of `config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs_config_path().join("config.toml")
}

/// Parse a config file.
pub fn load_config_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| crate::Error::InvalidConfig {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Load configuration.
///
/// An explicit path must exist and parse. The default location is optional;
/// if it is broken the defaults are used and a warning is logged.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let config_path = default_config_path();
    if config_path.exists() {
        match load_config_from(&config_path) {
            Ok(config) => return Ok(config),
            Err(e) => tracing::warn!("Ignoring config file: {}", e),
        }
    }

    Ok(Config::default())
}

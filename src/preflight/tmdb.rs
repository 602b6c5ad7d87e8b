//! TMDB API preflight check.

use super::CheckResult;
use crate::models::config::TmdbConfig;
use crate::services::tmdb::TmdbClient;

pub(super) const CHECK_NAME: &str = "TMDB API";

/// Check that the configured key is present and accepted.
pub async fn check(settings: &TmdbConfig) -> CheckResult {
    let client = match TmdbClient::from_settings(settings) {
        Ok(client) => client,
        Err(crate::Error::TmdbApiKeyMissing) => {
            return CheckResult::failed(
                CHECK_NAME,
                "API key not configured",
                "Set TMDB_API_KEY environment variable, or run with --offline",
            );
        }
        Err(e) => {
            return CheckResult::failed(CHECK_NAME, format!("client setup failed: {}", e), "Run with --offline");
        }
    };

    match client.verify_api_key().await {
        Ok(true) => CheckResult::passed(CHECK_NAME, "connected"),
        Ok(false) => CheckResult::failed(
            CHECK_NAME,
            "invalid API key",
            "Check TMDB_API_KEY or [tmdb].api_key in config.toml",
        ),
        Err(_) => CheckResult::failed(
            CHECK_NAME,
            "connection failed",
            "Check your network connection, or run with --offline",
        ),
    }
}

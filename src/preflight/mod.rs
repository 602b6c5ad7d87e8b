//! Startup checks for the metadata source.
//!
//! Only run when TMDB will actually be queried; `--offline` skips them.

mod tmdb;

use crate::models::config::Config;
use colored::Colorize;
use std::fmt;

/// Outcome of one check.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    Passed(String),
    Failed { message: String, hint: String },
}

/// A named check and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub name: &'static str,
    pub status: CheckStatus,
}

impl CheckResult {
    pub fn passed(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Passed(message.into()),
        }
    }

    pub fn failed(name: &'static str, message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name,
            status: CheckStatus::Failed {
                message: message.into(),
                hint: hint.into(),
            },
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self.status, CheckStatus::Passed(_))
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            CheckStatus::Passed(message) => {
                write!(f, "{} {}: {}", "[OK]".green(), self.name.bold(), message)
            }
            CheckStatus::Failed { message, hint } => write!(
                f,
                "{} {}: {}\n  {} {}",
                "[FAIL]".red(),
                self.name.bold(),
                message,
                "->".yellow(),
                hint
            ),
        }
    }
}

/// Run every check that applies to `config`.
pub async fn run_preflight_checks(config: &Config) -> Vec<CheckResult> {
    vec![tmdb::check(&config.tmdb).await]
}

/// Print one line per check, plus a hint line for failures.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        println!("{}", result);
    }
}

pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(CheckResult::is_passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_passed() {
        let ok = vec![CheckResult::passed(tmdb::CHECK_NAME, "connected")];
        assert!(all_passed(&ok));

        let failed = vec![
            CheckResult::passed(tmdb::CHECK_NAME, "connected"),
            CheckResult::failed("Other", "down", "start it"),
        ];
        assert!(!all_passed(&failed));
    }

    #[test]
    fn test_failure_display_includes_hint() {
        colored::control::set_override(false);
        let result = CheckResult::failed(tmdb::CHECK_NAME, "invalid API key", "check TMDB_API_KEY");
        assert_eq!(
            result.to_string(),
            "[FAIL] TMDB API: invalid API key\n  -> check TMDB_API_KEY"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let mut config = Config::default();
        config.tmdb.api_key = None;

        let results = run_preflight_checks(&config).await;
        assert!(!all_passed(&results));
        assert!(matches!(
            &results[0].status,
            CheckStatus::Failed { message, .. } if message == "API key not configured"
        ));
    }
}

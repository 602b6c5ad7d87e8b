//! External metadata sources.
//!
//! The matcher only needs a free-text title search plus an on-demand detail
//! fetch for results whose summary lacks a year. Anything providing those two
//! operations can back it.

pub mod tmdb;

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One search result from a metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Source-specific identifier, used for detail lookups.
    pub id: String,
    pub title: String,
    /// Four-digit release year, if the summary carried one.
    pub year: Option<String>,
}

/// Free-text title search capability.
#[async_trait]
pub trait TitleSearch: Send + Sync {
    fn name(&self) -> &'static str;

    /// Search for movie-like records, best matches first.
    async fn search(&self, query: &str) -> Result<Vec<MatchCandidate>>;

    /// Fetch the full record for a candidate, typically to learn its year.
    async fn fetch_detail(&self, candidate: &MatchCandidate) -> Result<MatchCandidate>;
}

/// Source used with `--offline`: never returns candidates, so every lookup
/// falls back to the extracted title and year.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSource;

#[async_trait]
impl TitleSearch for OfflineSource {
    fn name(&self) -> &'static str {
        "offline"
    }

    async fn search(&self, _query: &str) -> Result<Vec<MatchCandidate>> {
        Ok(Vec::new())
    }

    async fn fetch_detail(&self, candidate: &MatchCandidate) -> Result<MatchCandidate> {
        Ok(candidate.clone())
    }
}

/// First four characters of a `YYYY-MM-DD` date, if they are digits.
pub fn year_from_date(date: Option<&str>) -> Option<String> {
    let year = date?.trim().get(..4)?;
    if year.chars().all(|c| c.is_ascii_digit()) {
        Some(year.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_from_date() {
        assert_eq!(year_from_date(Some("2010-07-15")), Some("2010".to_string()));
        assert_eq!(year_from_date(Some("")), None);
        assert_eq!(year_from_date(Some("n/a")), None);
        assert_eq!(year_from_date(None), None);
    }

    #[tokio::test]
    async fn test_offline_source_returns_nothing() {
        let source = OfflineSource;
        assert!(source.search("Inception 2010").await.unwrap().is_empty());
    }
}

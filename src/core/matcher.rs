//! Reconciles an extracted title/year against a metadata source.
//!
//! Candidates are scored with [`match_score`]. A candidate only counts if its
//! year equals the extracted year; the year is fetched from the source only
//! when a candidate would otherwise become the new best. The scan stops once
//! a candidate reaches the fast-exit threshold, and the best candidate is
//! accepted only at or above the acceptance threshold. Otherwise the
//! extracted pair is returned unchanged.

use crate::core::similarity::match_score;
use crate::models::config::MatchingConfig;
use crate::services::{MatchCandidate, TitleSearch};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// The (title, year) pair handed to the rebuilder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedTitleYear {
    pub title: String,
    pub year: String,
}

impl fmt::Display for ConfirmedTitleYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}

/// Why the extracted pair was passed through.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    /// Nothing scored high enough. `None` when no candidate with the right
    /// year was found at all.
    LowConfidence { best_score: Option<f64> },
    /// The first search failed outright.
    SourceUnavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchDecision {
    /// A source record was accepted with this score.
    Canonical { score: f64 },
    Fallback(FallbackReason),
}

/// Outcome of [`Matcher::resolve`]. `confirmed` is always usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub confirmed: ConfirmedTitleYear,
    pub decision: MatchDecision,
}

impl Resolution {
    pub fn is_canonical(&self) -> bool {
        matches!(self.decision, MatchDecision::Canonical { .. })
    }
}

/// Score thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    pub accept_threshold: f64,
    pub fast_exit_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            accept_threshold: 80.0,
            fast_exit_threshold: 98.0,
        }
    }
}

impl From<&MatchingConfig> for MatcherConfig {
    fn from(config: &MatchingConfig) -> Self {
        Self {
            accept_threshold: config.accept_threshold,
            fast_exit_threshold: config.fast_exit_threshold,
        }
    }
}

/// Best candidate seen so far.
#[derive(Debug)]
struct Best {
    candidate: MatchCandidate,
    year: String,
    score: f64,
}

/// Title matcher backed by a [`TitleSearch`] source.
pub struct Matcher {
    source: Arc<dyn TitleSearch>,
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with default thresholds.
    pub fn new(source: Arc<dyn TitleSearch>) -> Self {
        Self {
            source,
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom thresholds.
    pub fn with_config(source: Arc<dyn TitleSearch>, config: MatcherConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve the canonical title and year. Never fails: any problem leads
    /// to the extracted pair coming back with a [`FallbackReason`].
    pub async fn resolve(&self, title: &str, year: &str) -> Resolution {
        let queries = [format!("{} {}", title, year), title.to_string()];
        let mut seen: HashSet<String> = HashSet::new();
        let mut best: Option<Best> = None;

        for (i, query) in queries.iter().enumerate() {
            let results = match self.source.search(query).await {
                Ok(results) => results,
                Err(e) if i == 0 => {
                    tracing::warn!("{} search failed for '{}': {}", self.source.name(), query, e);
                    return self.fallback(title, year, FallbackReason::SourceUnavailable(e.to_string()));
                }
                Err(e) => {
                    tracing::warn!("{} search failed for '{}': {}", self.source.name(), query, e);
                    break;
                }
            };

            let fast_exit = self.scan(title, year, results, &mut seen, &mut best).await;
            if fast_exit || self.is_acceptable(&best) {
                break;
            }
        }

        match best {
            Some(best) if best.score >= self.config.accept_threshold => {
                tracing::info!(
                    "Matched '{}' -> '{}' ({}) score {:.1}",
                    title,
                    best.candidate.title,
                    best.year,
                    best.score
                );
                Resolution {
                    confirmed: ConfirmedTitleYear {
                        title: best.candidate.title,
                        year: best.year,
                    },
                    decision: MatchDecision::Canonical { score: best.score },
                }
            }
            best => {
                let best_score = best.map(|b| b.score);
                tracing::info!(
                    "No confident match for '{} ({})', best score {:?}",
                    title,
                    year,
                    best_score
                );
                self.fallback(title, year, FallbackReason::LowConfidence { best_score })
            }
        }
    }

    fn is_acceptable(&self, best: &Option<Best>) -> bool {
        best.as_ref()
            .is_some_and(|b| b.score >= self.config.accept_threshold)
    }

    /// Score one result list. Returns true when the fast-exit threshold was hit.
    async fn scan(
        &self,
        title: &str,
        year: &str,
        results: Vec<MatchCandidate>,
        seen: &mut HashSet<String>,
        best: &mut Option<Best>,
    ) -> bool {
        for candidate in results {
            if candidate.title.trim().is_empty() || !seen.insert(candidate.id.clone()) {
                continue;
            }

            let score = match_score(title, &candidate.title);
            let best_score = best.as_ref().map_or(0.0, |b| b.score);
            tracing::debug!("Candidate '{}' ({:?}) score {:.1}", candidate.title, candidate.year, score);
            if score <= best_score {
                continue;
            }

            let Some(candidate_year) = self.candidate_year(&candidate).await else {
                continue;
            };
            if candidate_year != year {
                tracing::debug!("Discarding '{}': year {} != {}", candidate.title, candidate_year, year);
                continue;
            }

            *best = Some(Best {
                candidate,
                year: candidate_year,
                score,
            });
            if score >= self.config.fast_exit_threshold {
                return true;
            }
        }
        false
    }

    /// Year from the summary, or from a detail fetch if the summary has none.
    async fn candidate_year(&self, candidate: &MatchCandidate) -> Option<String> {
        if let Some(year) = &candidate.year {
            return Some(year.clone());
        }

        match self.source.fetch_detail(candidate).await {
            Ok(detail) => detail.year,
            Err(e) => {
                tracing::warn!("Detail fetch failed for '{}': {}", candidate.title, e);
                None
            }
        }
    }

    fn fallback(&self, title: &str, year: &str, reason: FallbackReason) -> Resolution {
        Resolution {
            confirmed: ConfirmedTitleYear {
                title: title.to_string(),
                year: year.to_string(),
            },
            decision: MatchDecision::Fallback(reason),
        }
    }
}

//! Deterministic in-memory metadata source shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use reelname::services::{MatchCandidate, TitleSearch};
use reelname::{Error, Result};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub fn candidate(id: &str, title: &str, year: Option<&str>) -> MatchCandidate {
    MatchCandidate {
        id: id.to_string(),
        title: title.to_string(),
        year: year.map(str::to_string),
    }
}

#[derive(Default)]
pub struct StubSource {
    /// Results for any query without a specific entry.
    default_results: Vec<MatchCandidate>,
    by_query: HashMap<String, Vec<MatchCandidate>>,
    /// Full records, keyed by id.
    details: HashMap<String, MatchCandidate>,
    /// Queries that fail with a transport-style error.
    failing_queries: Vec<String>,
    fail_all: bool,
    queries: Mutex<Vec<String>>,
    detail_calls: AtomicUsize,
}

impl StubSource {
    pub fn new(results: Vec<MatchCandidate>) -> Self {
        Self {
            default_results: results,
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn on_query(mut self, query: &str, results: Vec<MatchCandidate>) -> Self {
        self.by_query.insert(query.to_string(), results);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing_queries.push(query.to_string());
        self
    }

    pub fn with_detail(mut self, detail: MatchCandidate) -> Self {
        self.details.insert(detail.id.clone(), detail);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TitleSearch for StubSource {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn search(&self, query: &str) -> Result<Vec<MatchCandidate>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_all || self.failing_queries.iter().any(|q| q == query) {
            return Err(Error::TmdbSearchError("connection refused".to_string()));
        }
        Ok(self
            .by_query
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.clone()))
    }

    async fn fetch_detail(&self, candidate: &MatchCandidate) -> Result<MatchCandidate> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(&candidate.id)
            .cloned()
            .ok_or_else(|| Error::MovieNotFound(candidate.id.clone()))
    }
}

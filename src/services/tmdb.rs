//! TMDB API client.

use super::{year_from_date, MatchCandidate, TitleSearch};
use crate::models::config;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
    pub base_url: String,
}

impl TmdbConfig {
    /// Build a client config from an API key.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: language.into(),
            use_bearer,
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Create config from the application settings.
    pub fn from_settings(settings: &config::TmdbConfig) -> Result<Self> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::TmdbApiKeyMissing)?;

        Ok(Self::new(api_key, settings.language.clone()))
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// Movie search result.
#[derive(Debug, Deserialize)]
pub struct MovieSearchResult {
    pub results: Vec<MovieSearchItem>,
}

/// Movie search item.
#[derive(Debug, Deserialize)]
pub struct MovieSearchItem {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
}

/// Movie details.
#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
}

/// TMDB error payload (`status_message` is the useful part).
#[derive(Debug, Deserialize)]
struct StatusMessage {
    status_message: Option<String>,
}

impl From<MovieSearchItem> for MatchCandidate {
    fn from(item: MovieSearchItem) -> Self {
        Self {
            id: item.id.to_string(),
            year: year_from_date(item.release_date.as_deref()),
            title: item.title,
        }
    }
}

impl From<MovieDetails> for MatchCandidate {
    fn from(details: MovieDetails) -> Self {
        Self {
            id: details.id.to_string(),
            year: year_from_date(details.release_date.as_deref()),
            title: details.title,
        }
    }
}

impl TmdbClient {
    /// Create a new TMDB client. Requests time out after 15 seconds.
    pub fn new(config: TmdbConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a new TMDB client from the application settings.
    pub fn from_settings(settings: &config::TmdbConfig) -> Result<Self> {
        Self::new(TmdbConfig::from_settings(settings)?)
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        if self.config.use_bearer {
            format!(
                "{}/{}?language={}{}",
                self.config.base_url, path, self.config.language, extra_params
            )
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                self.config.base_url,
                path,
                self.config.api_key,
                self.config.language,
                extra_params
            )
        }
    }

    /// Send a GET and decode the JSON body, turning TMDB error payloads into
    /// `TmdbSearchError`.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let resp = self.build_request(url).send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(crate::Error::TmdbApiKeyInvalid);
        }
        if !status.is_success() {
            let message = serde_json::from_str::<StatusMessage>(&body)
                .ok()
                .and_then(|m| m.status_message)
                .unwrap_or_else(|| status.to_string());
            return Err(crate::Error::TmdbSearchError(message));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", self.config.base_url)
        } else {
            format!(
                "{}/authentication?api_key={}",
                self.config.base_url, self.config.api_key
            )
        };

        let resp = self.build_request(&url).send().await?;
        Ok(resp.status().is_success())
    }

    /// Search for movies.
    pub async fn search_movie(&self, query: &str) -> Result<Vec<MovieSearchItem>> {
        let url = self.build_url("search/movie", &format!("&query={}", urlencoding::encode(query)));

        let resp: MovieSearchResult = self.get_json(&url).await?;
        Ok(resp.results)
    }

    /// Get movie details.
    pub async fn get_movie_details(&self, movie_id: u64) -> Result<MovieDetails> {
        let url = self.build_url(&format!("movie/{}", movie_id), "");
        self.get_json(&url).await
    }
}

#[async_trait]
impl TitleSearch for TmdbClient {
    fn name(&self) -> &'static str {
        "TMDB"
    }

    async fn search(&self, query: &str) -> Result<Vec<MatchCandidate>> {
        let results = self.search_movie(query).await?;
        tracing::debug!("TMDB search '{}' returned {} results", query, results.len());
        Ok(results.into_iter().map(MatchCandidate::from).collect())
    }

    async fn fetch_detail(&self, candidate: &MatchCandidate) -> Result<MatchCandidate> {
        let movie_id: u64 = candidate
            .id
            .parse()
            .map_err(|_| crate::Error::MovieNotFound(candidate.id.clone()))?;
        let details = self.get_movie_details(movie_id).await?;
        Ok(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_detection() {
        assert!(TmdbConfig::new("eyJhbGciOiJIUzI1NiJ9.x.y", "en-US").use_bearer);
        assert!(!TmdbConfig::new("0123456789abcdef", "en-US").use_bearer);
    }

    #[test]
    fn test_missing_api_key() {
        let settings = config::TmdbConfig {
            api_key: Some("  ".to_string()),
            language: "en-US".to_string(),
        };
        assert!(matches!(
            TmdbConfig::from_settings(&settings),
            Err(crate::Error::TmdbApiKeyMissing)
        ));
    }

    #[test]
    fn test_build_url_v3() {
        let client = TmdbClient::new(TmdbConfig::new("key", "en-US")).unwrap();
        assert_eq!(
            client.build_url("search/movie", "&query=Inception"),
            "https://api.themoviedb.org/3/search/movie?api_key=key&language=en-US&query=Inception"
        );
    }

    #[test]
    fn test_search_item_into_candidate() {
        let json = r#"{"results":[
            {"id": 27205, "title": "Inception", "original_title": "Inception", "release_date": "2010-07-15"},
            {"id": 1, "title": "Inception: The Cobol Job", "release_date": ""}
        ]}"#;
        let parsed: MovieSearchResult = serde_json::from_str(json).unwrap();
        let candidates: Vec<MatchCandidate> =
            parsed.results.into_iter().map(MatchCandidate::from).collect();

        assert_eq!(candidates[0].id, "27205");
        assert_eq!(candidates[0].year.as_deref(), Some("2010"));
        assert_eq!(candidates[1].year, None);
    }

    #[test]
    fn test_details_into_candidate() {
        let json = r#"{"id": 27205, "imdb_id": "tt1375666", "title": "Inception",
            "original_title": "Inception", "release_date": "2010-07-15", "runtime": 148}"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        let candidate = MatchCandidate::from(details);

        assert_eq!(candidate.id, "27205");
        assert_eq!(candidate.title, "Inception");
        assert_eq!(candidate.year.as_deref(), Some("2010"));
    }
}

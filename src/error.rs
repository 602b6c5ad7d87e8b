//! Error types for reelname.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for reelname.
#[derive(Error, Debug)]
pub enum Error {
    // Preflight errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY or [tmdb].api_key in config.toml")]
    TmdbApiKeyMissing,

    #[error("TMDB API key invalid")]
    TmdbApiKeyInvalid,

    // File system errors
    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Source file no longer exists: {0}")]
    SourceVanished(String),

    // TMDB errors
    #[error("TMDB search failed: {0}")]
    TmdbSearchError(String),

    #[error("Movie not found on TMDB: {0}")]
    MovieNotFound(String),

    // Config errors
    #[error("Invalid config file {path}: {message}")]
    InvalidConfig { path: String, message: String },

    // Watcher errors
    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

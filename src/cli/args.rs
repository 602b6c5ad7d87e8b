//! Command line argument definitions.

use crate::models::config::Config;
use clap::Parser;
use std::path::PathBuf;

/// reelname - Rename movie files to "Title (Year)" using TMDB
#[derive(Parser, Debug)]
#[command(name = "reelname")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:\n  reelname /path/to/media\n  reelname -w /path/to/media")]
pub struct Cli {
    /// Directory containing the media files
    #[arg(value_name = "DIRECTORY", default_value = ".")]
    pub directory: PathBuf,

    /// Continuously watch the directory instead of a one-time run
    #[arg(short, long)]
    pub watch: bool,

    /// Show what would be renamed without renaming
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Do not query TMDB; normalise names from the filename alone
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long)]
    pub skip_preflight: bool,

    /// Path to config.toml (default: <config dir>/reelname/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Minimum similarity score (0-100) to accept a TMDB title
    #[arg(long, value_name = "SCORE", value_parser = parse_score)]
    pub min_score: Option<f64>,

    /// Similarity score (0-100) at which the search stops early
    #[arg(long, value_name = "SCORE", value_parser = parse_score)]
    pub fast_exit_score: Option<f64>,

    /// Leave files alone unless TMDB confirms the title
    #[arg(long)]
    pub require_match: bool,

    /// TMDB response language (e.g. en-US)
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(score) = self.min_score {
            config.matching.accept_threshold = score;
        }
        if let Some(score) = self.fast_exit_score {
            config.matching.fast_exit_threshold = score;
        }
        if self.require_match {
            config.matching.require_confident_match = true;
        }
        if let Some(ref language) = self.language {
            config.tmdb.language = language.clone();
        }
    }
}

fn parse_score(s: &str) -> Result<f64, String> {
    let score: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=100.0).contains(&score) {
        Ok(score)
    } else {
        Err(format!("{} is not between 0 and 100", score))
    }
}

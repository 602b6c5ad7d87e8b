//! reelname library
//!
//! Cleans up movie filenames: extracts the title and year buried in a
//! tracker-style name, confirms them against TMDB and rebuilds the name as
//! `Title (Year)` followed by the untouched remainder.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;
pub mod utils;

pub use error::{Error, Result};

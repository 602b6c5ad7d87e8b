//! Filename reconstruction.
//!
//! Builds `{title} ({year}){suffix}` where the suffix is everything in the
//! original name after the first occurrence of the year, with the separator
//! right after the year normalised to a single space.

use regex::Regex;
use std::sync::LazyLock;

/// A bare file extension such as `.mkv`.
static EXTENSION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.[A-Za-z0-9]{1,5}$").expect("extension regex"));

/// Characters invalid in filenames on Windows (and awkward everywhere else).
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const CLOSING_BRACKETS: &[char] = &[')', ']', '}', '>'];

/// Rebuild `original` around the confirmed title and year.
pub fn rebuild(original: &str, title: &str, year: &str) -> String {
    let file_name = match original.find(year) {
        Some(idx) => {
            let suffix = normalize_suffix(&original[idx + year.len()..]);
            format!("{} ({}){}", title, year, suffix)
        }
        None => {
            tracing::warn!("Year {} not found in '{}', dropping suffix", year, original);
            format!("{} ({})", title, year)
        }
    };

    sanitize_filename(&file_name)
}

/// Normalise the text following the year.
///
/// Closing brackets are dropped, a bare extension is kept as is, and any
/// other leading separator run becomes exactly one space. Opening brackets
/// start the next tag and are kept.
pub fn normalize_suffix(suffix: &str) -> String {
    let rest = suffix.trim_start_matches(CLOSING_BRACKETS);

    if rest.is_empty() || EXTENSION_ONLY.is_match(rest) {
        return rest.to_string();
    }

    if rest.starts_with(char::is_whitespace) {
        let trimmed = rest.trim_start();
        if trimmed.is_empty() {
            return String::new();
        }
        if EXTENSION_ONLY.is_match(trimmed) {
            return trimmed.to_string();
        }
        return format!(" {}", trimmed);
    }

    // Whitespace inside the run is part of the run.
    let trimmed = rest.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'));
    if trimmed.is_empty() {
        return String::new();
    }
    format!(" {}", trimmed)
}

/// Remove characters invalid in filenames and trim surrounding whitespace.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .collect::<String>()
        .trim()
        .to_string()
}

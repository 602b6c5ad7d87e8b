//! Title/year extraction from raw filenames.
//!
//! Release names come in a handful of shapes. The extractor tries them in a
//! fixed order and gives up rather than guessing:
//!
//! 1. Strip a leading tracker tag (`www.1TamilMV.fi - `, `yts.mx - `)
//! 2. Look for a bracketed year: `Title (2015)`, `Title[2008]`, `Title{2014}`, `Title<2010>`
//! 3. Look for a dot-delimited year: `Title.2010.`
//! 4. Look for a space-delimited year: `Title 1999 ` or `Title 1999`
//!
//! The first shape that matches decides the result.

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Tracker/uploader prefix: `www.` + domain, or a bare `name.tld`, followed
/// by a dash or en-dash separator.
static TRACKER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:www\.[a-z0-9.-]+|[a-z0-9-]+\.[a-z]{2,})\s*[-–]\s*")
        .expect("tracker prefix regex")
});

/// Year wrapped in a matching bracket pair. The regex crate has no
/// backreferences, so each pair gets its own capture group.
static BRACKETED_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<title>.*?)\s*(?:\((?P<paren>\d{4})\)|\[(?P<square>\d{4})\]|\{(?P<curly>\d{4})\}|<(?P<angle>\d{4})>)",
    )
    .expect("bracketed year regex")
});

static DOT_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>.*?)\.(?P<year>\d{4})\.").expect("dot year regex")
});

static SPACE_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>.*?) +(?P<year>\d{4})(?: |$)").expect("space year regex")
});

/// Runs of dots/underscores used as word separators in release names.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[._]+").expect("separator regex"));

/// Which filename shape produced a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearShape {
    /// `Title (2015)` and the other bracket pairs.
    Bracketed,
    /// `Title.2010.`
    Dotted,
    /// `Title 1999 `
    Spaced,
}

/// Title and year guessed from a filename.
///
/// The title has dot/underscore separators collapsed to single spaces and is
/// trimmed; the year is exactly four ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTitleYear {
    pub title: String,
    pub year: String,
    pub shape: YearShape,
}

impl ParsedTitleYear {
    /// The canonical `Title (Year)` prefix for this pair.
    pub fn formatted_prefix(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

impl fmt::Display for ParsedTitleYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.year)
    }
}

/// Remove a leading tracker tag, if any. Only the prefix is removed, never
/// later dash-delimited text.
pub fn strip_tracker_prefix(filename: &str) -> &str {
    match TRACKER_PREFIX.find(filename) {
        Some(m) => &filename[m.end()..],
        None => filename,
    }
}

/// Collapse dot/underscore runs into single spaces and trim.
pub fn normalize_title(raw: &str) -> String {
    SEPARATOR_RUN.replace_all(raw.trim(), " ").trim().to_string()
}

/// Extract `(title, year)` from a filename, or `None` when no supported
/// shape is present.
pub fn extract(filename: &str) -> Option<ParsedTitleYear> {
    let name = strip_tracker_prefix(filename);

    let (caps, year, shape) = if let Some(caps) = BRACKETED_YEAR.captures(name) {
        let year = bracketed_year(&caps)?;
        (caps, year, YearShape::Bracketed)
    } else if let Some(caps) = DOT_YEAR.captures(name) {
        let year = caps.name("year")?.as_str().to_string();
        (caps, year, YearShape::Dotted)
    } else if let Some(caps) = SPACE_YEAR.captures(name) {
        let year = caps.name("year")?.as_str().to_string();
        (caps, year, YearShape::Spaced)
    } else {
        tracing::debug!("No year pattern in: {}", filename);
        return None;
    };

    let title = normalize_title(caps.name("title")?.as_str());
    if title.is_empty() {
        tracing::debug!("Empty title before year {} in: {}", year, filename);
        return None;
    }

    Some(ParsedTitleYear { title, year, shape })
}

fn bracketed_year(caps: &Captures<'_>) -> Option<String> {
    ["paren", "square", "curly", "angle"]
        .iter()
        .find_map(|group| caps.name(group))
        .map(|m| m.as_str().to_string())
}

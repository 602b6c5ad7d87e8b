//! Per-file processing outcomes.

use crate::core::extractor::ParsedTitleYear;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Why a file was left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The name is not valid UTF-8 and cannot be rebuilt losslessly.
    NonUtf8Name,
    /// No bracketed, dotted or spaced year in the name.
    NoParsableYear,
    /// The name already is `Title (Year)...`.
    AlreadyFormatted,
    /// No confident match and the config requires one.
    NoConfidentMatch,
    /// The metadata source failed; retried on the next pass.
    SourceUnavailable(String),
    /// Something already sits at the new name.
    DestinationExists(PathBuf),
    /// The file was renamed or removed by someone else mid-pass.
    SourceVanished,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonUtf8Name => write!(f, "name is not valid UTF-8"),
            SkipReason::NoParsableYear => write!(f, "no title/year"),
            SkipReason::AlreadyFormatted => write!(f, "already formatted"),
            SkipReason::NoConfidentMatch => write!(f, "no confident match"),
            SkipReason::SourceUnavailable(e) => write!(f, "metadata source unavailable: {}", e),
            SkipReason::DestinationExists(p) => write!(f, "destination exists: {}", p.display()),
            SkipReason::SourceVanished => write!(f, "file disappeared"),
        }
    }
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Renamed { new_name: String },
    /// Dry run: the rename that would have happened.
    WouldRename { new_name: String },
    Skipped { reason: SkipReason },
    Failed { error: String },
}

/// Report for one file in a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedTitleYear>,
    /// Whether the title/year came from the metadata source.
    pub matched: bool,
    pub outcome: FileOutcome,
}

impl FileReport {
    pub fn skipped(filename: &str, parsed: Option<ParsedTitleYear>, reason: SkipReason) -> Self {
        Self {
            filename: filename.to_string(),
            parsed,
            matched: false,
            outcome: FileOutcome::Skipped { reason },
        }
    }

    pub fn is_renamed(&self) -> bool {
        matches!(
            self.outcome,
            FileOutcome::Renamed { .. } | FileOutcome::WouldRename { .. }
        )
    }

    pub fn skip_reason(&self) -> Option<&SkipReason> {
        match &self.outcome {
            FileOutcome::Skipped { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Result of one pass over a directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PassSummary {
    pub directory: PathBuf,
    pub reports: Vec<FileReport>,
}

impl PassSummary {
    pub fn renamed(&self) -> usize {
        self.reports.iter().filter(|r| r.is_renamed()).count()
    }

    pub fn skipped(&self) -> usize {
        self.reports.iter().filter(|r| r.skip_reason().is_some()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, FileOutcome::Failed { .. }))
            .count()
    }
}

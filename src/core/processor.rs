//! One processing pass over a directory.
//!
//! For every regular file: extract, skip if already `Title (Year)`, look up,
//! rebuild, rename. Every failure is local to its file.

use crate::core::extractor;
use crate::core::matcher::{FallbackReason, MatchDecision, Matcher};
use crate::core::rebuilder;
use crate::models::outcome::{FileOutcome, FileReport, PassSummary, SkipReason};
use crate::utils::fs;
use crate::Result;
use std::path::Path;

/// Processing options.
#[derive(Debug, Clone, Default)]
pub struct ProcessorConfig {
    /// Report renames without performing them.
    pub dry_run: bool,
    /// Skip files whose title could not be confirmed instead of renaming
    /// them to the normalised extracted title.
    pub require_confident_match: bool,
}

/// Runs passes over a directory.
pub struct Processor {
    matcher: Matcher,
    config: ProcessorConfig,
}

impl Processor {
    pub fn new(matcher: Matcher, config: ProcessorConfig) -> Self {
        Self { matcher, config }
    }

    /// Process every regular file directly inside `directory`.
    pub async fn process_directory(&self, directory: &Path) -> Result<PassSummary> {
        let files = fs::list_files(directory)?;
        tracing::info!("Processing {} files in {}", files.len(), directory.display());

        let mut summary = PassSummary {
            directory: directory.to_path_buf(),
            reports: Vec::with_capacity(files.len()),
        };
        for path in &files {
            summary.reports.push(self.process_file(path).await);
        }

        Ok(summary)
    }

    /// Process a single file.
    pub async fn process_file(&self, path: &Path) -> FileReport {
        let Some(raw_filename) = fs::file_name(path).map(str::to_string) else {
            // Rebuilding from a lossy name would rewrite the undecodable bytes
            return FileReport::skipped(&fs::display_name(path), None, SkipReason::NonUtf8Name);
        };

        let Some(parsed) = extractor::extract(&raw_filename) else {
            return FileReport::skipped(&raw_filename, None, SkipReason::NoParsableYear);
        };

        if raw_filename.starts_with(&parsed.formatted_prefix()) {
            return FileReport::skipped(&raw_filename, Some(parsed), SkipReason::AlreadyFormatted);
        }

        tracing::info!("Looking up: {}", parsed);
        let resolution = self.matcher.resolve(&parsed.title, &parsed.year).await;
        let matched = resolution.is_canonical();

        match &resolution.decision {
            MatchDecision::Fallback(FallbackReason::SourceUnavailable(e)) => {
                return FileReport::skipped(
                    &raw_filename,
                    Some(parsed),
                    SkipReason::SourceUnavailable(e.clone()),
                );
            }
            MatchDecision::Fallback(FallbackReason::LowConfidence { .. })
                if self.config.require_confident_match =>
            {
                return FileReport::skipped(&raw_filename, Some(parsed), SkipReason::NoConfidentMatch);
            }
            _ => {}
        }

        let confirmed = resolution.confirmed;
        let new_name = rebuilder::rebuild(&raw_filename, &confirmed.title, &confirmed.year);
        if new_name == raw_filename {
            return FileReport::skipped(&raw_filename, Some(parsed), SkipReason::AlreadyFormatted);
        }

        let outcome = self.rename(path, &new_name);
        FileReport {
            filename: raw_filename,
            parsed: Some(parsed),
            matched,
            outcome,
        }
    }

    fn rename(&self, path: &Path, new_name: &str) -> FileOutcome {
        let target = path.with_file_name(new_name);

        if self.config.dry_run {
            if target.exists() {
                return FileOutcome::Skipped {
                    reason: SkipReason::DestinationExists(target),
                };
            }
            return FileOutcome::WouldRename {
                new_name: new_name.to_string(),
            };
        }

        match fs::rename_file(path, &target) {
            Ok(()) => {
                tracing::info!("Renamed {} -> {}", path.display(), target.display());
                FileOutcome::Renamed {
                    new_name: new_name.to_string(),
                }
            }
            Err(crate::Error::FileAlreadyExists(_)) => FileOutcome::Skipped {
                reason: SkipReason::DestinationExists(target),
            },
            Err(crate::Error::SourceVanished(_)) => {
                tracing::debug!("Source vanished before rename: {}", path.display());
                FileOutcome::Skipped {
                    reason: SkipReason::SourceVanished,
                }
            }
            Err(e) => {
                tracing::warn!("Rename failed for {}: {}", path.display(), e);
                FileOutcome::Failed { error: e.to_string() }
            }
        }
    }
}


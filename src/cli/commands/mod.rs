//! CLI command implementations.

pub mod run;
pub mod watch;

use crate::core::matcher::{Matcher, MatcherConfig};
use crate::core::processor::{Processor, ProcessorConfig};
use crate::models::config::Config;
use crate::models::outcome::{FileOutcome, FileReport, PassSummary};
use crate::services::tmdb::TmdbClient;
use crate::services::{OfflineSource, TitleSearch};
use crate::Result;
use colored::Colorize;
use std::sync::Arc;

/// Options shared by `run` and `watch`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub offline: bool,
}

/// Build the processor for the configured metadata source.
pub fn build_processor(config: &Config, options: &RunOptions) -> Result<Processor> {
    let source: Arc<dyn TitleSearch> = if options.offline {
        Arc::new(OfflineSource)
    } else {
        Arc::new(TmdbClient::from_settings(&config.tmdb)?)
    };
    tracing::debug!("Using metadata source: {}", source.name());

    let matcher = Matcher::with_config(source, MatcherConfig::from(&config.matching));
    Ok(Processor::new(
        matcher,
        ProcessorConfig {
            dry_run: options.dry_run,
            require_confident_match: config.matching.require_confident_match,
        },
    ))
}

/// Print one line per file.
pub fn print_report(report: &FileReport) {
    match &report.outcome {
        FileOutcome::Renamed { new_name } => {
            let tag = if report.matched { "[RENAMED]" } else { "[RENAMED*]" };
            println!("{} {} -> {}", tag.green(), report.filename, new_name.bold());
        }
        FileOutcome::WouldRename { new_name } => {
            println!("{} {} -> {}", "[DRY-RUN]".cyan(), report.filename, new_name.bold());
        }
        FileOutcome::Skipped { reason } => {
            println!("{} Skipping ({}): {}", "[SKIP]".yellow(), reason, report.filename);
        }
        FileOutcome::Failed { error } => {
            println!("{} {}: {}", "[FAIL]".red(), report.filename, error);
        }
    }
}

/// Print every report followed by totals.
pub fn print_summary(summary: &PassSummary) {
    for report in &summary.reports {
        print_report(report);
    }

    println!();
    println!("{}", "[Summary]".bold().green());
    println!("  {} {}", "Renamed:".bold(), summary.renamed());
    println!("  {} {}", "Skipped:".bold(), summary.skipped());
    println!("  {} {}", "Failed:".bold(), summary.failed());
    if summary
        .reports
        .iter()
        .any(|r| r.is_renamed() && !r.matched)
    {
        println!("  * title not confirmed on TMDB, normalised from the filename");
    }
}

//! Run-once command: a single pass over a directory.

use super::{build_processor, print_summary, RunOptions};
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Perform a single pass over `directory` and rename matching files.
pub async fn run_once(directory: &Path, config: &Config, options: &RunOptions) -> Result<()> {
    let processor = build_processor(config, options)?;

    if options.dry_run {
        println!("{}", "[DRY-RUN] No files will be renamed".bold().cyan());
        println!();
    }

    let summary = processor.process_directory(directory).await?;
    print_summary(&summary);

    println!();
    println!("{}", "[OK] Run-once processing complete.".bold().green());
    Ok(())
}

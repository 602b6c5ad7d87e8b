//! Watch command: one pass per newly created file.

use super::{build_processor, print_summary, RunOptions};
use crate::core::watcher::DirectoryWatcher;
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Continuously watch `directory` and process it whenever a file appears.
///
/// Passes run one after another. A pass may find files that an earlier pass
/// already renamed; those come out as skips.
pub async fn watch_directory(directory: &Path, config: &Config, options: &RunOptions) -> Result<()> {
    let processor = build_processor(config, options)?;
    let mut watcher = DirectoryWatcher::new(directory)?;

    println!("{} {}", "[WATCH] Watching:".bold().cyan(), directory.display());

    loop {
        let created = tokio::select! {
            created = watcher.next_created() => created,
            _ = tokio::signal::ctrl_c() => {
                println!("{}", "Stopping watcher...".bold());
                break;
            }
        };

        let Some(path) = created else {
            tracing::warn!("Watcher closed");
            break;
        };

        println!("{} {}", "[NEW]".cyan(), path.display());
        match processor.process_directory(directory).await {
            Ok(summary) => print_summary(&summary),
            // Retried on the next event
            Err(e) => tracing::error!("Pass over {} failed: {}", directory.display(), e),
        }
    }

    Ok(())
}

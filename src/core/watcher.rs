//! Directory watching.
//!
//! Wraps a `notify` watcher and turns its callback into a stream of
//! "file created" notifications consumed by an async task.

use crate::Result;
use notify::event::{CreateKind, EventKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

/// Delivers newly created regular files in one directory.
pub struct DirectoryWatcher {
    // Dropping the watcher stops notifications.
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<PathBuf>,
}

impl DirectoryWatcher {
    /// Start watching `dir` (non-recursive).
    pub fn new(dir: &Path) -> Result<Self> {
        crate::utils::fs::ensure_directory(dir)?;

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                for path in created_files(&event) {
                    // Receiver gone means the watcher is shutting down.
                    let _ = tx.send(path);
                }
            }
            Err(e) => tracing::warn!("Watch error: {}", e),
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        tracing::debug!("Watching {}", dir.display());
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Wait for the next created file. `None` once the watcher has stopped.
    pub async fn next_created(&mut self) -> Option<PathBuf> {
        self.rx.recv().await
    }
}

/// Paths from a `Create` event that are regular files (or whose kind the
/// backend could not tell and which are files on disk).
pub fn created_files(event: &Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Create(CreateKind::File) => event.paths.clone(),
        EventKind::Create(CreateKind::Any) | EventKind::Create(CreateKind::Other) => event
            .paths
            .iter()
            .filter(|p| p.is_file())
            .cloned()
            .collect(),
        _ => Vec::new(),
    }
}

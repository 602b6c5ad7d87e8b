//! Core renaming logic.

pub mod extractor;
pub mod matcher;
pub mod processor;
pub mod rebuilder;
pub mod similarity;
pub mod watcher;

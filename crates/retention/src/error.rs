//! Error types for retention runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the retention core
///
/// Unparseable file names and invalid embedded dates are not errors;
/// those files are skipped during parsing.
#[derive(Debug, Error)]
pub enum RetentionError {
    /// The target path is missing or is not a directory
    #[error("Directory does not exist: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Listing the backup directory failed
    #[error("Failed to list {}: {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Removing a deletion candidate failed; the run stops here
    #[error("Failed to delete {} after {completed} deletions: {source}", .path.display())]
    Delete {
        path: PathBuf,
        /// Deletions that succeeded before this failure
        completed: usize,
        #[source]
        source: std::io::Error,
    },
}

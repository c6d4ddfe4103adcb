//! Deletion of planned candidates

use crate::error::RetentionError;
use crate::Result;
use std::io;
use std::path::Path;
use tracing::info;

/// Removes a single backup file
pub trait Remover {
    fn remove(&mut self, path: &Path) -> io::Result<()>;

    /// Verb logged in front of each candidate
    fn action(&self) -> &'static str {
        "Deleting"
    }
}

/// Removes files from the local file system
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRemover;

impl Remover for FsRemover {
    fn remove(&mut self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Leaves every file in place (used for `--dry-run`)
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRemover;

impl Remover for DryRunRemover {
    fn remove(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn action(&self) -> &'static str {
        "Would delete"
    }
}

/// Outcome of a deletion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionSummary {
    /// Files removed (or that would have been, on a dry run)
    pub deleted: usize,
}

/// Runs the deletion pass for a plan's candidates
///
/// The first failure stops the pass; deletions already done stay done.
pub struct DeletionExecutor<R: Remover> {
    remover: R,
    deleted: usize,
}

impl<R: Remover> DeletionExecutor<R> {
    /// Create an executor over the given removal backend
    pub fn new(remover: R) -> Self {
        Self {
            remover,
            deleted: 0,
        }
    }

    /// Delete every candidate, logging each one
    pub fn execute<'a, I>(&mut self, candidates: I) -> Result<DeletionSummary>
    where
        I: IntoIterator<Item = &'a Path>,
    {
        for path in candidates {
            self.delete(path)?;
        }

        Ok(self.summary())
    }

    /// Delete one candidate
    pub fn delete(&mut self, path: &Path) -> Result<()> {
        info!("{} {}", self.remover.action(), path.display());

        self.remover
            .remove(path)
            .map_err(|source| RetentionError::Delete {
                path: path.to_path_buf(),
                completed: self.deleted,
                source,
            })?;

        self.deleted += 1;
        Ok(())
    }

    /// Deletions completed so far in this run
    pub fn summary(&self) -> DeletionSummary {
        DeletionSummary {
            deleted: self.deleted,
        }
    }

    /// Give back the removal backend
    pub fn into_inner(self) -> R {
        self.remover
    }
}

//! Directory listing for a backup folder

use crate::error::RetentionError;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List regular files directly inside `dir`
///
/// Subdirectories are not descended into and symlinks are not followed.
/// The result is sorted so deletion logs come out in a stable order.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(RetentionError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|source| RetentionError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

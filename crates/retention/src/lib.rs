//! Grandfather-father-son retention for dated backup files
//!
//! This crate provides:
//! - Backup identity parsing from file names (`<object>[_]<yyyyMMdd>.<ext>`)
//! - Grouping of backups by object name
//! - Bucket planning (recent window, weekly, monthly, remainder)
//! - Oldest-per-bucket survivor selection
//! - Deletion execution behind a removal seam

pub mod bucket;
pub mod error;
pub mod executor;
pub mod group;
pub mod policy;
pub mod record;
pub mod scan;
pub mod select;

// Re-exports
pub use bucket::{BucketKind, BucketPlan, RetentionBucket};
pub use error::RetentionError;
pub use executor::{DeletionExecutor, DeletionSummary, DryRunRemover, FsRemover, Remover};
pub use group::ObjectHistory;
pub use policy::{Region, RetentionPolicy};
pub use record::BackupRecord;
pub use scan::list_files;
pub use select::{ObjectPlan, RetentionPlan};

/// Result type for retention operations
pub type Result<T> = std::result::Result<T, RetentionError>;

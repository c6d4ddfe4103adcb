//! One cleanup pass over a backup directory

use crate::populate;
use crate::system_config::SystemConfig;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use owo_colors::OwoColorize;
use retention::record::parse_all;
use retention::{
    list_files, DeletionExecutor, DryRunRemover, FsRemover, ObjectHistory, Remover,
    RetentionError, RetentionPlan,
};
use std::path::PathBuf;
use tracing::{debug, info};

/// Per-invocation options
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory holding the backups
    pub dir: PathBuf,
    /// Run date, day granularity
    pub today: NaiveDate,
    /// Plan and log, but leave every file in place
    pub dry_run: bool,
}

/// What a pass found and did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Regular files in the directory
    pub files_scanned: usize,
    /// Files that follow the backup naming convention
    pub backups_found: usize,
    /// Distinct object names
    pub objects: usize,
    /// Backups left in place
    pub kept: usize,
    /// Backups removed (or that would be, on a dry run)
    pub deleted: usize,
}

/// Scan, plan, delete
///
/// Nothing is touched when the directory is missing. A failed deletion
/// aborts the pass.
pub fn run(config: &SystemConfig, options: &RunOptions) -> Result<RunReport> {
    if !options.dir.is_dir() {
        return Err(RetentionError::NotADirectory(options.dir.clone()).into());
    }

    if config.debug_mode {
        populate::populate(&options.dir, options.today, &config.populate)
            .context("Failed to populate test data")?;
    }

    let files = list_files(&options.dir)?;
    let records = parse_all(&files);
    let backups_found = records.len();
    let history = ObjectHistory::from_records(records);

    let policy = config.rotation.policy();
    let plan = RetentionPlan::build(&policy, options.today, &history);

    for object in &plan.objects {
        debug!(
            "{}: {} recent, {} kept, {} to delete",
            object.object,
            object.recent.len(),
            object.kept.len(),
            object.delete.len()
        );
    }

    let deleted = if options.dry_run {
        info!("Dry run: no files will be removed");
        execute(DryRunRemover, &plan)?
    } else {
        execute(FsRemover, &plan)?
    };

    if options.dry_run {
        info!("Would delete {} backups", deleted);
    } else {
        info!("Deleted {} backups", deleted);
    }

    Ok(RunReport {
        files_scanned: files.len(),
        backups_found,
        objects: history.len(),
        kept: plan.kept_count(),
        deleted,
    })
}

fn execute<R: Remover>(remover: R, plan: &RetentionPlan) -> Result<usize> {
    let mut executor = DeletionExecutor::new(remover);
    let summary = executor.execute(plan.deletions())?;
    Ok(summary.deleted)
}

/// Human-readable summary on stdout
pub fn print_report(report: &RunReport, dry_run: bool) {
    println!(
        "Scanned {} files, {} backups across {} objects",
        report.files_scanned, report.backups_found, report.objects
    );
    println!("Kept:    {}", report.kept.to_string().green());

    let verb = if dry_run { "Would delete" } else { "Deleted" };
    println!("{}", format!("{} {} backups", verb, report.deleted).yellow().bold());
}

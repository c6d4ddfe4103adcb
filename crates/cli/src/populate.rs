//! Synthetic backup generator for manual testing (debug mode)

use crate::system_config::PopulateConfig;
use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::info;

/// File name for one synthetic backup
pub fn backup_file_name(object: &str, date: NaiveDate, extension: &str) -> String {
    format!("{}_{}.{}", object, date.format("%Y%m%d"), extension)
}

/// Create one empty backup per object per day, ending at `today`
///
/// Existing files are left as they are. Returns the number of backups
/// in the generated range.
pub fn populate(dir: &Path, today: NaiveDate, config: &PopulateConfig) -> Result<usize> {
    let mut count = 0;

    for age in 0..u64::from(config.days) {
        let Some(date) = today.checked_sub_days(Days::new(age)) else {
            break;
        };

        for object in &config.objects {
            let path = dir.join(backup_file_name(object, date, &config.extension));
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            count += 1;
        }
    }

    info!("Populated with {} files", count);
    Ok(count)
}

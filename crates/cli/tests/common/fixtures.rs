//! Temporary backup directories for integration tests

use anyhow::Result;
use chrono::{Days, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Fixed run date used by every workflow test
pub const TODAY: &str = "2024-06-01";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

/// A temp workspace with a `backups/` folder, a `logs/` folder and a config file
pub struct BackupDir {
    root: TempDir,
}

impl BackupDir {
    /// Create a workspace with the given rotation lengths
    pub fn new(days: u32, weeks: u32, months: u32) -> Result<Self> {
        let root = TempDir::new()?;
        fs::create_dir(root.path().join("backups"))?;

        let dir = Self { root };
        dir.write_config(&format!(
            "[rotation]\ndays = {}\nweeks = {}\nmonths = {}\n",
            days, weeks, months
        ))?;
        Ok(dir)
    }

    /// Replace the config file, always pointing logs at the temp workspace
    pub fn write_config(&self, body: &str) -> Result<()> {
        self.write_config_with_logs(&self.log_dir(), body)
    }

    /// Replace the config file with logs going to `log_dir`
    pub fn write_config_with_logs(&self, log_dir: &Path, body: &str) -> Result<()> {
        let content = format!("log_dir = {:?}\n{}", log_dir.to_string_lossy(), body);
        fs::write(self.config_path(), content)?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn backups(&self) -> PathBuf {
        self.root.path().join("backups")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.path().join("logs")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("bakrot.toml")
    }

    /// Path strings for `--config <file> <dir>`
    pub fn config_arg(&self) -> String {
        self.config_path().to_string_lossy().to_string()
    }

    pub fn backups_arg(&self) -> String {
        self.backups().to_string_lossy().to_string()
    }

    /// Write one empty backup `age` days before [`today`]
    pub fn add_backup(&self, object: &str, age: u64) -> Result<PathBuf> {
        let date = today().checked_sub_days(Days::new(age)).unwrap();
        let path = self
            .backups()
            .join(format!("{}_{}.bak", object, date.format("%Y%m%d")));
        fs::write(&path, b"backup")?;
        Ok(path)
    }

    /// Write daily backups for ages in `range`
    pub fn add_daily(&self, object: &str, range: std::ops::RangeInclusive<u64>) -> Result<()> {
        for age in range {
            self.add_backup(object, age)?;
        }
        Ok(())
    }

    /// Write an arbitrary file into the backup folder
    pub fn add_file(&self, name: &str) -> Result<PathBuf> {
        let path = self.backups().join(name);
        fs::write(&path, b"other")?;
        Ok(path)
    }

    /// Sorted file names currently in the backup folder
    pub fn file_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.backups())? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Whether the backup `age` days old for `object` still exists
    pub fn has_backup(&self, object: &str, age: u64) -> bool {
        let date = today().checked_sub_days(Days::new(age)).unwrap();
        self.backups()
            .join(format!("{}_{}.bak", object, date.format("%Y%m%d")))
            .exists()
    }
}

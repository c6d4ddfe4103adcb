//! Backup identity parsing
//!
//! A backup file name carries its identity: `<object>[_]<yyyyMMdd>.<ext>`.
//! Object names that themselves end in a digit run are ambiguous under this
//! convention; the shortest name that leaves exactly eight trailing digits wins.

use chrono::NaiveDate;
use regex::Regex;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Base-name pattern: name segment, optional underscore, 8 digits, extension
static BACKUP_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)_?([0-9]{8})\.\w+$").unwrap());

/// A dated backup file belonging to one logical object
///
/// Two records are the same record when their paths are equal.
#[derive(Debug, Clone)]
pub struct BackupRecord {
    /// Path to the backup file
    pub path: PathBuf,
    /// Logical object the backup belongs to (e.g. a database name)
    pub object: String,
    /// Backup date, day granularity
    pub date: NaiveDate,
}

impl BackupRecord {
    /// Create a record from already-known parts
    pub fn new(path: impl Into<PathBuf>, object: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            path: path.into(),
            object: object.into(),
            date,
        }
    }

    /// Extract `(object, date)` from a path's base name
    ///
    /// Returns `None` when the name does not follow the convention or the
    /// embedded date is not a valid calendar date.
    pub fn parse(path: &Path) -> Option<Self> {
        let file_name = path.file_name()?.to_str()?;
        let caps = BACKUP_NAME_REGEX.captures(file_name)?;

        let object = caps.get(1)?.as_str();
        let date = parse_compact_date(caps.get(2)?.as_str())?;

        Some(Self::new(path, object, date))
    }
}

impl PartialEq for BackupRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for BackupRecord {}

impl Hash for BackupRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Parse every path, silently dropping the ones that are not backups
pub fn parse_all<I, P>(paths: I) -> Vec<BackupRecord>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .filter_map(|path| {
            let path = path.as_ref();
            let record = BackupRecord::parse(path);
            if record.is_none() {
                debug!("Skipping {} (not a dated backup)", path.display());
            }
            record
        })
        .collect()
}

/// Strict `yyyyMMdd` parse
fn parse_compact_date(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

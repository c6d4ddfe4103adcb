//! Grouping of parsed backups by object name

use crate::record::BackupRecord;
use std::collections::BTreeMap;

/// Every backup found in one scan, keyed by object name
///
/// Objects iterate in name order so plans and logs are stable across runs.
#[derive(Debug, Clone, Default)]
pub struct ObjectHistory {
    objects: BTreeMap<String, Vec<BackupRecord>>,
}

impl ObjectHistory {
    /// Group records by their object name; none are dropped
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = BackupRecord>,
    {
        let mut objects: BTreeMap<String, Vec<BackupRecord>> = BTreeMap::new();
        for record in records {
            objects
                .entry(record.object.clone())
                .or_default()
                .push(record);
        }
        Self { objects }
    }

    /// Iterate `(object name, records)` in name order
    pub fn objects(&self) -> impl Iterator<Item = (&str, &[BackupRecord])> {
        self.objects
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Records for a single object
    pub fn get(&self, object: &str) -> Option<&[BackupRecord]> {
        self.objects.get(object).map(Vec::as_slice)
    }

    /// Number of distinct objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of records across all objects
    pub fn record_count(&self) -> usize {
        self.objects.values().map(Vec::len).sum()
    }
}

impl FromIterator<BackupRecord> for ObjectHistory {
    fn from_iter<I: IntoIterator<Item = BackupRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

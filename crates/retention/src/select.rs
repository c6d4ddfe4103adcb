//! Survivor selection and per-object retention plans

use crate::bucket::{BucketPlan, RetentionBucket};
use crate::group::ObjectHistory;
use crate::policy::RetentionPolicy;
use crate::record::BackupRecord;
use chrono::NaiveDate;
use std::path::Path;

/// Pick the bucket's single survivor and return it with the excess
///
/// The survivor is the oldest record in the bucket. Equal dates are broken
/// by the smallest path so repeated runs agree. Returns `None` for an empty
/// bucket.
pub fn select_survivor(bucket: &RetentionBucket) -> Option<(&BackupRecord, Vec<&BackupRecord>)> {
    let survivor = bucket
        .records
        .iter()
        .min_by(|a, b| a.date.cmp(&b.date).then_with(|| a.path.cmp(&b.path)))?;

    let excess = bucket
        .records
        .iter()
        .filter(|record| record.path != survivor.path)
        .collect();

    Some((survivor, excess))
}

/// Keep/delete decision for one object
#[derive(Debug, Clone, Default)]
pub struct ObjectPlan {
    /// Object name
    pub object: String,
    /// Records inside the recent window, untouched
    pub recent: Vec<BackupRecord>,
    /// One survivor per non-empty weekly or monthly bucket
    pub kept: Vec<BackupRecord>,
    /// Bucket excess followed by the remainder
    pub delete: Vec<BackupRecord>,
}

impl ObjectPlan {
    /// Plan a single object's history
    pub fn build(
        policy: &RetentionPolicy,
        today: NaiveDate,
        object: &str,
        records: &[BackupRecord],
    ) -> Self {
        let buckets = BucketPlan::build(policy, today, records);

        let mut kept = Vec::new();
        let mut delete = Vec::new();

        for bucket in buckets.buckets() {
            if let Some((survivor, excess)) = select_survivor(bucket) {
                kept.push(survivor.clone());
                delete.extend(excess.into_iter().cloned());
            }
        }

        delete.extend(buckets.remainder);

        Self {
            object: object.to_string(),
            recent: buckets.recent,
            kept,
            delete,
        }
    }

    /// Number of records that stay on disk
    pub fn retained_count(&self) -> usize {
        self.recent.len() + self.kept.len()
    }
}

/// Keep/delete decisions for every object found in one scan
#[derive(Debug, Clone)]
pub struct RetentionPlan {
    /// Run date the plan was computed for
    pub today: NaiveDate,
    pub objects: Vec<ObjectPlan>,
}

impl RetentionPlan {
    /// Plan every object independently
    pub fn build(policy: &RetentionPolicy, today: NaiveDate, history: &ObjectHistory) -> Self {
        let objects = history
            .objects()
            .map(|(name, records)| ObjectPlan::build(policy, today, name, records))
            .collect();

        Self { today, objects }
    }

    /// Paths of every deletion candidate, object by object
    pub fn deletions(&self) -> impl Iterator<Item = &Path> {
        self.objects
            .iter()
            .flat_map(|plan| plan.delete.iter().map(|record| record.path.as_path()))
    }

    pub fn delete_count(&self) -> usize {
        self.objects.iter().map(|plan| plan.delete.len()).sum()
    }

    pub fn kept_count(&self) -> usize {
        self.objects.iter().map(ObjectPlan::retained_count).sum()
    }
}

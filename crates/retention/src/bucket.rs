//! Bucket planning for one object's backup history

use crate::policy::{Region, RetentionPolicy, MONTH_LENGTH, WEEK_LENGTH};
use crate::record::BackupRecord;
use chrono::{Days, NaiveDate};

/// Which sequence a bucket belongs to, with its index (0 = newest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKind {
    Weekly(u32),
    Monthly(u32),
}

/// A half-open date interval `(start, end]` and the records inside it
#[derive(Debug, Clone)]
pub struct RetentionBucket {
    pub kind: BucketKind,
    /// Exclusive lower bound
    pub start: NaiveDate,
    /// Inclusive upper bound
    pub end: NaiveDate,
    pub records: Vec<BackupRecord>,
}

impl RetentionBucket {
    fn empty(kind: BucketKind, end: NaiveDate, width: i64) -> Self {
        Self {
            kind,
            start: days_before(end, width),
            end,
            records: Vec::new(),
        }
    }

    /// Whether `date` falls in `(start, end]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        date > self.start && date <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// One object's records split into disjoint regions
#[derive(Debug, Clone)]
pub struct BucketPlan {
    /// Records inside the recent window; never modified
    pub recent: Vec<BackupRecord>,
    /// `rotation_weeks` buckets, index 0 nearest to the recent window
    pub weekly: Vec<RetentionBucket>,
    /// `rotation_months` buckets, index 0 nearest to the weekly region
    pub monthly: Vec<RetentionBucket>,
    /// Records outside every window
    pub remainder: Vec<BackupRecord>,
}

impl BucketPlan {
    /// Partition `records` for the given policy and run date
    ///
    /// Every record lands in exactly one region. Buckets are materialised
    /// even when empty so their bounds can be reported.
    pub fn build(policy: &RetentionPolicy, today: NaiveDate, records: &[BackupRecord]) -> Self {
        let weekly = (0..policy.rotation_weeks)
            .map(|i| {
                let end = days_before(today, WEEK_LENGTH * i64::from(i) + policy.recent_days());
                RetentionBucket::empty(BucketKind::Weekly(i), end, WEEK_LENGTH)
            })
            .collect();

        let monthly = (0..policy.rotation_months)
            .map(|j| {
                let end = days_before(
                    today,
                    policy.weekly_horizon_days() + MONTH_LENGTH * i64::from(j),
                );
                RetentionBucket::empty(BucketKind::Monthly(j), end, MONTH_LENGTH)
            })
            .collect();

        let mut plan = Self {
            recent: Vec::new(),
            weekly,
            monthly,
            remainder: Vec::new(),
        };

        for record in records {
            match policy.classify(today, record.date) {
                Region::Recent => plan.recent.push(record.clone()),
                Region::Weekly(i) => plan.weekly[i as usize].records.push(record.clone()),
                Region::Monthly(j) => plan.monthly[j as usize].records.push(record.clone()),
                Region::Remainder => plan.remainder.push(record.clone()),
            }
        }

        plan
    }

    /// All weekly then monthly buckets
    pub fn buckets(&self) -> impl Iterator<Item = &RetentionBucket> {
        self.weekly.iter().chain(self.monthly.iter())
    }

    /// Total number of records across every region
    pub fn record_count(&self) -> usize {
        self.recent.len()
            + self.buckets().map(RetentionBucket::len).sum::<usize>()
            + self.remainder.len()
    }
}

/// `date - days`, saturating at the earliest representable date
fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_days(Days::new(days.max(0) as u64))
        .unwrap_or(NaiveDate::MIN)
}

//! Retention policy configuration and date classification

use chrono::NaiveDate;

/// Width of a weekly bucket in days
pub const WEEK_LENGTH: i64 = 7;

/// Width of a monthly bucket in days
pub const MONTH_LENGTH: i64 = 30;

/// Retention policy configuration
///
/// Fixed for a whole run; every object is planned with the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Days in the recent window, never touched (default: 7)
    pub rotation_days: u32,
    /// Number of weekly buckets after the recent window (default: 4)
    pub rotation_weeks: u32,
    /// Number of 30-day buckets after the weekly region (default: 3)
    pub rotation_months: u32,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            rotation_days: 7,
            rotation_weeks: 4,
            rotation_months: 3,
        }
    }
}

/// Region of the timeline a backup date falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// `date > today - R`
    Recent,
    /// Weekly bucket index, 0 is the newest
    Weekly(u32),
    /// Monthly bucket index, 0 is the newest
    Monthly(u32),
    /// Older than the oldest monthly bucket
    Remainder,
}

impl RetentionPolicy {
    /// Create a policy from the three rotation lengths
    pub fn new(rotation_days: u32, rotation_weeks: u32, rotation_months: u32) -> Self {
        Self {
            rotation_days,
            rotation_weeks,
            rotation_months,
        }
    }

    /// Days covered by the recent window
    pub fn recent_days(&self) -> i64 {
        i64::from(self.rotation_days)
    }

    /// Days covered by the recent window plus all weekly buckets
    pub fn weekly_horizon_days(&self) -> i64 {
        self.recent_days() + WEEK_LENGTH * i64::from(self.rotation_weeks)
    }

    /// Days covered by every window; anything at least this old is remainder
    pub fn horizon_days(&self) -> i64 {
        self.weekly_horizon_days() + MONTH_LENGTH * i64::from(self.rotation_months)
    }

    /// Worst-case storage bound per object: `R + 2W + 2M`
    pub fn max_retained(&self) -> u64 {
        u64::from(self.rotation_days)
            + 2 * u64::from(self.rotation_weeks)
            + 2 * u64::from(self.rotation_months)
    }

    /// Classify a backup date relative to `today`
    ///
    /// Equivalent to testing the half-open `(start, end]` interval of every
    /// bucket in turn, but done with one subtraction.
    pub fn classify(&self, today: NaiveDate, date: NaiveDate) -> Region {
        let age = (today - date).num_days();

        if age < self.recent_days() {
            return Region::Recent;
        }

        let weekly_age = age - self.recent_days();
        if weekly_age < WEEK_LENGTH * i64::from(self.rotation_weeks) {
            return Region::Weekly((weekly_age / WEEK_LENGTH) as u32);
        }

        let monthly_age = age - self.weekly_horizon_days();
        if monthly_age < MONTH_LENGTH * i64::from(self.rotation_months) {
            return Region::Monthly((monthly_age / MONTH_LENGTH) as u32);
        }

        Region::Remainder
    }
}

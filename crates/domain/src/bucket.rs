use chrono::{DateTime, TimeDelta, Utc};
use tenure_core::{AppError, AppResult};

use crate::AccessInterval;

const SECONDS_PER_HOUR: i64 = 60 * 60;

/// Granularity of the time buckets an index partitions intervals into.
///
/// Buckets are aligned on the Unix epoch in UTC, so the day width starts every
/// bucket at UTC midnight. An interval is registered in every bucket it
/// overlaps: memory grows with the average interval span measured in buckets,
/// and a point query only scans the intervals overlapping one bucket. Narrower
/// widths trade memory for smaller buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BucketWidth {
    seconds: i64,
}

impl BucketWidth {
    /// One calendar day in UTC.
    pub const DAY: Self = Self {
        seconds: 24 * SECONDS_PER_HOUR,
    };

    /// One hour.
    pub const HOUR: Self = Self {
        seconds: SECONDS_PER_HOUR,
    };

    /// Creates a width spanning a whole number of hours.
    pub fn from_hours(hours: u32) -> AppResult<Self> {
        if hours == 0 {
            return Err(AppError::Validation(
                "bucket width must be at least one hour".to_owned(),
            ));
        }

        Ok(Self {
            seconds: i64::from(hours) * SECONDS_PER_HOUR,
        })
    }

    /// Returns the width as a time delta.
    #[must_use]
    pub fn as_time_delta(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds)
    }

    /// Truncates `at` to the start of its bucket.
    #[must_use]
    pub fn bucket_start(&self, at: DateTime<Utc>) -> DateTime<Utc> {
        let seconds = at.timestamp();
        let truncated = seconds - seconds.rem_euclid(self.seconds);
        DateTime::from_timestamp(truncated, 0).unwrap_or(at)
    }

    /// Lists the start of every bucket overlapping the interval, in ascending order.
    #[must_use]
    pub fn spanned_buckets(&self, interval: &AccessInterval) -> Vec<DateTime<Utc>> {
        let step = self.as_time_delta();
        let mut buckets = Vec::new();
        let mut bucket = self.bucket_start(interval.start());

        while bucket < interval.end() {
            buckets.push(bucket);
            match bucket.checked_add_signed(step) {
                Some(next) => bucket = next,
                None => break,
            }
        }

        buckets
    }
}

impl Default for BucketWidth {
    fn default() -> Self {
        Self::DAY
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tenure_application::{AccessIndex, AccessIndexStats, AccessIndexStrategy};
use tenure_domain::{AccessInterval, BucketWidth};
use tracing::debug;

/// In-memory access index partitioned by role and time bucket.
///
/// Every interval is registered under each bucket it overlaps, so a point
/// query only filters the intervals touching a single bucket. The index owns
/// the intervals; buckets hold positions into that list in insertion order.
#[derive(Debug)]
pub struct DayBucketIndex {
    width: BucketWidth,
    intervals: Vec<AccessInterval>,
    buckets: HashMap<String, HashMap<DateTime<Utc>, Vec<usize>>>,
}

impl DayBucketIndex {
    /// Builds the index over `intervals` using buckets of `width`.
    #[must_use]
    pub fn build(intervals: Vec<AccessInterval>, width: BucketWidth) -> Self {
        let mut buckets: HashMap<String, HashMap<DateTime<Utc>, Vec<usize>>> = HashMap::new();

        for (position, interval) in intervals.iter().enumerate() {
            let role_buckets = buckets.entry(interval.role().to_owned()).or_default();
            for bucket in width.spanned_buckets(interval) {
                role_buckets.entry(bucket).or_default().push(position);
            }
        }

        let index = Self {
            width,
            intervals,
            buckets,
        };

        let stats = index.stats();
        debug!(
            roles = stats.role_count,
            intervals = stats.interval_count,
            buckets = stats.bucket_count,
            bucket_entries = stats.bucket_entry_count,
            bucket_width_seconds = width.as_time_delta().num_seconds(),
            "built day bucket index"
        );

        index
    }

    /// Returns the bucket width used by this index.
    #[must_use]
    pub fn width(&self) -> BucketWidth {
        self.width
    }

    /// Returns every interval registered under `(role, bucket_start)`, in insertion order.
    ///
    /// `bucket_start` must already be truncated to the index width.
    pub fn lookup<'a>(
        &'a self,
        role: &str,
        bucket_start: DateTime<Utc>,
    ) -> impl Iterator<Item = &'a AccessInterval> + use<'a> {
        self.buckets
            .get(role)
            .and_then(|role_buckets| role_buckets.get(&bucket_start))
            .into_iter()
            .flatten()
            .filter_map(move |position| self.intervals.get(*position))
    }
}

impl AccessIndex for DayBucketIndex {
    fn intervals_at(&self, role: &str, at: DateTime<Utc>) -> Vec<AccessInterval> {
        self.lookup(role, self.width.bucket_start(at))
            .filter(|interval| interval.contains(at))
            .cloned()
            .collect()
    }

    fn stats(&self) -> AccessIndexStats {
        let bucket_count = self.buckets.values().map(HashMap::len).sum();
        let bucket_entry_count = self
            .buckets
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum();

        AccessIndexStats {
            role_count: self.buckets.len(),
            interval_count: self.intervals.len(),
            bucket_count,
            bucket_entry_count,
        }
    }
}

/// Strategy building a [`DayBucketIndex`] with a fixed bucket width.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayBucketIndexStrategy {
    width: BucketWidth,
}

impl DayBucketIndexStrategy {
    /// Creates a strategy for the given bucket width.
    #[must_use]
    pub fn new(width: BucketWidth) -> Self {
        Self { width }
    }
}

impl AccessIndexStrategy for DayBucketIndexStrategy {
    fn build_index(&self, intervals: Vec<AccessInterval>) -> Arc<dyn AccessIndex> {
        Arc::new(DayBucketIndex::build(intervals, self.width))
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tenure_core::AppResult;
use tenure_domain::{AccessInterval, GrantHistory};

/// Size figures describing a built access index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessIndexStats {
    /// Distinct roles with at least one interval.
    pub role_count: usize,
    /// Intervals owned by the index.
    pub interval_count: usize,
    /// Populated `(role, bucket)` partitions.
    pub bucket_count: usize,
    /// Interval registrations across all buckets.
    pub bucket_entry_count: usize,
}

/// Read-only point-in-time lookup over access intervals.
///
/// Implementations are immutable once built and shared across request tasks.
pub trait AccessIndex: Send + Sync {
    /// Returns every interval for `role` whose half-open range contains `at`.
    fn intervals_at(&self, role: &str, at: DateTime<Utc>) -> Vec<AccessInterval>;

    /// Returns size figures for the index.
    fn stats(&self) -> AccessIndexStats;
}

/// Builds an [`AccessIndex`] from the complete interval set.
pub trait AccessIndexStrategy: Send + Sync {
    /// Takes ownership of the intervals and returns the built index.
    fn build_index(&self, intervals: Vec<AccessInterval>) -> Arc<dyn AccessIndex>;
}

/// Port supplying the raw grant history to load.
#[async_trait]
pub trait GrantEventSource: Send + Sync {
    /// Reads every grant event, grouped by user in chronological order.
    async fn load_grant_history(&self) -> AppResult<GrantHistory>;
}

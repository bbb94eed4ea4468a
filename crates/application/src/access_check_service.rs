use std::sync::Arc;

use chrono::{DateTime, Utc};
use tenure_core::AppResult;
use tenure_domain::{AccessInterval, GrantHistory, build_access_intervals};

use crate::{AccessIndex, AccessIndexStats, AccessIndexStrategy, GrantEventSource};

/// Application service answering "who held role R at time T".
///
/// Loading happens once; afterwards the service only reads the shared index,
/// so clones can serve queries concurrently.
#[derive(Clone)]
pub struct AccessCheckService {
    index: Arc<dyn AccessIndex>,
}

impl AccessCheckService {
    /// Creates a service over an already built index.
    #[must_use]
    pub fn new(index: Arc<dyn AccessIndex>) -> Self {
        Self { index }
    }

    /// Builds intervals from the grant history, closing open ones at `now`, and indexes them.
    ///
    /// Any malformed user history aborts the load; no partial index is returned.
    pub fn load(
        history: &GrantHistory,
        now: DateTime<Utc>,
        strategy: &dyn AccessIndexStrategy,
    ) -> AppResult<Self> {
        let intervals = build_access_intervals(history, now)?;
        Ok(Self::new(strategy.build_index(intervals)))
    }

    /// Reads the grant history from `source` and loads it.
    pub async fn load_from_source(
        source: &dyn GrantEventSource,
        now: DateTime<Utc>,
        strategy: &dyn AccessIndexStrategy,
    ) -> AppResult<Self> {
        let history = source.load_grant_history().await?;
        Self::load(&history, now, strategy)
    }

    /// Lists the intervals during which users held `role` at `at`.
    ///
    /// An unknown role and a role nobody held at `at` both yield an empty list.
    #[must_use]
    pub fn who_had_access(&self, role: &str, at: DateTime<Utc>) -> Vec<AccessInterval> {
        self.index.intervals_at(role, at)
    }

    /// Returns size figures for the loaded index.
    #[must_use]
    pub fn index_stats(&self) -> AccessIndexStats {
        self.index.stats()
    }
}

use serde::Serialize;
use tenure_application::AccessIndexStats;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "health-response.ts")]
pub struct HealthResponse {
    pub status: &'static str,
    pub roles: usize,
    pub intervals: usize,
    pub buckets: usize,
    pub bucket_entries: usize,
}

impl HealthResponse {
    /// Creates a healthy response describing the loaded index.
    #[must_use]
    pub fn ok(stats: AccessIndexStats) -> Self {
        Self {
            status: "ok",
            roles: stats.role_count,
            intervals: stats.interval_count,
            buckets: stats.bucket_count,
            bucket_entries: stats.bucket_entry_count,
        }
    }
}

//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod csv_grant_event_source;
mod day_bucket_index;

pub use csv_grant_event_source::{CsvGrantEventSource, DEFAULT_GRANT_LOG_DELIMITER};
pub use day_bucket_index::{DayBucketIndex, DayBucketIndexStrategy};

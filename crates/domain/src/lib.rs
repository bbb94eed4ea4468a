//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod bucket;
mod event_timestamp;
mod grant;
mod interval;
mod interval_builder;

pub use bucket::BucketWidth;
pub use event_timestamp::{EVENT_TIMESTAMP_FORMAT, format_event_timestamp, parse_event_timestamp};
pub use grant::GrantEvent;
pub use interval::AccessInterval;
pub use interval_builder::{GrantHistory, build_access_intervals, group_grant_events_by_user};

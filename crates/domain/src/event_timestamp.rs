use chrono::{DateTime, NaiveDateTime, Utc};
use tenure_core::{AppError, AppResult};

/// Layout of timestamps in grant logs and query parameters, e.g. `12/27/2020 9:30:00`.
///
/// Month, day and hour may be written without zero padding.
pub const EVENT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const EVENT_TIMESTAMP_DISPLAY_FORMAT: &str = "%-m/%-d/%Y %H:%M:%S";

/// Parses an event timestamp, interpreting it as UTC.
pub fn parse_event_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), EVENT_TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|error| {
            AppError::Validation(format!(
                "invalid timestamp '{value}', expected M/D/YYYY HH:MM:SS: {error}"
            ))
        })
}

/// Renders a timestamp in the event layout.
#[must_use]
pub fn format_event_timestamp(value: DateTime<Utc>) -> String {
    value.format(EVENT_TIMESTAMP_DISPLAY_FORMAT).to_string()
}

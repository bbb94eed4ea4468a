use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tenure_core::{AppError, AppResult};

use crate::{AccessInterval, GrantEvent};

/// Grant events keyed by user, each sequence in chronological order.
pub type GrantHistory = BTreeMap<String, Vec<GrantEvent>>;

/// Groups events by user, keeping each user's events in input order.
#[must_use]
pub fn group_grant_events_by_user(events: impl IntoIterator<Item = GrantEvent>) -> GrantHistory {
    let mut history = GrantHistory::new();
    for event in events {
        history
            .entry(event.user().as_str().to_owned())
            .or_default()
            .push(event);
    }

    history
}

/// Converts every user's grant events into contiguous access intervals.
///
/// Each event opens an interval that the user's next event closes; the last
/// interval is closed at `now`. Intervals come out grouped by user in
/// ascending user order, each group in chronological order.
///
/// The whole build fails if any user's history is out of order, if a final
/// event is not strictly before `now`, or if an event is filed under a
/// different user than the one it names.
pub fn build_access_intervals(
    history: &GrantHistory,
    now: DateTime<Utc>,
) -> AppResult<Vec<AccessInterval>> {
    let mut intervals = Vec::with_capacity(history.values().map(Vec::len).sum());
    for (user, events) in history {
        append_user_intervals(user, events, now, &mut intervals)?;
    }

    Ok(intervals)
}

fn append_user_intervals(
    user: &str,
    events: &[GrantEvent],
    now: DateTime<Utc>,
    intervals: &mut Vec<AccessInterval>,
) -> AppResult<()> {
    for (position, event) in events.iter().enumerate() {
        if event.user().as_str() != user {
            return Err(AppError::Validation(format!(
                "grant event for user '{}' was filed under user '{user}'",
                event.user()
            )));
        }

        let end = match events.get(position + 1) {
            Some(next) if next.occurred_at() <= event.occurred_at() => {
                return Err(AppError::Validation(format!(
                    "grant events for user '{user}' are not in ascending time order: \
                     '{}' is followed by '{}'",
                    event.occurred_at().to_rfc3339(),
                    next.occurred_at().to_rfc3339()
                )));
            }
            Some(next) => next.occurred_at(),
            None if now <= event.occurred_at() => {
                return Err(AppError::Validation(format!(
                    "latest grant event for user '{user}' at '{}' is not before the horizon '{}'",
                    event.occurred_at().to_rfc3339(),
                    now.to_rfc3339()
                )));
            }
            None => now,
        };

        intervals.push(AccessInterval::new(
            event.user().clone(),
            event.grantor().clone(),
            event.role().clone(),
            event.occurred_at(),
            end,
        )?);
    }

    Ok(())
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenure_core::{AppError, AppResult, NonEmptyString};

/// A continuous period during which `user` held `role`, granted by `grantor`.
///
/// The period is half-open: it includes `start` and excludes `end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessInterval {
    user: NonEmptyString,
    grantor: NonEmptyString,
    role: NonEmptyString,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl AccessInterval {
    /// Creates an access interval, rejecting empty or inverted periods.
    pub fn new(
        user: NonEmptyString,
        grantor: NonEmptyString,
        role: NonEmptyString,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Self> {
        if start >= end {
            return Err(AppError::Validation(format!(
                "access interval for user '{user}' and role '{role}' must start before it ends \
                 (start '{}', end '{}')",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }

        Ok(Self {
            user,
            grantor,
            role,
            start,
            end,
        })
    }

    /// Returns the user holding the role.
    #[must_use]
    pub fn user(&self) -> &str {
        self.user.as_str()
    }

    /// Returns the principal that granted the role.
    #[must_use]
    pub fn grantor(&self) -> &str {
        self.grantor.as_str()
    }

    /// Returns the held role.
    #[must_use]
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Returns the inclusive start instant.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the exclusive end instant.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Returns whether `at` falls inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use tenure_core::{AppResult, NonEmptyString};

    use super::AccessInterval;

    fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<AccessInterval> {
        AccessInterval::new(
            NonEmptyString::new("alice")?,
            NonEmptyString::new("bob")?,
            NonEmptyString::new("admin")?,
            start,
            end,
        )
    }

    #[test]
    fn interval_rejects_zero_duration() {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        assert!(interval(at, at).is_err());
    }

    #[test]
    fn contains_is_half_open() -> AppResult<()> {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        let end = start + TimeDelta::hours(2);
        let interval = interval(start, end)?;

        assert!(interval.contains(start));
        assert!(interval.contains(end - TimeDelta::nanoseconds(1)));
        assert!(!interval.contains(end));
        assert!(!interval.contains(start - TimeDelta::seconds(1)));
        Ok(())
    }
}

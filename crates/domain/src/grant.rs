use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenure_core::{AppResult, NonEmptyString};

/// One recorded role change: `grantor` gave `user` the role `role` at `occurred_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantEvent {
    user: NonEmptyString,
    grantor: NonEmptyString,
    role: NonEmptyString,
    occurred_at: DateTime<Utc>,
}

impl GrantEvent {
    /// Creates a grant event after validating identifiers.
    pub fn new(
        user: impl Into<String>,
        grantor: impl Into<String>,
        role: impl Into<String>,
        occurred_at: DateTime<Utc>,
    ) -> AppResult<Self> {
        Ok(Self {
            user: NonEmptyString::new(user)?,
            grantor: NonEmptyString::new(grantor)?,
            role: NonEmptyString::new(role)?,
            occurred_at,
        })
    }

    /// Returns the user whose role changed.
    #[must_use]
    pub fn user(&self) -> &NonEmptyString {
        &self.user
    }

    /// Returns the principal that granted the role.
    #[must_use]
    pub fn grantor(&self) -> &NonEmptyString {
        &self.grantor
    }

    /// Returns the granted role.
    #[must_use]
    pub fn role(&self) -> &NonEmptyString {
        &self.role
    }

    /// Returns when the grant took effect.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

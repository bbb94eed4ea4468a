mod access;
mod common;

pub use access::{UserAccessResponse, WhoHadAccessResponse};
pub use common::HealthResponse;

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tenure_core::{AppResult, NonEmptyString};
    use tenure_domain::AccessInterval;
    use ts_rs::{Config, TS};

    use super::{HealthResponse, UserAccessResponse, WhoHadAccessResponse};
    use crate::error::ErrorResponse;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        HealthResponse::export(&config)?;
        UserAccessResponse::export(&config)?;
        WhoHadAccessResponse::export(&config)?;
        ErrorResponse::export(&config)?;

        Ok(())
    }

    #[test]
    fn user_access_serializes_with_event_timestamps() -> AppResult<()> {
        let start = Utc.with_ymd_and_hms(2021, 1, 1, 10, 0, 0).single();
        let end = Utc.with_ymd_and_hms(2021, 1, 3, 8, 0, 0).single();
        let (Some(start), Some(end)) = (start, end) else {
            panic!("fixture timestamps must be valid");
        };
        let interval = AccessInterval::new(
            NonEmptyString::new("alice")?,
            NonEmptyString::new("bob")?,
            NonEmptyString::new("admin")?,
            start,
            end,
        )?;

        let payload = serde_json::to_value(WhoHadAccessResponse {
            user_accesses: vec![UserAccessResponse::from(interval)],
        })
        .map_err(|error| tenure_core::AppError::Internal(error.to_string()))?;

        assert_eq!(
            payload,
            serde_json::json!({
                "userAccesses": [{
                    "user": "alice",
                    "grantor": "bob",
                    "createTimestamp": "1/1/2021 10:00:00",
                    "endTimeStamp": "1/3/2021 08:00:00",
                }]
            })
        );
        Ok(())
    }
}

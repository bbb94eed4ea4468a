use serde::Serialize;
use tenure_domain::{AccessInterval, format_event_timestamp};
use ts_rs::TS;

/// API representation of one user's access interval.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "user-access-response.ts")]
pub struct UserAccessResponse {
    pub user: String,
    pub grantor: String,
    pub create_timestamp: String,
    pub end_time_stamp: String,
}

impl From<AccessInterval> for UserAccessResponse {
    fn from(interval: AccessInterval) -> Self {
        Self {
            user: interval.user().to_owned(),
            grantor: interval.grantor().to_owned(),
            create_timestamp: format_event_timestamp(interval.start()),
            end_time_stamp: format_event_timestamp(interval.end()),
        }
    }
}

/// Users holding a role at the requested instant.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "who-had-access-response.ts")]
pub struct WhoHadAccessResponse {
    pub user_accesses: Vec<UserAccessResponse>,
}

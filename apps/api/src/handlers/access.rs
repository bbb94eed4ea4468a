use axum::Json;
use axum::extract::{Query, State};
use tenure_core::{AppError, NonEmptyString};
use tenure_domain::parse_event_timestamp;
use tracing::debug;

use crate::dto::{UserAccessResponse, WhoHadAccessResponse};
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct WhoHadAccessQuery {
    pub role: Option<String>,
    pub timestamp: Option<String>,
}

pub async fn who_had_access_handler(
    State(state): State<AppState>,
    Query(query): Query<WhoHadAccessQuery>,
) -> ApiResult<Json<WhoHadAccessResponse>> {
    let role = NonEmptyString::new(query.role.unwrap_or_default())
        .map_err(|_| AppError::Validation("role query parameter is required".to_owned()))?;
    let timestamp = query
        .timestamp
        .ok_or_else(|| AppError::Validation("timestamp query parameter is required".to_owned()))?;
    let at = parse_event_timestamp(timestamp.as_str())?;

    let intervals = state.access_check_service.who_had_access(role.as_str(), at);
    debug!(role = %role, at = %at, matches = intervals.len(), "answered access query");

    Ok(Json(WhoHadAccessResponse {
        user_accesses: intervals.into_iter().map(UserAccessResponse::from).collect(),
    }))
}

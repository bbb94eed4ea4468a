//! Tenure API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use chrono::Utc;
use tenure_application::AccessCheckService;
use tenure_core::AppError;
use tenure_infrastructure::{CsvGrantEventSource, DayBucketIndexStrategy};
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let horizon = config.horizon.unwrap_or_else(Utc::now);
    let source = CsvGrantEventSource::new(config.events_path.clone(), config.events_delimiter);
    let strategy = DayBucketIndexStrategy::new(config.bucket_width);

    let access_check_service =
        AccessCheckService::load_from_source(&source, horizon, &strategy).await?;
    let stats = access_check_service.index_stats();
    info!(
        horizon = %horizon.to_rfc3339(),
        roles = stats.role_count,
        intervals = stats.interval_count,
        buckets = stats.bucket_count,
        bucket_entries = stats.bucket_entry_count,
        "access index loaded"
    );

    let app = api_router::build_router(AppState {
        access_check_service,
    });

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "tenure-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

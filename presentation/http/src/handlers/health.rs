//! Service status and health handlers

use axum::{extract::State, response::Json};
use tracing::debug;

use crate::models::{ErrorBody, HealthReport, ServiceStatus};
use crate::{ApiError, AppState};

const HEALTHY: &str = "healthy";

/// `GET /`
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "Service is up", body = ServiceStatus))
)]
pub async fn service_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: HEALTHY,
        service: state.config.service_name.clone(),
    })
}

/// `GET /health`: service status plus current record counts
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses(
        (status = 200, description = "Service status and record counts", body = HealthReport),
        (status = 503, description = "Store unavailable", body = ErrorBody)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthReport>, ApiError> {
    let stats = state.store.stats().await?;
    debug!("Health check: {:?}", stats);

    Ok(Json(HealthReport {
        status: HEALTHY,
        service: state.config.service_name.clone(),
        stats,
    }))
}

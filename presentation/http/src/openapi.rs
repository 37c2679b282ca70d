//! OpenAPI document served at `/openapi.json`

use axum::response::Json;
use utoipa::OpenApi;
use zayra_core::types::{EcgBatch, Event, StoreStats, User};

use crate::handlers;
use crate::models::{
    ErrorBody, EventCreated, EventList, HealthReport, IngestReceipt, ServiceStatus, UserCreated,
    UserEvents, UserFound, UserList,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Zayra ECG API",
        description = "Core endpoints for ECG monitoring and patient management",
        version = "1.0.0"
    ),
    paths(
        handlers::health::service_status,
        handlers::health::health_check,
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::get_user,
        handlers::ingest::ingest_ecg,
        handlers::events::list_events,
        handlers::events::create_event,
        handlers::events::list_user_events,
    ),
    components(schemas(
        User,
        EcgBatch,
        Event,
        StoreStats,
        ErrorBody,
        ServiceStatus,
        HealthReport,
        UserList,
        UserCreated,
        UserFound,
        IngestReceipt,
        EventList,
        EventCreated,
        UserEvents,
    )),
    tags(
        (name = "status", description = "Liveness and record counts"),
        (name = "users", description = "User registration and lookup"),
        (name = "ecg", description = "ECG batch ingestion"),
        (name = "events", description = "Cardiac event recording")
    )
)]
pub struct ApiDoc;

/// `GET /openapi.json`
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

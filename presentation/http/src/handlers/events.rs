//! Cardiac event handlers

use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{debug, info};
use zayra_core::types::Event;

use crate::models::{ErrorBody, EventCreated, EventList, JsonBody, UserEvents};
use crate::{ApiError, AppState};

/// List all recorded events
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    responses((status = 200, description = "Every recorded event in insertion order", body = EventList))
)]
pub async fn list_events(State(state): State<AppState>) -> Result<Json<EventList>, ApiError> {
    let events = state.store.list_events().await?;
    debug!("Listed {} events", events.len());
    Ok(Json(EventList::new(events)))
}

/// Record a cardiac event, overwriting any existing event with the same id
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    request_body = Event,
    responses(
        (status = 200, description = "Event recorded", body = EventCreated),
        (status = 422, description = "Body does not describe an event", body = ErrorBody)
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    JsonBody(event): JsonBody<Event>,
) -> Result<Json<EventCreated>, ApiError> {
    info!(
        "Recording {} event {} ({}) for user {}",
        event.event_type, event.id, event.severity, event.user_id
    );
    let event = state.store.put_event(event).await?;
    Ok(Json(EventCreated {
        status: "created",
        event,
    }))
}

/// Events recorded for one user
#[utoipa::path(
    get,
    path = "/events/{user_id}",
    tag = "events",
    params(("user_id" = String, Path, description = "Exact user id to filter on")),
    responses((status = 200, description = "Matching events; empty for unknown users", body = UserEvents))
)]
pub async fn list_user_events(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserEvents>, ApiError> {
    let events = state.store.events_for_user(&user_id).await?;
    debug!("Found {} events for user {}", events.len(), user_id);
    Ok(Json(UserEvents::new(user_id, events)))
}

//! Request extractors and response bodies for the HTTP API

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;
use zayra_core::types::{Event, StoreStats, User};

use crate::ApiError;

/// JSON body extractor whose rejections render as `{"error": ...}`.
///
/// A request without a `Content-Type` header is still decoded as JSON; only
/// an explicit non-JSON content type is refused with 415.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        if request.headers().contains_key(header::CONTENT_TYPE) {
            let Json(value) = Json::<T>::from_request(request, state).await?;
            return Ok(Self(value));
        }

        let bytes = Bytes::from_request(request, state)
            .await
            .map_err(|rejection| ApiError::InvalidBody {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

/// Error payload shared by every failure response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// Body of `GET /`
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceStatus {
    #[schema(value_type = String)]
    pub status: &'static str,
    pub service: String,
}

/// Body of `GET /health`
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthReport {
    #[schema(value_type = String)]
    pub status: &'static str,
    pub service: String,
    #[serde(flatten)]
    pub stats: StoreStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

impl UserList {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserCreated {
    #[schema(value_type = String)]
    pub status: &'static str,
    pub user: User,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserFound {
    pub user: User,
}

/// Acknowledgement for an ingested ECG batch; never echoes the samples
#[derive(Debug, Serialize, ToSchema)]
pub struct IngestReceipt {
    #[schema(value_type = String)]
    pub status: &'static str,
    pub user_id: String,
    pub samples_received: usize,
    #[schema(value_type = String)]
    pub message: &'static str,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventList {
    pub events: Vec<Event>,
    pub count: usize,
}

impl EventList {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            count: events.len(),
            events,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventCreated {
    #[schema(value_type = String)]
    pub status: &'static str,
    pub event: Event,
}

/// Body of `GET /events/{user_id}`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEvents {
    pub user_id: String,
    pub events: Vec<Event>,
    pub count: usize,
}

impl UserEvents {
    pub fn new(user_id: String, events: Vec<Event>) -> Self {
        Self {
            user_id,
            count: events.len(),
            events,
        }
    }
}

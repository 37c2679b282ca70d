//! HTTP/JSON presentation layer for Zayra
//!
//! Serves users, ECG ingestion and cardiac events over an axum router backed
//! by any [`RecordStore`].

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit},
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use zayra_core::prelude::*;

mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;

pub use models::*;

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct HttpServerConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Name reported by `/` and `/health`
    pub service_name: String,
    /// Enable CORS
    pub enable_cors: bool,
    /// Request timeout in seconds
    pub request_timeout: u64,
    /// Largest accepted request body
    pub max_body_bytes: usize,
    /// Answer unknown users with a 200 error payload instead of a 404
    pub not_found_as_ok: bool,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 8000)),
            service_name: "zayra-core-api".to_string(),
            enable_cors: true,
            request_timeout: 30,
            max_body_bytes: 16 * 1024 * 1024,
            not_found_as_ok: false,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub config: Arc<HttpServerConfig>,
}

/// Errors surfaced to API callers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(StoreError::Backend(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("API error: {} - {}", status, self);
        } else {
            warn!("API error: {} - {}", status, self);
        }
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// HTTP presentation adapter
pub struct HttpServer {
    config: HttpServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: HttpServerConfig) -> Self {
        Self { config }
    }

    /// Build the Axum router with all routes
    pub fn router(&self, store: Arc<dyn RecordStore>) -> Router {
        let app_state = AppState {
            store,
            config: Arc::new(self.config.clone()),
        };

        let mut router = Router::new()
            // Status
            .route("/", get(handlers::health::service_status))
            .route("/health", get(handlers::health::health_check))
            .route("/openapi.json", get(openapi::openapi_json))
            // Users
            .route(
                "/users",
                get(handlers::users::list_users).post(handlers::users::create_user),
            )
            .route("/users/:user_id", get(handlers::users::get_user))
            // ECG ingestion
            .route("/ingest", post(handlers::ingest::ingest_ecg))
            // Events
            .route(
                "/events",
                get(handlers::events::list_events).post(handlers::events::create_event),
            )
            .route("/events/:user_id", get(handlers::events::list_user_events))
            .with_state(app_state);

        let timeout = Duration::from_secs(self.config.request_timeout);
        let service_builder = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(from_fn(middleware::request_logging))
            .layer(from_fn_with_state(timeout, middleware::request_timeout))
            .layer(DefaultBodyLimit::max(self.config.max_body_bytes));

        router = router.layer(service_builder);

        if self.config.enable_cors {
            router = router.layer(middleware::open_cors());
        }

        router
    }

    /// Bind and serve until `shutdown` resolves
    pub async fn serve<F>(&self, store: Arc<dyn RecordStore>, shutdown: F) -> Result<(), PresentationError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting Zayra API server on {}", self.config.bind_address);

        let router = self.router(store);

        let listener = tokio::net::TcpListener::bind(&self.config.bind_address)
            .await
            .map_err(|e| PresentationError::StartupFailed(format!("Failed to bind to {}: {}", self.config.bind_address, e)))?;

        info!("Zayra API listening on {}", self.config.bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| PresentationError::ServeFailed(e.to_string()))?;

        info!("Zayra API server stopped");
        Ok(())
    }
}

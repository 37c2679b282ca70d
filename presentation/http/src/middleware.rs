//! Middleware for the Zayra HTTP API

use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::{Duration, Instant};
use tower_http::cors::CorsLayer;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::ApiError;

/// Response header carrying the id assigned to each request
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Request logging middleware.
///
/// Tags the request with a fresh id, runs it inside a span carrying that id,
/// and echoes the id back in `x-request-id`.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start_time = Instant::now();

    let span = info_span!("request", id = %request_id);
    let mut response = async {
        debug!("Incoming request: {} {}", method, uri);

        let response = next.run(request).await;

        let duration = start_time.elapsed();
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            info!("{} {} - {} ({:?})", method, uri, status, duration);
        } else {
            warn!("{} {} - {} ({:?})", method, uri, status, duration);
        }
        response
    }
    .instrument(span)
    .await;

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
    }
    response
}

/// Request timeout middleware
pub async fn request_timeout(
    State(timeout_duration): State<Duration>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match tokio::time::timeout(timeout_duration, next.run(request)).await {
        Ok(response) => Ok(response),
        Err(_) => {
            warn!("Request timed out after {:?}", timeout_duration);
            Err(ApiError::Timeout(timeout_duration))
        }
    }
}

/// Fully open CORS: any origin (mirrored, so credentialed requests pass),
/// any method, any header.
pub fn open_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}


#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::middleware::{from_fn, from_fn_with_state};
    use axum::routing::get;
    use axum::Router;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(from_fn_with_state(Duration::from_millis(50), request_timeout));

        let request = Request::get("/slow").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("timed out"));

        let request = Request::get("/fast").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_ids_are_unique() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn(request_logging));

        let mut ids = Vec::new();
        for _ in 0..2 {
            let request = Request::get("/").body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            let id = response.headers().get(&REQUEST_ID_HEADER).unwrap().clone();
            ids.push(id);
        }
        assert_ne!(ids[0], ids[1]);
    }
}

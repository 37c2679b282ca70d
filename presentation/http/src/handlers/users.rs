//! User registration handlers

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, info};
use zayra_core::types::User;

use crate::models::{ErrorBody, JsonBody, UserCreated, UserFound, UserList};
use crate::{ApiError, AppState};

pub const USER_NOT_FOUND: &str = "User not found";

/// List all registered users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "Every registered user in insertion order", body = UserList))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, ApiError> {
    let users = state.store.list_users().await?;
    debug!("Listed {} users", users.len());
    Ok(Json(UserList::new(users)))
}

/// Register a user, overwriting any existing user with the same id
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = User,
    responses(
        (status = 200, description = "User registered", body = UserCreated),
        (status = 422, description = "Body does not describe a user", body = ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(user): JsonBody<User>,
) -> Result<Json<UserCreated>, ApiError> {
    info!("Registering user: {}", user.id);
    let user = state.store.put_user(user).await?;
    Ok(Json(UserCreated {
        status: "created",
        user,
    }))
}

/// Get a specific user
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = String, Path, description = "Id the user was registered with")),
    responses(
        (status = 200, description = "User found", body = UserFound),
        (status = 404, description = "No user with that id", body = ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Response, ApiError> {
    debug!("Getting user: {}", user_id);

    match state.store.get_user(&user_id).await? {
        Some(user) => Ok(Json(UserFound { user }).into_response()),
        // Legacy clients expect the error payload with a 200 status.
        None if state.config.not_found_as_ok => Ok(Json(ErrorBody::new(USER_NOT_FOUND)).into_response()),
        None => Err(ApiError::NotFound(USER_NOT_FOUND.to_string())),
    }
}

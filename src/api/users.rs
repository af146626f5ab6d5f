//! User directory endpoints.
//!
//! Handlers validate input, delegate to [`UserService`](crate::services::UserService)
//! and wrap the outcome in the shared envelope. Every failure leaves through
//! [`ApiError`], so the `success` flag always follows the status code.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use std::sync::Arc;

use super::validation::{parse_user_id, reject_body, validate_user_payload};
use super::{ApiError, ApiResponse, AppState, CreatedUserDto, UpdatedUserDto, UserPayload};
use crate::models::User;

type JsonBody = Result<Json<UserPayload>, JsonRejection>;

/// `GET /users`
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.list_users().await?;
    let count = users.len();

    let message = if users.is_empty() {
        "No users found"
    } else {
        "Users fetched successfully"
    };

    Ok(Json(ApiResponse::success(message, users).with_count(count)))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get_user(id).await?;

    Ok(Json(ApiResponse::success("User fetched successfully", user)))
}

/// `POST /users`
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    payload: JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<CreatedUserDto>>), ApiError> {
    let Json(payload) = payload.map_err(|e| reject_body(&e))?;
    let user = validate_user_payload(payload)?;

    let created = state.user_service.create_user(user).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User added successfully", created)),
    ))
}

/// `PUT /users/{id}`
///
/// The body is checked before the identifier, matching create: an
/// incomplete body is a 400 even for an id that does not exist.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: JsonBody,
) -> Result<Json<ApiResponse<UpdatedUserDto>>, ApiError> {
    let Json(payload) = payload.map_err(|e| reject_body(&e))?;
    let user = validate_user_payload(payload)?;
    let id = parse_user_id(&id)?;

    let updated = state.user_service.update_user(id, user).await?;

    Ok(Json(ApiResponse::success("User updated successfully", updated)))
}

/// `DELETE /users/{id}`
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = parse_user_id(&id)?;
    let deleted = state.user_service.delete_user(id).await?;

    Ok(Json(ApiResponse::deleted("User deleted successfully", deleted)))
}

/// `POST /create-users-table`
pub async fn create_users_table(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.user_service.provision_schema().await?;

    Ok(Json(ApiResponse::message("Users table created successfully!")))
}

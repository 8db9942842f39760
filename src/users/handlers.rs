// HTTP handlers for user administration endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::auth::models::UserResponse;
use crate::error::ApiError;
use crate::AppState;

/// Handler for GET /api/users
/// Returns every registered user, or 404 when none exist
pub async fn get_all_users(State(state): State<AppState>) -> Result<Response, ApiError> {
    let users = state
        .users
        .find_all()
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    if users.is_empty() {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No users found" })),
        )
            .into_response());
    }

    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();
    Ok(Json(users).into_response())
}

/// Handler for DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = state
        .users
        .delete(id)
        .await
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    if !deleted {
        return Err(ApiError::NotFound {
            resource: "User".to_string(),
            id: id.to_string(),
        });
    }

    tracing::info!("User {} deleted", id);
    Ok(Json(json!({ "message": "User deleted successfully" })))
}

// HTTP handlers for authentication endpoints

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::auth::{
    error::AuthError,
    middleware::AuthenticatedIdentity,
    models::{
        AdminLoginRequest, ChangePasswordRequest, LoginRequest, MessageResponse, RefreshRequest,
        SignupRequest, TokenResponse, UpdateSettingsRequest,
    },
};
use crate::AppState;

/// Register a new customer account
/// POST /api/auth/signup
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Validation failure or email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "auth"
)]
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth
        .signup(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Authenticate a customer
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation failure"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let token = state.auth.login(&request.email, &request.password).await?;
    Ok(Json(TokenResponse { token }))
}

/// Reissue a token from a still-valid one
/// POST /api/auth/refresh-token
pub async fn refresh_handler(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    let token = state.auth.refresh(&request.token).await?;
    Ok(Json(TokenResponse { token }))
}

/// Authenticate an admin by email or username
/// POST /api/admin/login
pub async fn admin_login_handler(
    State(state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    if request.email.is_none() && request.username.is_none() {
        return Err(AuthError::ValidationError(
            "Either email or username is required".to_string(),
        ));
    }

    let token = state
        .auth
        .admin_login(
            request.email.as_deref(),
            request.username.as_deref(),
            &request.password,
        )
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// Change the authenticated admin's password
/// PUT /api/admin/change-password
pub async fn change_password_handler(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    state
        .auth
        .change_admin_password(
            identity.subject_id,
            &request.current_password,
            &request.new_password,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password changed successfully".to_string(),
    }))
}

/// Update the authenticated admin's site settings
/// PUT /api/admin/settings
pub async fn update_settings_handler(
    State(state): State<AppState>,
    identity: AuthenticatedIdentity,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<MessageResponse>, AuthError> {
    state
        .auth
        .update_admin_settings(identity.subject_id, &request)
        .await?;

    Ok(Json(MessageResponse {
        message: "Settings updated successfully".to_string(),
    }))
}

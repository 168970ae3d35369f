use axum::{extract::State, http::StatusCode, Json};
use contracts::system::auth::{LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo};
use std::sync::Arc;

use crate::shared::app_state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::service::{self, AuthError};

fn auth_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::MissingCredentials => StatusCode::BAD_REQUEST,
        AuthError::InvalidCredentials | AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
        AuthError::Remote(e) => {
            tracing::error!("Login: remote backend failed: {}", e);
            StatusCode::BAD_GATEWAY
        }
        AuthError::Token(e) => {
            tracing::error!("Login: failed to issue token: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// POST /api/system/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    service::login(&state, &request)
        .await
        .map(Json)
        .map_err(|e| auth_status(&e))
}

/// POST /api/system/auth/refresh
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    service::refresh(&state, &request.refresh_token)
        .map(Json)
        .map_err(|e| auth_status(&e))
}

/// POST /api/system/auth/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RefreshRequest>,
) -> StatusCode {
    service::logout(&state, &request.refresh_token);
    StatusCode::OK
}

/// GET /api/system/auth/me (protected by middleware)
pub async fn current_user(CurrentUser(claims): CurrentUser) -> Json<UserInfo> {
    Json(claims.to_user_info())
}

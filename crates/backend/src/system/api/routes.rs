use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::shared::app_state::AppState;
use crate::system::auth;

/// Системные роуты: health check и аутентификация
pub fn configure_system_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        // ========================================
        // HEALTH CHECK
        // ========================================
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/system/auth/login", post(handlers::auth::login))
        .route("/api/system/auth/refresh", post(handlers::auth::refresh))
        .route("/api/system/auth/logout", post(handlers::auth::logout))
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(handlers::auth::current_user).layer(middleware::from_fn_with_state(
                state,
                auth::middleware::require_auth,
            )),
        )
}

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::shared::app_state::AppState;
use crate::system::auth::middleware::{require_admin, require_auth};

/// Бизнес-роуты дашборда, все требуют авторизации
pub fn configure_business_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_only = middleware::from_fn_with_state(state.clone(), require_admin);

    Router::new()
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d400/sales_performance",
            get(handlers::d400_sales_performance::get_sales_performance),
        )
        .route(
            "/api/d400/sales_performance/export",
            get(handlers::d400_sales_performance::export_leaderboard),
        )
        .route(
            "/api/d401/province_revenue",
            get(handlers::d401_province_revenue::get_province_revenue),
        )
        // ========================================
        // REFERENCE DATA
        // ========================================
        .route(
            "/api/reference/:sheet",
            get(handlers::a004_reference_data::list_rows).merge(
                post(handlers::a004_reference_data::append_row).route_layer(admin_only.clone()),
            ),
        )
        .route(
            "/api/reference/:sheet/:id",
            post(handlers::a004_reference_data::update_row).route_layer(admin_only),
        )
        // ========================================
        // ORDERS
        // ========================================
        .route(
            "/api/orders/:id/confirm_delivery_cost",
            post(handlers::a001_order::confirm_delivery_cost),
        )
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

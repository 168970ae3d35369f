use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::dashboards::d400_sales_performance::{
    SalesPerformanceRequest, SalesPerformanceResponse,
};
use std::sync::Arc;

use super::failure_status;
use crate::dashboards::d400_sales_performance::service;
use crate::shared::app_state::AppState;

/// GET /api/d400/sales_performance?date_from=2024-03-01&date_to=2024-03-31&team=North
pub async fn get_sales_performance(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SalesPerformanceRequest>,
) -> Result<Json<SalesPerformanceResponse>, StatusCode> {
    tracing::info!(
        "D400 Dashboard: Getting sales performance (from {:?}, to {:?}, team {:?}, refresh {})",
        request.date_from,
        request.date_to,
        request.team,
        request.refresh
    );

    match service::get_sales_performance(&state, &request).await {
        Ok(response) => Ok(Json(response.as_ref().clone())),
        Err(e) => {
            tracing::error!("D400 Dashboard: Failed to get sales performance: {:#}", e);
            Err(failure_status(&e))
        }
    }
}

/// GET /api/d400/sales_performance/export
pub async fn export_leaderboard(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SalesPerformanceRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let report = service::get_sales_performance(&state, &request)
        .await
        .map_err(|e| {
            tracing::error!("D400 Dashboard: Failed to build leaderboard: {:#}", e);
            failure_status(&e)
        })?;

    let csv = service::leaderboard_csv(&report).map_err(|e| {
        tracing::error!("D400 Dashboard: Failed to write CSV: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"sales_leaderboard.csv\"",
            ),
        ],
        csv,
    ))
}

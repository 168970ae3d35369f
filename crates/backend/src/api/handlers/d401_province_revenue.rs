use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_sales_performance::SalesPerformanceRequest;
use contracts::dashboards::d401_province_revenue::ProvinceRevenueResponse;
use std::sync::Arc;

use super::failure_status;
use crate::dashboards::d401_province_revenue::service;
use crate::shared::app_state::AppState;

/// GET /api/d401/province_revenue?date_from=2024-03-01&team=North
pub async fn get_province_revenue(
    State(state): State<Arc<AppState>>,
    Query(request): Query<SalesPerformanceRequest>,
) -> Result<Json<ProvinceRevenueResponse>, StatusCode> {
    match service::get_province_revenue(&state, &request).await {
        Ok(response) => {
            tracing::info!(
                "D401 Map: {} provinces, {} unmatched names",
                response.provinces.len(),
                response.unmatched.len()
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D401 Map: Failed to get province revenue: {:#}", e);
            Err(failure_status(&e))
        }
    }
}

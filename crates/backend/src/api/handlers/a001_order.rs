use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_order::aggregate::{
    ConfirmDeliveryCostRequest, ConfirmDeliveryCostResponse,
};
use std::sync::Arc;

use super::failure_status;
use crate::domain::a001_order;
use crate::shared::app_state::AppState;
use crate::shared::data::snapshot::remote_cause;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/orders/:id/confirm_delivery_cost
pub async fn confirm_delivery_cost(
    State(state): State<Arc<AppState>>,
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(request): Json<ConfirmDeliveryCostRequest>,
) -> Result<Json<ConfirmDeliveryCostResponse>, StatusCode> {
    if let Err(e) = request.validate() {
        tracing::warn!("Order {}: rejected delivery cost: {}", id, e);
        return Err(StatusCode::BAD_REQUEST);
    }

    match a001_order::service::confirm_delivery_cost(&state, &id, &request, &claims.sub).await {
        Ok(response) => Ok(Json(response)),
        Err(e) if remote_cause(&e).map_or(false, |r| r.is_not_found()) => {
            tracing::warn!("Order {}: not found in the remote backend", id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Order {}: failed to confirm delivery cost: {:#}", id, e);
            Err(failure_status(&e))
        }
    }
}

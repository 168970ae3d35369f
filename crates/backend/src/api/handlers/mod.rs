use axum::http::StatusCode;

use crate::shared::data::snapshot::remote_cause;

// Aggregate handlers
pub mod a001_order;
pub mod a004_reference_data;

// Dashboard handlers
pub mod d400_sales_performance;
pub mod d401_province_revenue;

/// Status for a failed service call: 502 when the remote backend failed
pub(crate) fn failure_status(error: &anyhow::Error) -> StatusCode {
    if remote_cause(error).is_some() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

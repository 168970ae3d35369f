use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a004_reference_data::{ReferenceRowsResponse, ReferenceSheet};
use serde_json::Value;
use std::sync::Arc;

use super::failure_status;
use crate::domain::a004_reference_data;
use crate::shared::app_state::AppState;
use crate::shared::data::snapshot::remote_cause;
use crate::shared::ingest::Row;

fn parse_sheet(code: &str) -> Result<ReferenceSheet, StatusCode> {
    ReferenceSheet::from_code(code).ok_or_else(|| {
        tracing::warn!("Unknown reference sheet '{}'", code);
        StatusCode::BAD_REQUEST
    })
}

/// GET /api/reference/:sheet
pub async fn list_rows(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<ReferenceRowsResponse>, StatusCode> {
    let sheet = parse_sheet(&code)?;
    match a004_reference_data::service::list_rows(&state, sheet).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Reference {}: failed to list rows: {:#}", code, e);
            Err(failure_status(&e))
        }
    }
}

/// POST /api/reference/:sheet (admin only)
pub async fn append_row(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(row): Json<Row>,
) -> Result<Json<Value>, StatusCode> {
    let sheet = parse_sheet(&code)?;
    if row.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match a004_reference_data::service::append_row(&state, sheet, &row).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!("Reference {}: failed to append row: {:#}", code, e);
            Err(failure_status(&e))
        }
    }
}

/// POST /api/reference/:sheet/:id (admin only)
pub async fn update_row(
    State(state): State<Arc<AppState>>,
    Path((code, id)): Path<(String, String)>,
    Json(patch): Json<Row>,
) -> Result<Json<Value>, StatusCode> {
    let sheet = parse_sheet(&code)?;
    if patch.is_empty() || id.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    match a004_reference_data::service::update_row(&state, sheet, &id, &patch).await {
        Ok(result) => Ok(Json(result)),
        Err(e) if remote_cause(&e).map_or(false, |r| r.is_not_found()) => {
            tracing::warn!("Reference {}: row {} not found", code, id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) if remote_cause(&e).is_none() => {
            tracing::warn!("Reference {}: rejected update of {}: {:#}", code, id, e);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            tracing::error!("Reference {}: failed to update row {}: {:#}", code, id, e);
            Err(failure_status(&e))
        }
    }
}

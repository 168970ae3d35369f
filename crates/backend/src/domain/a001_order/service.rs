use anyhow::Context;
use chrono::Utc;
use contracts::domain::a001_order::aggregate::{
    ConfirmDeliveryCostRequest, ConfirmDeliveryCostResponse,
};
use serde_json::{json, Value};

use crate::shared::app_state::AppState;
use crate::shared::data::snapshot::ORDERS_SHEET;
use crate::shared::ingest::Row;

/// Подтверждение стоимости доставки по заказу
///
/// Writes the internal cost together with who confirmed it and when, then drops
/// the cached snapshot so the profit figures pick up the new cost.
pub async fn confirm_delivery_cost(
    state: &AppState,
    order_id: &str,
    request: &ConfirmDeliveryCostRequest,
    confirmed_by: &str,
) -> anyhow::Result<ConfirmDeliveryCostResponse> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let confirmed_at = Utc::now().to_rfc3339();

    let mut patch = Row::new();
    patch.insert("internalCost".into(), json!(request.internal_cost));
    patch.insert("costConfirmedBy".into(), json!(confirmed_by));
    patch.insert("costConfirmedAt".into(), json!(confirmed_at));
    if let Some(note) = request.note.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        patch.insert("costNote".into(), Value::String(note.to_string()));
    }

    state
        .source()
        .update_row(ORDERS_SHEET, order_id, &patch)
        .await
        .with_context(|| format!("Failed to update order {}", order_id))?;

    state.invalidate_snapshot().await;

    tracing::info!(
        "Order {}: delivery cost {} confirmed by {}",
        order_id,
        request.internal_cost,
        confirmed_by
    );

    Ok(ConfirmDeliveryCostResponse {
        order_id: order_id.to_string(),
        internal_cost: request.internal_cost,
        confirmed_by: confirmed_by.to_string(),
        confirmed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::test_support::test_state;
    use crate::shared::data::snapshot::{remote_cause, USERS_SHEET};
    use crate::shared::remote::memory::InMemorySheets;

    fn sheets() -> InMemorySheets {
        InMemorySheets::new()
            .with_sheet(
                ORDERS_SHEET,
                json!([{"id": "A-1", "userName": "a", "grandTotal": 500, "productCost": 100}]),
            )
            .with_sheet(USERS_SHEET, json!([]))
    }

    fn request(cost: f64) -> ConfirmDeliveryCostRequest {
        ConfirmDeliveryCostRequest {
            internal_cost: cost,
            note: Some(" xe tải ".into()),
        }
    }

    #[tokio::test]
    async fn test_confirm_writes_row_and_refreshes_snapshot() {
        let (state, source) = test_state(sheets());
        let before = state.snapshot(false).await.unwrap();
        assert_eq!(before.orders[0].internal_cost, 0.0);

        let response = confirm_delivery_cost(&state, "A-1", &request(30.0), "driver1")
            .await
            .unwrap();

        assert_eq!(response.order_id, "A-1");
        assert_eq!(response.confirmed_by, "driver1");

        let row = &source.sheet(ORDERS_SHEET)[0];
        assert_eq!(row["internalCost"], 30.0);
        assert_eq!(row["costConfirmedBy"], "driver1");
        assert_eq!(row["costNote"], "xe tải");

        let after = state.snapshot(false).await.unwrap();
        assert!(after.generation > before.generation);
        assert_eq!(after.orders[0].internal_cost, 30.0);
    }

    #[tokio::test]
    async fn test_unknown_order_is_reported() {
        let (state, _) = test_state(sheets());

        let err = confirm_delivery_cost(&state, "missing", &request(1.0), "driver1")
            .await
            .unwrap_err();

        assert!(remote_cause(&err).map(|e| e.is_not_found()).unwrap_or(false));
    }

    #[tokio::test]
    async fn test_negative_cost_is_rejected_before_write() {
        let (state, source) = test_state(sheets());

        assert!(confirm_delivery_cost(&state, "A-1", &request(-5.0), "driver1")
            .await
            .is_err());
        assert!(source.sheet(ORDERS_SHEET)[0].get("internalCost").is_none());
    }
}

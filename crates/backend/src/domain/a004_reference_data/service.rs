use anyhow::Context;
use contracts::domain::a004_reference_data::{ReferenceRowsResponse, ReferenceSheet};
use serde_json::Value;

use crate::shared::app_state::AppState;
use crate::shared::ingest::{self, Row};

/// Rows of a reference sheet with canonical lowerCamelCase keys
pub async fn list_rows(state: &AppState, sheet: ReferenceSheet) -> anyhow::Result<ReferenceRowsResponse> {
    let payload = state
        .source()
        .fetch_sheet(sheet.sheet_name())
        .await
        .with_context(|| format!("Failed to fetch {}", sheet.sheet_name()))?;

    let rows: Vec<Row> = ingest::extract_rows(&payload)
        .iter()
        .map(ingest::normalize_row)
        .collect();

    tracing::debug!("{}: {} rows", sheet.sheet_name(), rows.len());

    Ok(ReferenceRowsResponse { sheet, rows })
}

/// Append a row to a reference sheet
///
/// The users sheet is part of the dashboard snapshot, so adding a user drops
/// the cached snapshot.
pub async fn append_row(state: &AppState, sheet: ReferenceSheet, row: &Row) -> anyhow::Result<Value> {
    let row = ingest::normalize_row(row);
    if row.is_empty() {
        anyhow::bail!("Validation failed: row has no fields");
    }

    let result = state
        .source()
        .append_row(sheet.sheet_name(), &row)
        .await
        .with_context(|| format!("Failed to append to {}", sheet.sheet_name()))?;

    if sheet == ReferenceSheet::Users {
        state.invalidate_snapshot().await;
    }

    tracing::info!("{}: row appended", sheet.sheet_name());
    Ok(result)
}

/// Update fields of an existing reference row
///
/// The row is addressed by `id`; an `id` inside the patch is ignored. Editing a
/// user drops the cached snapshot like appending one does.
pub async fn update_row(
    state: &AppState,
    sheet: ReferenceSheet,
    id: &str,
    patch: &Row,
) -> anyhow::Result<Value> {
    let id = id.trim();
    if id.is_empty() {
        anyhow::bail!("Validation failed: row id is empty");
    }

    let mut patch = ingest::normalize_row(patch);
    patch.remove("id");
    if patch.is_empty() {
        anyhow::bail!("Validation failed: nothing to update");
    }

    let result = state
        .source()
        .update_row(sheet.sheet_name(), id, &patch)
        .await
        .with_context(|| format!("Failed to update {} row {}", sheet.sheet_name(), id))?;

    if sheet == ReferenceSheet::Users {
        state.invalidate_snapshot().await;
    }

    tracing::info!("{}: row {} updated ({} fields)", sheet.sheet_name(), id, patch.len());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::app_state::test_support::test_state;
    use crate::shared::data::snapshot::{remote_cause, ORDERS_SHEET, USERS_SHEET};
    use crate::shared::remote::memory::InMemorySheets;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_rows_normalizes_keys() {
        let (state, _) = test_state(InMemorySheets::new().with_sheet(
            "BankAccounts",
            json!({"rows": [{"Bank Name": "VCB", "ACCOUNT_NUMBER": "0011", "bank_name": "dup"}]}),
        ));

        let response = list_rows(&state, ReferenceSheet::BankAccounts).await.unwrap();

        assert_eq!(response.sheet, ReferenceSheet::BankAccounts);
        assert_eq!(response.rows.len(), 1);
        assert_eq!(response.rows[0]["bankName"], "VCB");
        assert_eq!(response.rows[0]["accountNumber"], "0011");
    }

    #[tokio::test]
    async fn test_append_user_invalidates_snapshot() {
        let (state, source) = test_state(
            InMemorySheets::new()
                .with_sheet(ORDERS_SHEET, json!([]))
                .with_sheet(USERS_SHEET, json!([])),
        );
        let before = state.snapshot(false).await.unwrap();
        assert!(before.users.is_empty());

        let row = json!({"User Name": "linh", "Team": "North"});
        append_row(&state, ReferenceSheet::Users, row.as_object().unwrap())
            .await
            .unwrap();

        assert_eq!(source.sheet(USERS_SHEET)[0]["userName"], "linh");
        let after = state.snapshot(false).await.unwrap();
        assert_eq!(after.users.len(), 1);
    }

    #[tokio::test]
    async fn test_update_row_patches_fields() {
        let (state, source) = test_state(InMemorySheets::new().with_sheet(
            "Drivers",
            json!([
                {"id": "d-1", "name": "Tuấn", "phone": "0901"},
                {"id": "d-2", "name": "Hải", "phone": "0902"}
            ]),
        ));

        let patch = json!({"Phone": "0999", "ID": "d-9"});
        update_row(&state, ReferenceSheet::Drivers, "d-2", patch.as_object().unwrap())
            .await
            .unwrap();

        let drivers = source.sheet("Drivers");
        assert_eq!(drivers[1]["phone"], "0999");
        assert_eq!(drivers[1]["id"], "d-2");
        assert_eq!(drivers[1]["name"], "Hải");
        assert_eq!(drivers[0]["phone"], "0901");
    }

    #[tokio::test]
    async fn test_update_user_invalidates_snapshot() {
        let (state, _) = test_state(
            InMemorySheets::new()
                .with_sheet(ORDERS_SHEET, json!([]))
                .with_sheet(USERS_SHEET, json!([{"id": "u-1", "userName": "linh", "team": "North"}])),
        );
        let before = state.snapshot(false).await.unwrap();
        assert_eq!(before.users[0].team, "North");

        let patch = json!({"team": "South"});
        update_row(&state, ReferenceSheet::Users, "u-1", patch.as_object().unwrap())
            .await
            .unwrap();

        let after = state.snapshot(false).await.unwrap();
        assert_eq!(after.users[0].team, "South");
    }

    #[tokio::test]
    async fn test_update_unknown_row_is_not_found() {
        let (state, _) = test_state(InMemorySheets::new().with_sheet("Products", json!([])));
        let patch = json!({"price": 10});

        let err = update_row(&state, ReferenceSheet::Products, "p-404", patch.as_object().unwrap())
            .await
            .unwrap_err();

        assert!(remote_cause(&err).map_or(false, |r| r.is_not_found()));
    }

    #[tokio::test]
    async fn test_update_without_fields_is_rejected() {
        let (state, _) = test_state(InMemorySheets::new());
        let only_id = json!({"id": "x"});
        assert!(update_row(&state, ReferenceSheet::Products, "p-1", only_id.as_object().unwrap())
            .await
            .is_err());
        assert!(update_row(&state, ReferenceSheet::Products, " ", only_id.as_object().unwrap())
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_append_empty_row_is_rejected() {
        let (state, _) = test_state(InMemorySheets::new());
        assert!(append_row(&state, ReferenceSheet::Drivers, &Row::new()).await.is_err());
    }
}

use contracts::domain::a004_reference_data::{ReferenceRowsResponse, ReferenceSheet};
use serde_json::{Map, Value};

use crate::shared::api_utils::{get_json, post_json};

pub async fn list_rows(sheet: ReferenceSheet, access_token: &str) -> Result<ReferenceRowsResponse, String> {
    get_json(&format!("/api/reference/{}", sheet.code()), access_token).await
}

/// Добавить строку (только администратор)
pub async fn append_row(
    sheet: ReferenceSheet,
    row: &Map<String, Value>,
    access_token: &str,
) -> Result<Value, String> {
    post_json(&format!("/api/reference/{}", sheet.code()), row, access_token).await
}

/// Изменить поля строки по id (только администратор)
pub async fn update_row(
    sheet: ReferenceSheet,
    id: &str,
    patch: &Map<String, Value>,
    access_token: &str,
) -> Result<Value, String> {
    let path = format!("/api/reference/{}/{}", sheet.code(), urlencoding::encode(id));
    post_json(&path, patch, access_token).await
}

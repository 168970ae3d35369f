use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::{RemoteError, SheetSource};
use crate::shared::ingest::Row;

/// In-memory sheets for service tests
#[derive(Default)]
pub struct InMemorySheets {
    sheets: Mutex<HashMap<String, Value>>,
    accounts: HashMap<String, (String, Value)>,
    fetches: AtomicUsize,
}

impl InMemorySheets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(self, sheet: &str, payload: Value) -> Self {
        self.sheets
            .lock()
            .unwrap()
            .insert(sheet.to_string(), payload);
        self
    }

    pub fn with_account(mut self, username: &str, password: &str, profile: Value) -> Self {
        self.accounts
            .insert(username.to_string(), (password.to_string(), profile));
        self
    }

    /// Number of `fetch_sheet` calls so far
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn sheet(&self, sheet: &str) -> Value {
        self.sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or(Value::Null)
    }
}

fn not_found(what: &str) -> RemoteError {
    RemoteError::Status {
        status: 404,
        body: format!("{} not found", what),
    }
}

#[async_trait]
impl SheetSource for InMemorySheets {
    async fn login(&self, username: &str, password: &str) -> Result<Value, RemoteError> {
        match self.accounts.get(username) {
            Some((expected, profile)) if expected == password => Ok(profile.clone()),
            _ => Err(RemoteError::Status {
                status: 401,
                body: "invalid credentials".to_string(),
            }),
        }
    }

    async fn fetch_sheet(&self, sheet: &str) -> Result<Value, RemoteError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .ok_or_else(|| not_found(sheet))
    }

    async fn append_row(&self, sheet: &str, row: &Row) -> Result<Value, RemoteError> {
        let mut sheets = self.sheets.lock().unwrap();
        let rows = sheets
            .entry(sheet.to_string())
            .or_insert_with(|| json!([]));
        match rows.as_array_mut() {
            Some(items) => {
                items.push(Value::Object(row.clone()));
                Ok(json!({ "success": true }))
            }
            None => Err(not_found(sheet)),
        }
    }

    async fn update_row(&self, sheet: &str, id: &str, patch: &Row) -> Result<Value, RemoteError> {
        let mut sheets = self.sheets.lock().unwrap();
        let items = sheets
            .get_mut(sheet)
            .and_then(|rows| rows.as_array_mut())
            .ok_or_else(|| not_found(sheet))?;

        let row = items
            .iter_mut()
            .filter_map(|item| item.as_object_mut())
            .find(|item| item.get("id").and_then(|v| v.as_str()) == Some(id))
            .ok_or_else(|| not_found(id))?;

        for (key, value) in patch {
            row.insert(key.clone(), value.clone());
        }
        Ok(Value::Object(row.clone()))
    }
}

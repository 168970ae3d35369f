//! Access to the remote sheets backend
//!
//! Everything the dashboard shows lives in the remote backend; this module is
//! the only place that talks to it.

pub mod client;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde_json::Value;

use crate::shared::ingest::Row;

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("remote backend request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode remote backend response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RemoteError {
    /// The backend refused the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, RemoteError::Status { status: 401 | 403, .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::Status { status: 404, .. })
    }
}

/// Raw JSON access to the remote sheets
///
/// Payloads are returned as-is; callers run them through
/// [`crate::shared::ingest`].
#[async_trait]
pub trait SheetSource: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Value, RemoteError>;

    async fn fetch_sheet(&self, sheet: &str) -> Result<Value, RemoteError>;

    async fn append_row(&self, sheet: &str, row: &Row) -> Result<Value, RemoteError>;

    async fn update_row(&self, sheet: &str, id: &str, patch: &Row) -> Result<Value, RemoteError>;
}

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{RemoteError, SheetSource};
use crate::shared::config::RemoteConfig;
use crate::shared::ingest::Row;

/// HTTP client for the remote sheets backend
///
/// Endpoints:
/// - `POST {base}/auth/login`
/// - `GET {base}/sheets/{sheet}`
/// - `POST {base}/sheets/{sheet}/rows`
/// - `PATCH {base}/sheets/{sheet}/rows/{id}`
pub struct RemoteBackendClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl RemoteBackendClient {
    pub fn new(config: &RemoteConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
        })
    }

    fn sheet_url(&self, sheet: &str) -> String {
        format!("{}/sheets/{}", self.base_url, urlencoding::encode(sheet))
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = request.header("Accept", "application/json");
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {}", key)),
            None => request,
        }
    }

    /// Send a request and decode the JSON body; an empty body decodes to `null`
    async fn send(&self, label: &str, request: reqwest::RequestBuilder) -> Result<Value, RemoteError> {
        let started = std::time::Instant::now();
        let response = self.authorized(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            "Remote {} -> {} in {}ms ({} bytes)",
            label,
            status.as_u16(),
            started.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            tracing::error!("Remote {} failed with {}: {}", label, status, preview(&body));
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse remote {} response: {}", label, e);
            tracing::error!("Response body: {}", preview(&body));
            RemoteError::Decode(e)
        })
    }
}

fn preview(body: &str) -> String {
    let preview: String = body.chars().take(500).collect();
    if preview.len() < body.len() {
        format!("{}...", preview)
    } else {
        preview
    }
}

#[async_trait]
impl SheetSource for RemoteBackendClient {
    async fn login(&self, username: &str, password: &str) -> Result<Value, RemoteError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = json!({ "username": username, "password": password });
        self.send("login", self.client.post(&url).json(&body)).await
    }

    async fn fetch_sheet(&self, sheet: &str) -> Result<Value, RemoteError> {
        let url = self.sheet_url(sheet);
        self.send(&format!("GET {}", sheet), self.client.get(&url)).await
    }

    async fn append_row(&self, sheet: &str, row: &Row) -> Result<Value, RemoteError> {
        let url = format!("{}/rows", self.sheet_url(sheet));
        self.send(&format!("POST {}", sheet), self.client.post(&url).json(row))
            .await
    }

    async fn update_row(&self, sheet: &str, id: &str, patch: &Row) -> Result<Value, RemoteError> {
        let url = format!("{}/rows/{}", self.sheet_url(sheet), urlencoding::encode(id));
        self.send(&format!("PATCH {}/{}", sheet, id), self.client.patch(&url).json(patch))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_url: &str, api_key: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            base_url: base_url.to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
            snapshot_ttl_secs: 60,
        }
    }

    #[test]
    fn test_sheet_url_is_encoded() {
        let client = RemoteBackendClient::new(&config("https://remote.example.com/api/", None)).unwrap();
        assert_eq!(
            client.sheet_url("Shipping Methods"),
            "https://remote.example.com/api/sheets/Shipping%20Methods"
        );
    }

    #[test]
    fn test_blank_api_key_is_dropped() {
        let client = RemoteBackendClient::new(&config("http://x", Some("  "))).unwrap();
        assert!(client.api_key.is_none());
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(600);
        assert_eq!(preview(&long).len(), 503);
        assert_eq!(preview("short"), "short");
    }
}

//! API utilities for frontend-backend communication
//!
//! Every business endpoint needs the bearer token, so the helpers here take it
//! explicitly and turn non-2xx answers into readable errors.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

fn bearer(access_token: &str) -> String {
    format!("Bearer {}", access_token)
}

/// Message for a failed response; 401 gets its own wording so the UI can react
pub fn status_message(status: u16) -> String {
    match status {
        401 => "Phiên đăng nhập đã hết hạn".to_string(),
        403 => "Không có quyền truy cập".to_string(),
        502 => "Máy chủ dữ liệu không phản hồi".to_string(),
        other => format!("HTTP error: {}", other),
    }
}

async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        Ok(response)
    } else {
        Err(status_message(response.status()))
    }
}

/// GET with authentication, JSON response
pub async fn get_json<T: DeserializeOwned>(path: &str, access_token: &str) -> Result<T, String> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET with authentication, plain text response
pub async fn get_text(path: &str, access_token: &str) -> Result<String, String> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &bearer(access_token))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    check(response)
        .await?
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {}", e))
}

/// POST a JSON body with authentication
pub async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
    access_token: &str,
) -> Result<T, String> {
    let response = Request::post(&api_url(path))
        .header("Authorization", &bearer(access_token))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        assert_eq!(status_message(401), "Phiên đăng nhập đã hết hạn");
        assert_eq!(status_message(500), "HTTP error: 500");
    }
}

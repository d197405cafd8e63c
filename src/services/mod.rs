pub mod auth_service;
pub mod lecturer_service;
pub mod module_service;
pub mod student_service;
pub mod user_service;

use crate::error::{Error, Result};
use reqwest::Response;

/// Maps a non-2xx response to `Error::Api`, preferring the backend-supplied
/// message over the caller's fallback text. The API reports errors under a
/// `detail` key; a few older endpoints use `error` instead.
pub(crate) async fn check_status(response: Response, fallback: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|body| {
            body.get("detail")
                .or_else(|| body.get("error"))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| fallback.to_string());
    tracing::debug!(status, %message, "backend rejected request");
    Err(Error::Api { status, message })
}

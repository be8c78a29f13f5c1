//! Shared request plumbing for the HTTP gateways

use quarry_core::LlmError;
use reqwest::StatusCode;
use std::time::Duration;

/// Map a transport error, keeping timeouts distinct
pub(crate) fn transport_error(error: reqwest::Error, timeout: Duration) -> LlmError {
    if error.is_timeout() {
        LlmError::Timeout(timeout.as_secs())
    } else {
        LlmError::HttpError(error.to_string())
    }
}

/// Turn a non-success response into an error
pub(crate) async fn status_error(provider: &str, response: reqwest::Response) -> LlmError {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match status {
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(error_text),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::ConfigError(format!(
            "{} rejected credentials ({}): {}",
            provider, status, error_text
        )),
        _ => LlmError::InvalidResponse(format!(
            "{} API error ({}): {}",
            provider, status, error_text
        )),
    }
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

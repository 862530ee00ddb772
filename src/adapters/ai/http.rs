//! HTTP plumbing shared by the remote completion providers.

use reqwest::{Client, Response};
use std::time::Duration;

use crate::ports::CompletionError;

/// Retry hint used when the provider gives none.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

pub(crate) fn build_client(timeout: Duration) -> Result<Client, CompletionError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CompletionError::network(format!("Failed to create HTTP client: {}", e)))
}

/// Maps a transport failure from `send()`.
pub(crate) fn send_error(err: reqwest::Error, timeout: Duration) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        CompletionError::network(format!("Connection failed: {}", err))
    } else {
        CompletionError::network(err.to_string())
    }
}

/// Passes successful responses through and turns the rest into errors.
pub(crate) async fn check_status(response: Response) -> Result<Response, CompletionError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_header = response
        .headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = response.text().await.unwrap_or_default();

    Err(status_error(status.as_u16(), &body, retry_header.as_deref()))
}

pub(crate) fn status_error(status: u16, body: &str, retry_after: Option<&str>) -> CompletionError {
    match status {
        401 | 403 => CompletionError::AuthenticationFailed,
        429 => CompletionError::rate_limited(parse_retry_after(retry_after, body)),
        400 => CompletionError::InvalidRequest(body.to_string()),
        500..=599 => CompletionError::unavailable(format!("Server error {}: {}", status, body)),
        _ => CompletionError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads the retry delay from the `Retry-After` header, then from a
/// `"retryDelay": "NNs"` field in the body.
fn parse_retry_after(header: Option<&str>, body: &str) -> u32 {
    if let Some(secs) = header.and_then(|h| h.trim().parse::<u32>().ok()) {
        return secs;
    }

    body.find("\"retryDelay\"")
        .map(|idx| &body[idx + "\"retryDelay\"".len()..])
        .and_then(|rest| {
            let digits: String = rest
                .chars()
                .skip_while(|c| !c.is_ascii_digit())
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        })
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

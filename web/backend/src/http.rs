use lyricbridge_core::FetchError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest upstream error body carried inside a `FetchError::Status`.
const MAX_ERROR_BODY: usize = 512;

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub fn transport_error(error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout(timeout)
    } else {
        FetchError::Transport(error.to_string())
    }
}

/// Body of a successful response. Anything outside 2xx becomes a
/// `FetchError::Status` carrying the status and the start of the body.
pub async fn read_body(response: Response, timeout: Duration) -> Result<String, FetchError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(e, timeout))?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            body: truncate(body),
        });
    }

    Ok(body)
}

pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

fn truncate(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}

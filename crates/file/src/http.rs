//! HTTP/HTTPS content fetching.

use crate::FetchError;

/// Issue a single blocking GET and return the full response body.
///
/// Non-success statuses become [`FetchError::HttpStatus`]; connection-level
/// failures become [`FetchError::Transport`]. One attempt, no retry or
/// backoff beyond whatever the transport default provides.
pub(crate) fn get_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let response = get_response(url)?;

    let bytes = response.bytes().map_err(|source| FetchError::Transport {
        url: url.to_string(),
        source,
    })?;

    tracing::debug!("fetched {} bytes from: {url}", bytes.len());

    Ok(bytes.to_vec())
}

/// Issue a blocking GET and hand back the response after the status check,
/// leaving the body unread for callers that only need headers.
pub(crate) fn get_response(url: &str) -> Result<reqwest::blocking::Response, FetchError> {
    let client = reqwest::blocking::Client::new();

    let response = client
        .get(url)
        .send()
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    Ok(response)
}

//! Shared request plumbing: error classification and body parsing.
//!
//! Each request is issued exactly once. Failures are classified into
//! [`AppError`] variants and handed back to the caller.

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::constants::endpoints::RUGBY_API_KEY_HEADER;
use crate::error::AppError;

/// Classifies a transport-level reqwest failure.
pub(crate) fn map_request_error(e: reqwest::Error, url: &str) -> AppError {
    error!("Request failed for URL {}: {}", url, e);
    if e.is_timeout() {
        AppError::network_timeout(url)
    } else if e.is_connect() {
        AppError::network_connection(url, e.to_string())
    } else {
        AppError::ApiFetch(e)
    }
}

/// Maps a non-success HTTP status to a specific error variant.
pub(crate) fn map_status_error(status: StatusCode, url: &str) -> AppError {
    let status_code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Unknown error");

    error!("HTTP {} - {} (URL: {})", status_code, reason, url);

    match status_code {
        404 => AppError::api_not_found(url),
        429 => AppError::api_rate_limit(reason, url),
        400..=499 => AppError::api_client_error(status_code, reason, url),
        502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
        _ => AppError::api_server_error(status_code, reason, url),
    }
}

/// Parses a response body, telling empty bodies, non-JSON and wrong shapes apart.
pub(crate) fn parse_response_text<T: DeserializeOwned>(
    response_text: &str,
    url: &str,
) -> Result<T, AppError> {
    serde_json::from_str::<T>(response_text).map_err(|e| {
        error!("Failed to parse API response: {} (URL: {})", e, url);
        let preview: String = response_text.chars().take(200).collect();
        error!("Response text (first 200 chars): {preview}");

        let trimmed = response_text.trim_start();
        if trimmed.is_empty() {
            AppError::api_no_data("Response body is empty", url)
        } else if !trimmed.starts_with('{') && !trimmed.starts_with('[') {
            AppError::api_malformed_json("Response is not valid JSON", url)
        } else {
            AppError::api_unexpected_structure(e.to_string(), url)
        }
    })
}

/// Checks the status of an already-sent request and parses its body.
pub(crate) async fn read_json_response<T: DeserializeOwned>(
    response: Response,
    url: &str,
) -> Result<T, AppError> {
    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        return Err(map_status_error(status, url));
    }

    let response_text = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        AppError::ApiFetch(e)
    })?;

    debug!("Response length: {} bytes", response_text.len());
    parse_response_text(&response_text, url)
}

/// Logs a non-empty `errors` member of a provider envelope.
///
/// API-Sports reports quota and key problems inside a 200 response, as either
/// an object or an array. Returns whether anything was reported.
pub(crate) fn warn_on_provider_errors(payload: &Value, url: &str) -> bool {
    let Some(errors) = payload.get("errors") else {
        return false;
    };
    let reported = match errors {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Null => false,
        _ => true,
    };
    if reported {
        warn!("Provider reported errors for {url}: {errors}");
    }
    reported
}

/// GETs `url` from the sports-data provider and parses the JSON body.
///
/// The API key, when present, is sent in the provider's key header. An absent
/// key still issues the request; the provider answers with an `errors` object.
#[instrument(skip(client, api_key))]
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    api_key: Option<&str>,
) -> Result<T, AppError> {
    info!("Fetching data from URL: {url}");

    let mut request = client.get(url);
    if let Some(key) = api_key {
        request = request.header(RUGBY_API_KEY_HEADER, key);
    }

    let response = request
        .send()
        .await
        .map_err(|e| map_request_error(e, url))?;

    read_json_response(response, url).await
}

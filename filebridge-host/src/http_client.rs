//! Generic HTTP client tools.
//!
//! Reusable request-processing logic shared by the host adapters. Each host
//! keeps full control of its own authentication scheme and constructs the
//! `RequestBuilder` itself; this module unifies sending, logging, timeout
//! classification and response reading.
//!
//! Transient failures are NOT retried here: adapters never retry, callers
//! decide whether to.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::HostError;

/// Maximum response-body length echoed into debug logs.
const LOG_BODY_LIMIT: usize = 2048;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a response body for logging.
///
/// Returns the original string if it's within the limit, otherwise the
/// first `LOG_BODY_LIMIT` bytes (floored to a char boundary, so multibyte
/// content never splits) with a suffix indicating the total length.
fn truncate_for_log(body: &str) -> String {
    if body.len() <= LOG_BODY_LIMIT {
        body.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &body[..floor_char_boundary(body, LOG_BODY_LIMIT)],
            body.len()
        )
    }
}

/// HTTP tool function set.
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Perform an HTTP request and return `(status_code, response_text)`.
    ///
    /// Unified processing: send, log, classify timeout vs network error,
    /// turn HTTP 429 into [`HostError::RateLimited`].
    pub(crate) async fn execute_request(
        request_builder: RequestBuilder,
        host_name: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String), HostError> {
        log::debug!("[{host_name}] {method_name} {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HostError::Timeout {
                    host: host_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                HostError::NetworkError {
                    host: host_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{host_name}] Response Status: {status_code}");

        // Extract Retry-After before consuming the response body.
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{host_name}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(HostError::RateLimited {
                host: host_name.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        let response_text = response.text().await.map_err(|e| HostError::NetworkError {
            host: host_name.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{host_name}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Perform an HTTP request and return the raw response bytes.
    ///
    /// Used for file downloads, where the body is not text. Non-2xx
    /// responses become [`HostError::Api`] carrying the host's status.
    pub(crate) async fn execute_download(
        request_builder: RequestBuilder,
        host_name: &str,
        url_or_action: &str,
    ) -> Result<(Vec<u8>, Option<String>, Option<String>), HostError> {
        log::debug!("[{host_name}] GET {url_or_action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HostError::Timeout {
                    host: host_name.to_string(),
                    detail: e.to_string(),
                }
            } else {
                HostError::NetworkError {
                    host: host_name.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[{host_name}] Response Status: {status}");

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(HostError::Api {
                host: host_name.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let content_disposition = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HostError::NetworkError {
                host: host_name.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        Ok((bytes.to_vec(), content_disposition, content_type))
    }

    /// Parse a JSON response body.
    pub(crate) fn parse_json<T>(response_text: &str, host_name: &str) -> Result<T, HostError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{host_name}] JSON parse failed: {e}");
            log::error!(
                "[{host_name}] Raw response: {}",
                truncate_for_log(response_text)
            );
            HostError::ParseError {
                host: host_name.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

//! Shared utilities used by host implementations.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;

// ============ HTTP Client ============

/// Default connect timeout (seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds). Generous because uploads and
/// downloads may be large.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with the shared timeout configuration.
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

// ============ Authentication ============

/// Build a Basic authorization header value from an API key with an empty
/// username, i.e. `Basic base64(":" + api_key)`.
pub fn basic_auth_value(api_key: &str) -> String {
    format!("Basic {}", BASE64.encode(format!(":{api_key}")))
}

// ============ Response helpers ============

/// Extract the filename from a `Content-Disposition` header value.
///
/// Handles both quoted and bare `filename=` parameters; RFC 5987
/// `filename*=` values are not needed by the supported hosts.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let marker = "filename=";
    let start = header.find(marker)? + marker.len();
    let rest = &header[start..];
    let name = rest
        .split(';')
        .next()
        .unwrap_or(rest)
        .trim()
        .trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Convert an epoch-milliseconds value to a UTC timestamp.
///
/// Out-of-range values fall back to the epoch.
pub fn epoch_millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(|| Utc.timestamp_millis_opt(0).single().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_empty_username() {
        // base64(":secret") == "OnNlY3JldA=="
        assert_eq!(basic_auth_value("secret"), "Basic OnNlY3JldA==");
    }

    #[test]
    fn content_disposition_quoted() {
        let header = r#"attachment; filename="photo.jpg""#;
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("photo.jpg")
        );
    }

    #[test]
    fn content_disposition_bare() {
        let header = "attachment; filename=photo.jpg";
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("photo.jpg")
        );
    }

    #[test]
    fn content_disposition_with_trailing_param() {
        let header = r#"attachment; filename="a b.bin"; size=42"#;
        assert_eq!(
            filename_from_content_disposition(header).as_deref(),
            Some("a b.bin")
        );
    }

    #[test]
    fn content_disposition_missing() {
        assert_eq!(filename_from_content_disposition("attachment"), None);
        assert_eq!(filename_from_content_disposition(r#"filename="""#), None);
    }

    #[test]
    fn epoch_millis_conversion() {
        let dt = epoch_millis_to_datetime(1_700_000_000_000);
        assert_eq!(dt.timestamp_millis(), 1_700_000_000_000);
    }
}

//! Pixeldrain HTTP request methods.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{HostError, Result};
use crate::hosts::common::basic_auth_value;
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, HostErrorMapper, RawApiError};

use super::{PixeldrainErrorBody, PixeldrainHost, PD_API_BASE};

impl PixeldrainHost {
    fn auth_header(&self) -> String {
        basic_auth_value(&self.api_key)
    }

    /// Translate a non-2xx response into a normalized error.
    ///
    /// Pixeldrain failure bodies carry a machine-readable `value` code;
    /// anything else is surfaced as an API error with the host's status.
    fn handle_failure(&self, status: u16, body: &str, context: ErrorContext) -> HostError {
        if let Ok(err_body) = serde_json::from_str::<PixeldrainErrorBody>(body) {
            if err_body.value.is_some() {
                let raw = RawApiError {
                    code: err_body.value,
                    message: err_body
                        .message
                        .unwrap_or_else(|| "Unknown error".to_string()),
                };
                return self.map_error(raw, context);
            }
        }
        HostError::Api {
            host: self.host_name().to_string(),
            status,
            message: if body.is_empty() {
                "Unknown error".to_string()
            } else {
                body.to_string()
            },
        }
    }

    /// Perform a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{PD_API_BASE}{path}");
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header());
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "GET", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_failure(status, &text, context));
        }
        HttpUtils::parse_json(&text, self.host_name())
    }

    /// Perform a POST request with a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{PD_API_BASE}{path}");
        let request = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .json(body);
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "POST", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_failure(status, &text, context));
        }
        HttpUtils::parse_json(&text, self.host_name())
    }

    /// Upload raw bytes with a PUT request.
    pub(crate) async fn put_bytes<T: DeserializeOwned>(
        &self,
        path: &str,
        bytes: Vec<u8>,
        mime_type: Option<&str>,
    ) -> Result<T> {
        let url = format!("{PD_API_BASE}{path}");
        let mut request = self
            .client
            .put(&url)
            .header("Authorization", self.auth_header())
            .body(bytes);
        if let Some(mime) = mime_type {
            request = request.header("Content-Type", mime.to_string());
        }
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "PUT", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_failure(status, &text, ErrorContext::default()));
        }
        HttpUtils::parse_json(&text, self.host_name())
    }

    /// Perform a DELETE request.
    pub(crate) async fn delete(&self, path: &str, context: ErrorContext) -> Result<()> {
        let url = format!("{PD_API_BASE}{path}");
        let request = self
            .client
            .delete(&url)
            .header("Authorization", self.auth_header());
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "DELETE", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_failure(status, &text, context));
        }
        Ok(())
    }

    /// Download raw bytes, returning `(content, content_disposition,
    /// content_type)`.
    pub(crate) async fn download(
        &self,
        path: &str,
    ) -> Result<(Vec<u8>, Option<String>, Option<String>)> {
        let url = format!("{PD_API_BASE}{path}");
        let request = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header());
        HttpUtils::execute_download(request, self.host_name(), &url).await
    }
}

//! Mixdrop HTTP request methods.
//!
//! Every call carries the account's `email` and `key` as query parameters;
//! successful and failed calls alike come back HTTP 200 wrapped in the
//! `{success, result}` envelope, so classification happens on the envelope
//! rather than the status line.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::error::{HostError, Result};
use crate::http_client::HttpUtils;
use crate::traits::{ErrorContext, HostErrorMapper, RawApiError};
use crate::types::FileBlob;

use super::{
    MixdropEnvelope, MixdropErrorResult, MixdropHost, MixdropUploadResult, MD_API_BASE,
    MD_DOWNLOAD_BASE, MD_UPLOAD_URL,
};

impl MixdropHost {
    fn credentials_query(&self) -> [(&'static str, &str); 2] {
        [("email", self.email.as_str()), ("key", self.api_key.as_str())]
    }

    /// Unwrap the `{success, result}` envelope.
    ///
    /// On `success: false` the error message inside `result` is mapped into
    /// the unified taxonomy.
    fn parse_envelope<T: DeserializeOwned>(
        &self,
        response_text: &str,
        context: ErrorContext,
    ) -> Result<T> {
        let envelope: MixdropEnvelope = HttpUtils::parse_json(response_text, self.host_name())?;
        if !envelope.success {
            let msg = serde_json::from_value::<MixdropErrorResult>(envelope.result)
                .ok()
                .and_then(|e| e.msg)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(self.map_error(RawApiError::new(msg), context));
        }
        serde_json::from_value(envelope.result).map_err(|e| self.parse_error(e))
    }

    fn handle_http_failure(&self, status: u16, body: &str, context: ErrorContext) -> HostError {
        // Even non-2xx bodies usually carry the envelope.
        if let Ok(envelope) = serde_json::from_str::<MixdropEnvelope>(body) {
            if let Ok(err) = serde_json::from_value::<MixdropErrorResult>(envelope.result) {
                if let Some(msg) = err.msg {
                    return self.map_error(RawApiError::new(msg), context);
                }
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

    /// Perform an authenticated GET against the REST API.
    pub(crate) async fn get_api<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
        context: ErrorContext,
    ) -> Result<T> {
        let url = format!("{MD_API_BASE}{path}");
        let request = self
            .client
            .get(&url)
            .query(&self.credentials_query())
            .query(extra_params);
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "GET", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_http_failure(status, &text, context));
        }
        self.parse_envelope(&text, context)
    }

    /// Perform an authenticated DELETE against the REST API.
    ///
    /// The envelope is still checked; the `result` payload is discarded.
    pub(crate) async fn delete_api(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
        context: ErrorContext,
    ) -> Result<()> {
        let url = format!("{MD_API_BASE}{path}");
        let request = self
            .client
            .delete(&url)
            .query(&self.credentials_query())
            .query(extra_params);
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "DELETE", &url).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_http_failure(status, &text, context));
        }
        let _: serde_json::Value = self.parse_envelope(&text, context)?;
        Ok(())
    }

    /// Upload one file through the dedicated upload endpoint.
    pub(crate) async fn upload_multipart(
        &self,
        file: FileBlob,
        folder_id: Option<&str>,
    ) -> Result<MixdropUploadResult> {
        let mut part = Part::bytes(file.content).file_name(file.name.clone());
        if let Some(mime) = &file.mime_type {
            part = part.mime_str(mime).map_err(|e| self.parse_error(e))?;
        }
        let mut form = Form::new()
            .text("email", self.email.clone())
            .text("key", self.api_key.clone())
            .part("file", part);
        if let Some(id) = folder_id {
            form = form.text("folder", id.to_string());
        }
        let request = self.client.post(MD_UPLOAD_URL).multipart(form);
        let (status, text) =
            HttpUtils::execute_request(request, self.host_name(), "POST", MD_UPLOAD_URL).await?;
        if !(200..300).contains(&status) {
            return Err(self.handle_http_failure(status, &text, ErrorContext::default()));
        }
        self.parse_envelope(&text, ErrorContext::default())
    }

    /// Download raw bytes, returning `(content, content_disposition,
    /// content_type)`. Downloads go through their own API base.
    pub(crate) async fn download(
        &self,
        file_id: &str,
    ) -> Result<(Vec<u8>, Option<String>, Option<String>)> {
        let url = format!("{MD_DOWNLOAD_BASE}/file/{file_id}?download");
        let request = self.client.get(&url).query(&self.credentials_query());
        HttpUtils::execute_download(request, self.host_name(), &url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> MixdropHost {
        MixdropHost::new("me@example.com".to_string(), "k".to_string())
    }

    #[test]
    fn envelope_success_unwraps_result() {
        let text = r#"{"success": true, "result": {"id": "f42"}}"#;
        let parsed: super::super::MixdropCreatedFolder = host()
            .parse_envelope(text, ErrorContext::default())
            .unwrap();
        assert_eq!(parsed.id, "f42");
    }

    #[test]
    fn envelope_failure_maps_message() {
        let text = r#"{"success": false, "result": {"msg": "Invalid email or key"}}"#;
        let err = host()
            .parse_envelope::<serde_json::Value>(text, ErrorContext::default())
            .unwrap_err();
        assert!(matches!(err, HostError::InvalidCredentials { .. }));
    }

    #[test]
    fn envelope_failure_without_message_is_unknown() {
        let text = r#"{"success": false}"#;
        let err = host()
            .parse_envelope::<serde_json::Value>(text, ErrorContext::default())
            .unwrap_err();
        assert!(matches!(
            err,
            HostError::Unknown { raw_message, .. } if raw_message == "Unknown error"
        ));
    }

    #[test]
    fn envelope_result_shape_mismatch_is_parse_error() {
        let text = r#"{"success": true, "result": "nope"}"#;
        let err = host()
            .parse_envelope::<super::super::MixdropCreatedFolder>(text, ErrorContext::default())
            .unwrap_err();
        assert!(matches!(err, HostError::ParseError { .. }));
    }
}

//! Anonymous credential token codec
//!
//! Lets a visitor without an account carry their per-host credentials in a
//! signed, self-contained token instead of server-side storage. The token
//! is `base64url(payload) + "." + base64url(hmac_sha256(secret, payload))`;
//! the payload is the JSON credential list plus issue/expiry timestamps.
//!
//! The signing key is process-wide, provisioned at startup and never
//! rotated at runtime; rotating it invalidates all outstanding tokens,
//! which is acceptable for anonymous sessions.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{CoreError, CoreResult};
use crate::types::Credential;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Signed token contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    /// The embedded credential list.
    pub api_data: Vec<Credential>,
    /// Issue time, epoch seconds.
    pub iat: i64,
    /// Expiry time, epoch seconds.
    pub exp: i64,
}

/// Encoder/decoder for anonymous credential tokens.
pub struct TokenCodec {
    secret: Vec<u8>,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Create a codec with the default lifetime.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self::with_ttl(secret, DEFAULT_TOKEN_TTL_SECS)
    }

    /// Create a codec with an explicit lifetime in seconds.
    #[must_use]
    pub fn with_ttl(secret: impl Into<Vec<u8>>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    fn mac(&self) -> CoreResult<HmacSha256> {
        HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| CoreError::InternalError(format!("HMAC key setup failed: {e}")))
    }

    /// Sign a credential list into a fresh token.
    pub fn encode(&self, credentials: Vec<Credential>) -> CoreResult<String> {
        let now = Utc::now().timestamp();
        let payload = TokenPayload {
            api_data: credentials,
            iat: now,
            exp: now + self.ttl_secs,
        };
        let json = serde_json::to_vec(&payload)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload_b64.as_bytes());
        let signature_b64 = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    /// Verify and decode a token.
    ///
    /// Signature verification is constant-time and happens before the
    /// payload is parsed; an expired but otherwise valid token is the only
    /// case reported as `TokenExpired`.
    pub fn decode(&self, token: &str) -> CoreResult<TokenPayload> {
        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or_else(|| CoreError::InvalidToken("missing signature".to_string()))?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| CoreError::InvalidToken("malformed signature".to_string()))?;
        let mut mac = self.mac()?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| CoreError::InvalidToken("signature mismatch".to_string()))?;

        let json = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| CoreError::InvalidToken("malformed payload".to_string()))?;
        let payload: TokenPayload = serde_json::from_slice(&json)
            .map_err(|e| CoreError::InvalidToken(format!("payload parse failed: {e}")))?;

        if payload.exp < Utc::now().timestamp() {
            return Err(CoreError::TokenExpired);
        }
        Ok(payload)
    }
}

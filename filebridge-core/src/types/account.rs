//! Account storage contract
//!
//! Sign-up and sign-in flows live above this crate; the type exists as the
//! shape the storage layer persists and the services read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Credential;

/// A registered account with its per-host credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Account ID (UUID)
    pub id: String,
    /// Display name
    pub username: String,
    /// Account email
    pub email: String,
    /// Password hash. Never serialized; the hashing scheme is the
    /// authentication layer's concern.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Per-host credentials, host-unique.
    #[serde(default)]
    pub credentials: Vec<Credential>,
    /// Creation time
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update time
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// A fresh account with a generated ID and an empty credential list.
    #[must_use]
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            credentials: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_account_has_id_and_no_credentials() {
        let a = Account::new(
            "u".to_string(),
            "u@example.com".to_string(),
            "h".to_string(),
        );
        assert!(!a.id.is_empty());
        assert!(a.credentials.is_empty());
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn password_hash_never_serialized() {
        let account = Account {
            id: "a1".to_string(),
            username: "u".to_string(),
            email: "u@example.com".to_string(),
            password_hash: "argon2-blob".to_string(),
            credentials: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2-blob"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn deserializes_without_hash_or_credentials() {
        let json = r#"{
            "id": "a1",
            "username": "u",
            "email": "u@example.com",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert!(account.password_hash.is_empty());
        assert!(account.credentials.is_empty());
    }
}

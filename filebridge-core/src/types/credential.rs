//! Per-host credential records and list operations
//!
//! A credential list is the unit both storage backends share: accounts
//! persist one, anonymous tokens embed one. The pure list operations here
//! keep the list host-unique regardless of which backend holds it.

use serde::{Deserialize, Serialize};

use filebridge_host::{get_all_host_metadata, HostCredentials, HostType};

use crate::error::{CoreError, CoreResult};

/// One stored credential for one host.
///
/// `host` is stored lower-case. An empty `api_key` means "no credential";
/// the record may exist as a form scaffold without being usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    /// Host identifier, lower-case.
    pub host: String,
    /// Account API key. Empty means absent.
    #[serde(rename = "apiKey")]
    pub api_key: String,
    /// Account email, for hosts that authenticate with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Credential {
    /// An empty scaffold entry for a host.
    #[must_use]
    pub fn empty(host: HostType) -> Self {
        Self {
            host: host.to_string(),
            api_key: String::new(),
            email: None,
        }
    }

    /// Whether the record holds a usable key.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Convert the stored record into typed host credentials.
    ///
    /// An empty key is `CredentialMissing`, an unrecognized host is
    /// `UnsupportedHost`, and a Mixdrop record without an email fails
    /// validation before any network call.
    pub fn to_host_credentials(&self) -> CoreResult<HostCredentials> {
        if !self.is_present() {
            return Err(CoreError::CredentialMissing(self.host.clone()));
        }
        let host: HostType = self
            .host
            .parse()
            .map_err(|()| CoreError::UnsupportedHost(self.host.clone()))?;
        match host {
            HostType::Pixeldrain => Ok(HostCredentials::Pixeldrain {
                api_key: self.api_key.clone(),
            }),
            HostType::Mixdrop => {
                let email = self
                    .email
                    .as_deref()
                    .map(str::trim)
                    .filter(|e| !e.is_empty())
                    .ok_or_else(|| {
                        CoreError::ValidationError("mixdrop requires an email".to_string())
                    })?;
                Ok(HostCredentials::Mixdrop {
                    email: email.to_string(),
                    api_key: self.api_key.clone(),
                })
            }
        }
    }
}

/// Find a credential by host, case-insensitively.
#[must_use]
pub fn find_credential<'a>(list: &'a [Credential], host: &str) -> Option<&'a Credential> {
    list.iter().find(|c| c.host.eq_ignore_ascii_case(host))
}

/// Insert or replace a credential, keeping the list host-unique.
///
/// An existing entry is replaced in place so the list order is stable; a
/// new host is appended. The entry's host is normalized to lower-case.
pub fn upsert_credential(list: &mut Vec<Credential>, mut entry: Credential) {
    entry.host = entry.host.to_ascii_lowercase();
    if let Some(existing) = list
        .iter_mut()
        .find(|c| c.host.eq_ignore_ascii_case(&entry.host))
    {
        *existing = entry;
    } else {
        list.push(entry);
    }
}

/// Remove a credential by host. No-op when the host has no entry.
pub fn remove_credential(list: &mut Vec<Credential>, host: &str) {
    list.retain(|c| !c.host.eq_ignore_ascii_case(host));
}

/// One empty scaffold entry per supported host, for rendering a fresh
/// credential form.
#[must_use]
pub fn default_credentials() -> Vec<Credential> {
    get_all_host_metadata()
        .into_iter()
        .map(|meta| Credential::empty(meta.host))
        .collect()
}

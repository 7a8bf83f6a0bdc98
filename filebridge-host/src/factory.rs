//! Host factory functions and metadata.

use std::sync::Arc;

use crate::traits::HostAdapter;
use crate::types::{HostCredentials, HostMetadata};

#[cfg(feature = "mixdrop")]
use crate::hosts::MixdropHost;
#[cfg(feature = "pixeldrain")]
use crate::hosts::PixeldrainHost;

/// Creates a [`HostAdapter`] instance from the given credentials.
///
/// The concrete adapter type is determined by the [`HostCredentials`]
/// variant. The returned adapter is wrapped in `Arc<dyn HostAdapter>` for
/// easy sharing across async tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use filebridge_host::{create_adapter, HostCredentials};
///
/// let adapter = create_adapter(HostCredentials::Pixeldrain {
///     api_key: "your-key".to_string(),
/// });
/// ```
pub fn create_adapter(credentials: HostCredentials) -> Arc<dyn HostAdapter> {
    match credentials {
        #[cfg(feature = "pixeldrain")]
        HostCredentials::Pixeldrain { api_key } => Arc::new(PixeldrainHost::new(api_key)),
        #[cfg(feature = "mixdrop")]
        HostCredentials::Mixdrop { email, api_key } => {
            Arc::new(MixdropHost::new(email, api_key))
        }
    }
}

/// Returns metadata for all hosts enabled via feature flags.
///
/// Useful for building dynamic UIs that enumerate available hosts and
/// their required credential fields.
pub fn get_all_host_metadata() -> Vec<HostMetadata> {
    vec![
        #[cfg(feature = "pixeldrain")]
        PixeldrainHost::metadata(),
        #[cfg(feature = "mixdrop")]
        MixdropHost::metadata(),
    ]
}

//! File-host implementations

/// Shared utilities used by host implementations.
pub mod common;

#[cfg(feature = "mixdrop")]
mod mixdrop;
#[cfg(feature = "pixeldrain")]
mod pixeldrain;

#[cfg(feature = "mixdrop")]
pub use mixdrop::MixdropHost;
#[cfg(feature = "pixeldrain")]
pub use pixeldrain::PixeldrainHost;

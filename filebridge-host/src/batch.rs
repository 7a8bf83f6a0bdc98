//! Bounded-concurrency batch execution.
//!
//! Runs N independent host calls, collecting per-item outcomes without
//! aborting the whole batch on a single failure. Dispatch can optionally be
//! staggered to smooth bursty hosts, or bounded with a semaphore.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::error::{HostError, Result};

/// Stagger applied to multi-file downloads by default.
pub const DEFAULT_DOWNLOAD_STAGGER: Duration = Duration::from_millis(500);

/// Options controlling batch dispatch.
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// When set, the N-th item's dispatch is delayed by `N * delay`.
    pub delay: Option<Duration>,
    /// When set, at most this many operations are in flight at once.
    pub max_concurrent: Option<usize>,
}

impl BatchOptions {
    /// Staggered dispatch with the given per-item delay.
    #[must_use]
    pub fn staggered(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            max_concurrent: None,
        }
    }

    /// Bounded concurrency with the given in-flight limit.
    #[must_use]
    pub fn bounded(max_concurrent: usize) -> Self {
        Self {
            delay: None,
            max_concurrent: Some(max_concurrent),
        }
    }
}

/// Run one operation per input, concurrently, collecting per-item results.
///
/// The output vector's length and order always match the input's, regardless
/// of individual failures and of which call finishes first.
pub async fn run_batch<I, T, F, Fut>(
    inputs: Vec<I>,
    op: F,
    options: &BatchOptions,
) -> Vec<Result<T>>
where
    F: Fn(I) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let semaphore = options
        .max_concurrent
        .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

    let futures: Vec<_> = inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let fut = op(input);
            let semaphore = semaphore.clone();
            let delay = options.delay.map(|d| d * u32::try_from(index).unwrap_or(u32::MAX));
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                // Acquire never fails while the semaphore is open; the
                // permit is held for the duration of the call.
                let _permit = match &semaphore {
                    Some(s) => s.acquire().await.ok(),
                    None => None,
                };
                fut.await
            }
        })
        .collect();

    futures::future::join_all(futures).await
}

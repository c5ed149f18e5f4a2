use crate::domain::model::{FetchResult, NormalizedCode};
use crate::domain::ports::Provider;
use crate::utils::error::ProviderError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

type FetchFn =
    dyn Fn(&NormalizedCode) -> std::result::Result<FetchResult, ProviderError> + Send + Sync;

/// Scripted provider for tests: waits `delay`, then returns whatever the
/// closure produces. Cancellation during the delay yields
/// [`ProviderError::Cancelled`].
#[derive(Clone)]
pub struct MockProvider {
    name: String,
    delay: Duration,
    fetch_fn: Arc<FetchFn>,
    calls: Arc<AtomicUsize>,
    cancellations: Arc<AtomicUsize>,
}

impl MockProvider {
    pub fn new<F>(name: impl Into<String>, delay: Duration, fetch_fn: F) -> Self
    where
        F: Fn(&NormalizedCode) -> std::result::Result<FetchResult, ProviderError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            delay,
            fetch_fn: Arc::new(fetch_fn),
            calls: Arc::new(AtomicUsize::new(0)),
            cancellations: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn succeeding(name: impl Into<String>, payload: impl Into<String>, delay: Duration) -> Self {
        let name = name.into();
        let payload = payload.into();
        let source = name.clone();
        Self::new(name, delay, move |_| {
            Ok(FetchResult::new(source.clone(), payload.clone()))
        })
    }

    pub fn failing(name: impl Into<String>, message: impl Into<String>, delay: Duration) -> Self {
        let message = message.into();
        Self::new(name, delay, move |_| Err(ProviderError::Other(message.clone())))
    }

    /// How many times `fetch` has been entered.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// How many fetches ended because the token fired.
    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn fetch(
        &self,
        code: &NormalizedCode,
        cancel: CancellationToken,
    ) -> std::result::Result<FetchResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        tokio::select! {
            _ = tokio::time::sleep(self.delay) => (self.fetch_fn)(code),
            _ = cancel.cancelled() => {
                self.cancellations.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::Cancelled)
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

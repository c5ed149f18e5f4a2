use crate::domain::model::{FetchResult, NormalizedCode};
use crate::utils::error::ProviderError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A data source able to look up a normalized CEP.
///
/// Implementations hold no mutable shared state and may be invoked from many
/// races at once. `fetch` must watch `cancel` and return
/// [`ProviderError::Cancelled`] promptly once it fires.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn fetch(
        &self,
        code: &NormalizedCode,
        cancel: CancellationToken,
    ) -> std::result::Result<FetchResult, ProviderError>;

    /// Stable label used for logging and attribution only.
    fn name(&self) -> &str;
}

pub type SharedProvider = Arc<dyn Provider>;

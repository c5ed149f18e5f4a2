use crate::core::race::race;
use crate::core::validator::validate_cep;
use crate::domain::model::{FetchResult, RaceOutcome};
use crate::domain::ports::{Provider, SharedProvider};
use crate::utils::error::Result;
use std::time::Duration;

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(1);

/// Validates `raw_input` and races `providers` with the default one second
/// deadline.
pub async fn resolve(raw_input: &str, providers: &[SharedProvider]) -> Result<FetchResult> {
    Resolver::new(providers.to_vec()).resolve(raw_input).await
}

/// A provider set bound to a deadline, reusable across lookups.
#[derive(Clone)]
pub struct Resolver {
    providers: Vec<SharedProvider>,
    deadline: Duration,
}

impl Resolver {
    pub fn new(providers: Vec<SharedProvider>) -> Self {
        Self {
            providers,
            deadline: DEFAULT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Runs validation and the race, reporting the result as a [`RaceOutcome`].
    pub async fn race_input(&self, raw_input: &str) -> RaceOutcome {
        match validate_cep(raw_input) {
            Ok(code) => race(&code, &self.providers, self.deadline).await,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected input before racing");
                RaceOutcome::ValidationFailed {
                    input: raw_input.to_string(),
                }
            }
        }
    }

    pub async fn resolve(&self, raw_input: &str) -> Result<FetchResult> {
        self.race_input(raw_input).await.into_result()
    }
}

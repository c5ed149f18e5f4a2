pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliArgs;
pub use crate::config::RaceConfig;

pub use crate::adapters::{HttpProvider, MockProvider};
pub use crate::core::race::race;
pub use crate::core::resolver::{resolve, Resolver, DEFAULT_DEADLINE};
pub use crate::core::validator::validate_cep;
pub use crate::domain::model::{FetchResult, NormalizedCode, RaceOutcome};
pub use crate::domain::ports::{Provider, SharedProvider};
pub use crate::utils::error::{CepError, ProviderError, Result};

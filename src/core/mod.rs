pub mod race;
pub mod resolver;
pub mod validator;

pub use crate::domain::model::{FetchResult, NormalizedCode, RaceOutcome};
pub use crate::domain::ports::{Provider, SharedProvider};
pub use crate::utils::error::Result;

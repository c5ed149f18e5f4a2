use crate::utils::error::{CepError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A Brazilian postal code reduced to exactly 8 ASCII digits.
///
/// Only [`crate::core::validator::validate_cep`] constructs one, so holding a
/// `NormalizedCode` proves the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedCode(String);

impl NormalizedCode {
    pub(crate) fn new_unchecked(digits: String) -> Self {
        debug_assert!(digits.len() == 8 && digits.bytes().all(|b| b.is_ascii_digit()));
        Self(digits)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A payload delivered by one provider. The payload is opaque: it is never
/// parsed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub source: String,
    pub payload: String,
}

impl FetchResult {
    pub fn new(source: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            payload: payload.into(),
        }
    }
}

/// Terminal decision of a single race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    Winner(FetchResult),
    Timeout { deadline: Duration },
    NoValidResponse,
    ValidationFailed { input: String },
}

impl RaceOutcome {
    pub fn is_winner(&self) -> bool {
        matches!(self, RaceOutcome::Winner(_))
    }

    pub fn winner(&self) -> Option<&FetchResult> {
        match self {
            RaceOutcome::Winner(result) => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Result<FetchResult> {
        match self {
            RaceOutcome::Winner(result) => Ok(result),
            RaceOutcome::Timeout { deadline } => Err(CepError::Timeout { deadline }),
            RaceOutcome::NoValidResponse => Err(CepError::NoValidResponse),
            RaceOutcome::ValidationFailed { input } => Err(CepError::InvalidFormat { input }),
        }
    }
}

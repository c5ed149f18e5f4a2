use crate::utils::error::{CepError, Result};
use regex::Regex;
use std::collections::HashSet;
use url::Url;

/// Placeholder substituted with the normalized CEP in provider URL templates.
pub const CEP_PLACEHOLDER: &str = "{cep}";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CepError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// A provider URL template must carry `{cep}`, no other `{...}` placeholder,
/// and render to a valid http(s) URL.
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    let re = Regex::new(r"\{([^{}]*)\}").map_err(|e| CepError::ConfigError {
        message: format!("placeholder pattern: {}", e),
    })?;

    for caps in re.captures_iter(template) {
        if &caps[0] != CEP_PLACEHOLDER {
            return Err(CepError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: template.to_string(),
                reason: format!("Unknown placeholder '{}', only {} is supported", &caps[0], CEP_PLACEHOLDER),
            });
        }
    }

    if !template.contains(CEP_PLACEHOLDER) {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: format!("Template must contain the {} placeholder", CEP_PLACEHOLDER),
        });
    }

    validate_url(field_name, &template.replace(CEP_PLACEHOLDER, "00000000"))
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(CepError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Duplicate provider name".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(CepError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("url", "https://example.com").is_ok());
        assert!(validate_url("url", "http://example.com").is_ok());
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "invalid-url").is_err());
        assert!(validate_url("url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_template() {
        assert!(validate_url_template("t", "https://brasilapi.com.br/api/cep/v1/{cep}").is_ok());
        assert!(validate_url_template("t", "http://viacep.com.br/ws/{cep}/json/").is_ok());
        assert!(validate_url_template("t", "https://example.com/lookup").is_err());
        assert!(validate_url_template("t", "https://example.com/{zip}").is_err());
        assert!(validate_url_template("t", "https://example.com/{cep}/{}").is_err());
        assert!(validate_url_template("t", "ftp://example.com/{cep}").is_err());
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("providers", ["A", "B"]).is_ok());
        assert!(validate_unique_names("providers", ["A", "B", "A"]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("race.deadline_ms", 1000u64, 1, 60_000).is_ok());
        assert!(validate_range("race.deadline_ms", 0u64, 1, 60_000).is_err());
        assert!(validate_range("race.deadline_ms", 60_001u64, 1, 60_000).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("http.request_timeout_ms", 5, 1).is_ok());
        assert!(validate_positive_number("http.request_timeout_ms", 0, 1).is_err());
    }
}

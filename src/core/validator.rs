use crate::domain::model::NormalizedCode;
use crate::utils::error::{CepError, Result};

pub const CEP_DIGITS: usize = 8;

/// Strips every non-digit character and requires exactly 8 digits to remain.
///
/// Only ASCII `0-9` count as digits; other Unicode digits are stripped.
pub fn validate_cep(input: &str) -> Result<NormalizedCode> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    if digits.len() != CEP_DIGITS {
        return Err(CepError::InvalidFormat {
            input: input.to_string(),
        });
    }

    Ok(NormalizedCode::new_unchecked(digits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_cep() {
        let cases = [
            ("plain", "01001000", Some("01001000")),
            ("masked", "12345-678", Some("12345678")),
            ("surrounding spaces", " 12345678 ", Some("12345678")),
            ("letters around", "abc01001000def", Some("01001000")),
            ("dots and hyphen", "01.001-000", Some("01001000")),
            ("too short", "12345", None),
            ("too long", "123456789", None),
            ("letters replace digits", "12345-abc", None),
            ("empty", "", None),
            ("no digits at all", "cep-abc", None),
            ("non ascii digits", "١٢٣٤٥٦٧٨", None),
        ];

        for (name, input, expected) in cases {
            let got = validate_cep(input);
            match expected {
                Some(want) => assert_eq!(got.unwrap().as_str(), want, "case: {}", name),
                None => assert!(
                    matches!(got, Err(CepError::InvalidFormat { .. })),
                    "case: {}",
                    name
                ),
            }
        }
    }

    #[test]
    fn test_validate_cep_is_idempotent() {
        let first = validate_cep("01310-100").unwrap();
        let second = validate_cep(first.as_str()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_format_keeps_raw_input() {
        match validate_cep("12-34") {
            Err(CepError::InvalidFormat { input }) => assert_eq!(input, "12-34"),
            other => panic!("expected InvalidFormat, got {:?}", other),
        }
    }
}

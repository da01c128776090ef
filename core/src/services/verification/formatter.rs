//! Phone input normalization

use pv_shared::utils::phone::digits_only;

use crate::domain::entities::PhoneNumber;
use crate::errors::ValidationError;

use super::config::FlowConfig;

/// Turns what the user typed into a canonical [`PhoneNumber`].
///
/// Only local digits are accepted. Separators are dropped, but input that
/// already carries the country code is rejected as the wrong length.
#[derive(Debug, Clone)]
pub struct PhoneFormatter {
    country_code: String,
    local_digits: usize,
}

impl PhoneFormatter {
    pub fn new(country_code: impl Into<String>, local_digits: usize) -> Self {
        Self {
            country_code: country_code.into(),
            local_digits,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        Self::new(config.country_code.clone(), config.local_digits)
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn normalize(&self, raw: &str) -> Result<PhoneNumber, ValidationError> {
        let digits = digits_only(raw);
        if digits.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            });
        }
        if digits.len() != self.local_digits {
            return Err(ValidationError::WrongLength {
                field: "phone".to_string(),
                expected: self.local_digits,
                actual: digits.len(),
            });
        }
        Ok(PhoneNumber::from_parts(&self.country_code, &digits))
    }
}

impl Default for PhoneFormatter {
    fn default() -> Self {
        Self::from_config(&FlowConfig::default())
    }
}

/// Check a submitted code: exactly `length` ASCII digits after trimming
pub fn validate_code(code: &str, length: usize) -> Result<String, ValidationError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "code".to_string(),
        });
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
        });
    }
    if trimmed.len() != length {
        return Err(ValidationError::WrongLength {
            field: "code".to_string(),
            expected: length,
            actual: trimmed.len(),
        });
    }
    Ok(trimmed.to_string())
}

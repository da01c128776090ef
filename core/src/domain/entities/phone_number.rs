//! Canonical phone number value.

use serde::{Deserialize, Serialize};
use std::fmt;

use pv_shared::utils::phone::is_valid_e164;

use crate::errors::ValidationError;

/// Country code of the supported market
pub const DEFAULT_COUNTRY_CODE: &str = "+91";

/// Number of local digits accepted for the supported market
pub const LOCAL_DIGITS: usize = 10;

/// A phone number in E.164 form.
///
/// The inner string always starts with `+` followed by the country code and
/// subscriber digits. Values can only be obtained through the validating
/// constructors, so holding a `PhoneNumber` is proof of a well-formed number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse a number that is already in E.164 form (`+919876543210`).
    pub fn parse_e164(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            });
        }
        if !is_valid_e164(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Join an already validated country code and digit string.
    pub(crate) fn from_parts(country_code: &str, digits: &str) -> Self {
        Self(format!("{}{}", country_code, digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Masked form for logs, e.g. `+91****3210`
    pub fn masked(&self) -> String {
        pv_shared::utils::phone::mask_phone_number(&self.0)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_e164(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(phone: PhoneNumber) -> Self {
        phone.0
    }
}

//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164: '+', country code without a leading zero, 7 to 15 digits in total
static E164_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{6,14}$").expect("E.164 pattern is a valid regex")
});

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Keep only the ASCII digits of the input
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a phone number is in E.164 format, exactly as given
pub fn is_valid_e164(phone: &str) -> bool {
    E164_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g., +91****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

//! Domain entities representing core business objects.

pub mod phone_number;
pub mod profile;
pub mod verification_attempt;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use phone_number::{PhoneNumber, DEFAULT_COUNTRY_CODE, LOCAL_DIGITS};
pub use profile::{AuthenticatedUser, Profile, ProfileVerificationRecord};
pub use verification_attempt::{
    Channel, VerificationAttempt, VerificationStatus, CODE_LENGTH, RESEND_COOLDOWN_SECONDS,
};

//! Verification attempt entity: one in-flight OTP challenge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::phone_number::PhoneNumber;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Minimum seconds between two code sends for one phone
pub const RESEND_COOLDOWN_SECONDS: u64 = 60;

/// Delivery channel requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Text message
    #[default]
    Sms,
    /// Voice call reading out the code
    Call,
    /// WhatsApp message
    Whatsapp,
}

impl Channel {
    /// Channel name as understood by the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Call => "call",
            Channel::Whatsapp => "whatsapp",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sms" => Ok(Channel::Sms),
            "call" | "voice" => Ok(Channel::Call),
            "whatsapp" => Ok(Channel::Whatsapp),
            other => Err(format!("Unsupported channel: {}", other)),
        }
    }
}

/// Last known authoritative state of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Code sent, waiting for the user
    Pending,
    /// Provider accepted the submitted code
    Approved,
    /// Provider rejected the submitted code (mismatch or expiry)
    Denied,
    /// The last provider call failed
    ProviderError,
}

/// One in-flight challenge.
///
/// Attempts are replaced, never reused, when the user asks for a new code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationAttempt {
    /// Local identifier, used to correlate log lines
    pub id: Uuid,

    /// Phone the code was sent to
    pub phone: PhoneNumber,

    /// Delivery channel
    pub channel: Channel,

    /// Last known provider status
    pub status: VerificationStatus,

    /// When the provider accepted the start request
    pub started_at: DateTime<Utc>,

    /// Earliest moment a new code may be requested
    pub resend_available_at: DateTime<Utc>,
}

impl VerificationAttempt {
    /// Creates a pending attempt
    pub fn new(
        phone: PhoneNumber,
        channel: Channel,
        started_at: DateTime<Utc>,
        resend_available_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            phone,
            channel,
            status: VerificationStatus::Pending,
            started_at,
            resend_available_at,
        }
    }

    /// Whether a new code may be requested at `now`
    pub fn can_resend_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.resend_available_at
    }

    /// Whole seconds until resend is allowed, rounded up; zero once available
    pub fn seconds_until_resend(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.resend_available_at - now;
        let millis = remaining.num_milliseconds();
        if millis <= 0 {
            0
        } else {
            ((millis + 999) / 1000) as u64
        }
    }
}

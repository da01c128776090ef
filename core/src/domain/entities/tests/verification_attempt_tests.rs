//! Tests for verification attempts and channels

use chrono::{Duration, TimeZone, Utc};

use crate::domain::entities::{Channel, PhoneNumber, VerificationAttempt, VerificationStatus};

fn attempt_at_noon() -> VerificationAttempt {
    let started = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    VerificationAttempt::new(
        PhoneNumber::parse_e164("+919876543210").unwrap(),
        Channel::Sms,
        started,
        started + Duration::seconds(60),
    )
}

#[test]
fn test_new_attempt_is_pending() {
    let attempt = attempt_at_noon();
    assert_eq!(attempt.status, VerificationStatus::Pending);
    assert_eq!(attempt.channel, Channel::Sms);
}

#[test]
fn test_resend_window() {
    let attempt = attempt_at_noon();
    let start = attempt.started_at;

    assert!(!attempt.can_resend_at(start));
    assert_eq!(attempt.seconds_until_resend(start), 60);

    let almost = start + Duration::milliseconds(59_001);
    assert!(!attempt.can_resend_at(almost));
    assert_eq!(attempt.seconds_until_resend(almost), 1);

    let at = start + Duration::seconds(60);
    assert!(attempt.can_resend_at(at));
    assert_eq!(attempt.seconds_until_resend(at), 0);

    assert_eq!(attempt.seconds_until_resend(at + Duration::seconds(30)), 0);
}

#[test]
fn test_replacement_attempts_get_fresh_ids() {
    assert_ne!(attempt_at_noon().id, attempt_at_noon().id);
}

#[test]
fn test_channel_parsing() {
    assert_eq!("sms".parse::<Channel>(), Ok(Channel::Sms));
    assert_eq!(" SMS ".parse::<Channel>(), Ok(Channel::Sms));
    assert_eq!("voice".parse::<Channel>(), Ok(Channel::Call));
    assert_eq!("call".parse::<Channel>(), Ok(Channel::Call));
    assert_eq!("whatsapp".parse::<Channel>(), Ok(Channel::Whatsapp));
    assert!("pigeon".parse::<Channel>().unwrap_err().contains("pigeon"));
}

#[test]
fn test_channel_wire_names() {
    assert_eq!(Channel::default(), Channel::Sms);
    assert_eq!(Channel::Call.to_string(), "call");
    assert_eq!(serde_json::to_string(&Channel::Whatsapp).unwrap(), "\"whatsapp\"");
}

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

use crate::domain::entities::PhoneNumber;
use crate::services::clock::{Clock, ManualClock};
use crate::services::verification::ResendThrottle;

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::parse_e164(raw).unwrap()
}

fn throttle(capacity: usize) -> (ResendThrottle, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
    ));
    (ResendThrottle::new(60, capacity, clock.clone()), clock)
}

#[test]
fn test_cooldown_window() {
    let (throttle, clock) = throttle(10);
    let number = phone("+919876543210");

    assert!(throttle.can_send(&number));
    assert_eq!(throttle.remaining(&number), std::time::Duration::ZERO);

    let available_at = throttle.record_send(&number);
    assert_eq!(available_at, clock.now() + Duration::seconds(60));
    assert!(!throttle.can_send(&number));
    assert_eq!(throttle.resend_available_at(&number), Some(available_at));

    clock.advance(Duration::seconds(59));
    assert!(!throttle.can_send(&number));
    assert_eq!(throttle.remaining(&number).as_secs(), 1);

    clock.advance(Duration::seconds(1));
    assert!(throttle.can_send(&number));
    assert_eq!(throttle.resend_available_at(&number), None);
}

#[test]
fn test_phones_are_independent() {
    let (throttle, _clock) = throttle(10);
    throttle.record_send(&phone("+919876543210"));
    assert!(throttle.can_send(&phone("+919876543211")));
}

#[test]
fn test_last_writer_wins() {
    let (throttle, clock) = throttle(10);
    let number = phone("+919876543210");

    throttle.record_send(&number);
    clock.advance(Duration::seconds(30));
    let second = throttle.record_send(&number);

    assert_eq!(throttle.resend_available_at(&number), Some(second));
    clock.advance(Duration::seconds(31));
    assert!(!throttle.can_send(&number));
}

#[test]
fn test_expired_entries_are_evicted_on_record() {
    let (throttle, clock) = throttle(10);
    throttle.record_send(&phone("+919876543210"));
    throttle.record_send(&phone("+919876543211"));
    assert_eq!(throttle.tracked(), 2);

    clock.advance(Duration::seconds(61));
    throttle.record_send(&phone("+919876543212"));
    assert_eq!(throttle.tracked(), 1);
}

#[test]
fn test_earliest_window_evicted_at_capacity() {
    let (throttle, clock) = throttle(2);
    let first = phone("+919876543210");
    let second = phone("+919876543211");
    let third = phone("+919876543212");

    throttle.record_send(&first);
    clock.advance(Duration::seconds(5));
    throttle.record_send(&second);
    clock.advance(Duration::seconds(5));
    throttle.record_send(&third);

    assert_eq!(throttle.tracked(), 2);
    assert!(throttle.can_send(&first));
    assert!(!throttle.can_send(&second));
    assert!(!throttle.can_send(&third));
}

#[test]
fn test_shared_across_threads() {
    let (throttle, _clock) = throttle(100);
    let throttle = Arc::new(throttle);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let throttle = throttle.clone();
            std::thread::spawn(move || {
                throttle.record_send(&phone(&format!("+91987654321{}", i)));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(throttle.tracked(), 8);
}

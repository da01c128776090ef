//! Per-phone resend cooldown

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::entities::PhoneNumber;
use crate::services::clock::{Clock, SystemClock};

use super::config::FlowConfig;

/// Default number of phones tracked before eviction kicks in
pub const DEFAULT_THROTTLE_CAPACITY: usize = 10_000;

/// Tracks, per phone, the moment after which another code may be sent.
///
/// Shared between flows through an `Arc`. Concurrent `record_send` calls for
/// the same phone are last-writer-wins.
pub struct ResendThrottle {
    windows: Mutex<HashMap<PhoneNumber, DateTime<Utc>>>,
    cooldown: chrono::Duration,
    capacity: usize,
    clock: Arc<dyn Clock>,
}

impl ResendThrottle {
    pub fn new(cooldown_seconds: u64, capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            cooldown: chrono::Duration::seconds(cooldown_seconds as i64),
            capacity: capacity.max(1),
            clock,
        }
    }

    /// Throttle using the cooldown and capacity of `config`
    pub fn from_config(config: &FlowConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            cooldown: config.resend_cooldown(),
            capacity: config.throttle_capacity.max(1),
            clock,
        }
    }

    fn windows(&self) -> MutexGuard<'_, HashMap<PhoneNumber, DateTime<Utc>>> {
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True if no send is recorded for `phone` or its window has passed
    pub fn can_send(&self, phone: &PhoneNumber) -> bool {
        let now = self.clock.now();
        self.windows()
            .get(phone)
            .map_or(true, |available_at| now >= *available_at)
    }

    /// Record a send now and return when the next one is allowed
    pub fn record_send(&self, phone: &PhoneNumber) -> DateTime<Utc> {
        let now = self.clock.now();
        let available_at = now + self.cooldown;

        let mut windows = self.windows();
        windows.retain(|_, until| *until > now);
        if windows.len() >= self.capacity && !windows.contains_key(phone) {
            let earliest = windows
                .iter()
                .min_by_key(|(_, until)| **until)
                .map(|(phone, _)| phone.clone());
            if let Some(evicted) = earliest {
                tracing::debug!(
                    phone = %evicted.masked(),
                    event = "throttle_evicted",
                    "Resend throttle at capacity, evicting earliest window"
                );
                windows.remove(&evicted);
            }
        }
        windows.insert(phone.clone(), available_at);
        available_at
    }

    /// Time left before `phone` may be sent another code; zero if allowed now
    pub fn remaining(&self, phone: &PhoneNumber) -> Duration {
        let now = self.clock.now();
        self.windows()
            .get(phone)
            .and_then(|available_at| (*available_at - now).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }

    /// When the current window for `phone` ends, if one is active
    pub fn resend_available_at(&self, phone: &PhoneNumber) -> Option<DateTime<Utc>> {
        let now = self.clock.now();
        self.windows()
            .get(phone)
            .copied()
            .filter(|available_at| *available_at > now)
    }

    /// Number of phones currently tracked
    pub fn tracked(&self) -> usize {
        self.windows().len()
    }
}

impl Default for ResendThrottle {
    fn default() -> Self {
        Self::from_config(&FlowConfig::default(), Arc::new(SystemClock))
    }
}

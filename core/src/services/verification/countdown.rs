//! Resend countdown ticker

use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Yields the seconds left before a resend, once per second, down to zero.
///
/// The first value is produced immediately. After zero has been yielded,
/// [`Countdown::tick`] returns `None`. The underlying interval is created on
/// the first tick, so a countdown can be built outside a runtime.
#[derive(Debug)]
pub struct Countdown {
    remaining: u64,
    interval: Option<Interval>,
    finished: bool,
}

impl Countdown {
    pub fn new(seconds: u64) -> Self {
        Self {
            remaining: seconds,
            interval: None,
            finished: false,
        }
    }

    /// Countdown to `deadline`, rounding partial seconds up
    pub fn until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let millis = (deadline - now).num_milliseconds();
        let seconds = if millis <= 0 { 0 } else { ((millis + 999) / 1000) as u64 };
        Self::new(seconds)
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub async fn tick(&mut self) -> Option<u64> {
        if self.finished {
            return None;
        }

        let ticker = self.interval.get_or_insert_with(|| {
            let mut ticker = interval(Duration::from_secs(1));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });
        ticker.tick().await;

        let current = self.remaining;
        if current == 0 {
            self.finished = true;
        } else {
            self.remaining -= 1;
        }
        Some(current)
    }
}

//! Wall-clock timestamps and clock sources.
//!
//! The engine never reads the clock itself: every action takes `now` from the
//! caller. [`Clock`] exists so hosts (and tests) can supply that value
//! uniformly. Elapsed time is clamped at zero, so a clock that steps backwards
//! simply yields no regeneration.

use std::cell::Cell;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Time elapsed since `earlier`. Zero if `earlier` is in the future.
    pub fn elapsed_since(self, earlier: Timestamp) -> Duration {
        if self.0 < earlier.0 {
            log::debug!(
                "clock anomaly: now={} is before checkpoint={}, clamping elapsed to 0",
                self.0,
                earlier.0
            );
        }
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    pub fn saturating_add(self, d: Duration) -> Self {
        let ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }
}

/// A source of "now".
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Real wall clock: `Date.now()` in the browser, `SystemTime` elsewhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now(&self) -> Timestamp {
        Timestamp(js_sys::Date::now() as u64)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now(&self) -> Timestamp {
        let ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Timestamp(ms)
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start.0),
        }
    }

    pub fn set(&self, t: Timestamp) {
        self.now.set(t.0);
    }

    pub fn advance(&self, d: Duration) {
        self.set(Timestamp(self.now.get()).saturating_add(d));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}

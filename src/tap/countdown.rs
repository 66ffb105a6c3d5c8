//! Countdown to the next daily reset at a fixed UTC hour (shown as `HH:MM`).

use std::fmt;

use chrono::{DateTime, TimeDelta, Timelike, Utc};

use crate::time::Timestamp;

/// Whole hours and minutes left; seconds are truncated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    pub hours: i64,
    pub minutes: i64,
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}

/// Time from `now` until the next `target_hour:00` UTC. Once the current UTC
/// hour has reached `target_hour`, the countdown runs to tomorrow's.
///
/// Returns `None` for an hour outside `0..24` or an unrepresentable `now`.
pub fn time_until_utc_hour(now: Timestamp, target_hour: u32) -> Option<Countdown> {
    let now = DateTime::<Utc>::from_timestamp_millis(i64::try_from(now.as_millis()).ok()?)?;
    let mut target = now
        .date_naive()
        .and_hms_opt(target_hour, 0, 0)?
        .and_utc();
    if now.hour() >= target_hour {
        target += TimeDelta::days(1);
    }
    let diff = target - now;
    Some(Countdown {
        hours: diff.num_hours(),
        minutes: diff.num_minutes() % 60,
    })
}

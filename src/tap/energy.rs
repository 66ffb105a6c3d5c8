//! Energy regulation with lazy, timer-free regeneration.
//!
//! Energy is never ticked by a background task. Whenever the store is read or
//! a tap is validated, the regulator credits whole energy units earned since
//! `regen_checkpoint`. The checkpoint is a fixed anchor: `regen_credited`
//! counts the units already paid out since it, so the total credited is always
//! `floor(elapsed * rate)` no matter how often the state is read. The anchor
//! only moves while energy is full.

use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::time::Timestamp;

use super::state::GameState;

/// Converts elapsed wall-clock time into energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyRegulator {
    regen_per_second: f64,
}

impl EnergyRegulator {
    pub fn new(regen_per_second: f64) -> Result<Self> {
        if !regen_per_second.is_finite() || regen_per_second < 0.0 {
            return Err(EngineError::InvalidRegenRate(regen_per_second));
        }
        Ok(Self { regen_per_second })
    }

    /// Whole energy units earned over `elapsed`.
    pub fn regenerated(&self, elapsed: Duration) -> u64 {
        if self.regen_per_second == 0.0 {
            return 0;
        }
        let units = elapsed.as_millis() as f64 * self.regen_per_second / 1000.0;
        // `as` saturates for out-of-range floats
        units.floor() as u64
    }

    /// Units earned since the anchor that have not been credited yet.
    fn pending(&self, state: &GameState, now: Timestamp) -> u64 {
        let total = self.regenerated(now.elapsed_since(state.regen_checkpoint));
        total.saturating_sub(state.regen_credited)
    }

    /// Energy the state would have at `now`, without mutating it.
    pub fn current_energy(&self, state: &GameState, now: Timestamp) -> u64 {
        if state.energy >= state.max_energy {
            return state.max_energy;
        }
        let gained = self.pending(state, now);
        state.energy.saturating_add(gained).min(state.max_energy)
    }

    /// Credit regenerated energy into `state`. Calling this twice with the
    /// same `now` changes nothing the second time. Returns the reconciled
    /// energy.
    pub fn reconcile(&self, state: &mut GameState, now: Timestamp) -> u64 {
        if state.energy >= state.max_energy {
            // Nothing banks while full.
            state.energy = state.max_energy;
            restart(state, now);
            return state.energy;
        }

        let gained = self.pending(state, now);
        if gained == 0 {
            return state.energy;
        }

        let refilled = state.energy.saturating_add(gained);
        if refilled >= state.max_energy {
            state.energy = state.max_energy;
            restart(state, now);
        } else {
            state.energy = refilled;
            state.regen_credited += gained;
        }
        state.energy
    }

    /// Time needed to regenerate `units` from the anchor, rounded up to the
    /// millisecond.
    fn time_for(&self, units: u64) -> Duration {
        let ms = (units as f64 * 1000.0 / self.regen_per_second).ceil();
        Duration::from_millis(ms as u64)
    }

    /// Time until energy is full again, if it regenerates at all.
    pub fn time_until_full(&self, state: &GameState, now: Timestamp) -> Option<Duration> {
        if self.current_energy(state, now) >= state.max_energy {
            return Some(Duration::ZERO);
        }
        if self.regen_per_second == 0.0 {
            return None;
        }
        let needed = state
            .regen_credited
            .saturating_add(state.max_energy - state.energy);
        let elapsed = now.elapsed_since(state.regen_checkpoint);
        Some(self.time_for(needed).saturating_sub(elapsed))
    }
}

/// Move the anchor up to `now` (never backwards) and forget credited units.
pub(crate) fn restart(state: &mut GameState, now: Timestamp) {
    state.regen_checkpoint = state.regen_checkpoint.max(now);
    state.regen_credited = 0;
}

//! Tap session state definitions.

use crate::config::EngineConfig;
use crate::time::Timestamp;

/// Full mutable state of one player session.
///
/// The level index is not stored here; it is always derived from `points`
/// through the level table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Lifetime score. Never decreases.
    pub points: u64,
    /// Spendable counter. Tracks `points` unless a collaborator spends it.
    pub points_balance: u64,
    /// Points (and energy cost) of one accepted tap. Always >= 1.
    pub points_per_click: u64,
    /// Current energy, `0..=max_energy`.
    pub energy: u64,
    /// Energy ceiling. Always >= 1.
    pub max_energy: u64,
    /// Time of the most recent accepted tap.
    pub last_click_timestamp: Timestamp,
    /// Anchor that regeneration is measured from.
    pub regen_checkpoint: Timestamp,
    /// Energy units already credited since `regen_checkpoint`.
    pub regen_credited: u64,
    /// Accepted taps over the session.
    pub total_taps: u64,
}

impl GameState {
    pub fn new(config: &EngineConfig, now: Timestamp) -> Self {
        Self {
            points: 0,
            points_balance: 0,
            points_per_click: config.points_per_click.max(1),
            energy: config.initial_energy(),
            max_energy: config.max_energy.max(1),
            last_click_timestamp: now,
            regen_checkpoint: now,
            regen_credited: 0,
            total_taps: 0,
        }
    }

    /// Whether a tap can be paid for out of the stored energy.
    pub fn can_afford_tap(&self) -> bool {
        self.energy >= self.points_per_click
    }

    pub fn is_energy_full(&self) -> bool {
        self.energy >= self.max_energy
    }

    /// Checks the energy bounds and the per-click yield.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.max_energy == 0 {
            return Err("max_energy must be at least 1");
        }
        if self.energy > self.max_energy {
            return Err("energy exceeds max_energy");
        }
        if self.points_per_click == 0 {
            return Err("points_per_click must be at least 1");
        }
        Ok(())
    }
}

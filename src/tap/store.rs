//! Game state store: owns the live [`GameState`] and is the only place it is
//! mutated. Reads reconcile energy first; actions go through the tap economy;
//! collaborators adjust the state only through the hook methods, which refuse
//! values that would break an invariant.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::input::{ScreenPoint, TapInput};
use crate::time::Timestamp;

use super::energy::{self, EnergyRegulator};
use super::feedback::{FeedbackEvent, FeedbackId, FeedbackQueue};
use super::levels::LevelTable;
use super::logic::{self, TapOutcome};
use super::progress::{self, LevelView};
use super::save;
use super::state::GameState;

/// Read surface handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameView {
    pub points: u64,
    pub points_balance: u64,
    pub points_per_click: u64,
    pub energy: u64,
    pub max_energy: u64,
    pub game_level_index: usize,
    pub level: LevelView,
}

pub struct GameStore {
    levels: LevelTable,
    regulator: EnergyRegulator,
    state: GameState,
    feedback: FeedbackQueue,
}

impl GameStore {
    /// Start a fresh session. Fails on an invalid configuration.
    pub fn new(config: &EngineConfig, now: Timestamp) -> Result<Self> {
        config.validate()?;
        let store = Self {
            levels: LevelTable::new(config.levels.clone())?,
            regulator: EnergyRegulator::new(config.regen_per_second)?,
            state: GameState::new(config, now),
            feedback: FeedbackQueue::new(config.feedback_capacity),
        };
        log::info!(
            "tap session started: energy={}/{}, points_per_click={}, levels={}",
            store.state.energy,
            store.state.max_energy,
            store.state.points_per_click,
            store.levels.len()
        );
        Ok(store)
    }

    /// Resume from an externally restored snapshot. Regeneration for the time
    /// spent away is credited immediately.
    pub fn restore(config: &EngineConfig, state: GameState, now: Timestamp) -> Result<Self> {
        config.validate()?;
        state.check_invariants().map_err(EngineError::InvalidSnapshot)?;
        let mut store = Self {
            levels: LevelTable::new(config.levels.clone())?,
            regulator: EnergyRegulator::new(config.regen_per_second)?,
            state,
            feedback: FeedbackQueue::new(config.feedback_capacity),
        };
        store.recalculate_energy(now);
        log::info!(
            "tap session restored: points={}, energy={}/{}",
            store.state.points,
            store.state.energy,
            store.state.max_energy
        );
        Ok(store)
    }

    pub fn from_save(config: &EngineConfig, json: &str, now: Timestamp) -> Result<Self> {
        Self::restore(config, save::from_json(json)?, now)
    }

    pub fn to_save(&self) -> Result<String> {
        save::to_json(&self.state)
    }

    // ── Reads ───────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn points(&self) -> u64 {
        self.state.points
    }

    pub fn points_balance(&self) -> u64 {
        self.state.points_balance
    }

    pub fn points_per_click(&self) -> u64 {
        self.state.points_per_click
    }

    pub fn max_energy(&self) -> u64 {
        self.state.max_energy
    }

    /// Energy at `now`, without writing it back.
    pub fn energy_at(&self, now: Timestamp) -> u64 {
        self.regulator.current_energy(&self.state, now)
    }

    pub fn game_level_index(&self) -> usize {
        self.levels.level_for_points(self.state.points)
    }

    pub fn progress(&self) -> f64 {
        self.levels
            .progress_toward(self.state.points, self.game_level_index())
    }

    pub fn level_view(&self) -> LevelView {
        progress::level_view(&self.levels, self.state.points)
    }

    /// Reconcile energy and return everything the UI displays.
    pub fn view(&mut self, now: Timestamp) -> GameView {
        self.recalculate_energy(now);
        let level = self.level_view();
        GameView {
            points: self.state.points,
            points_balance: self.state.points_balance,
            points_per_click: self.state.points_per_click,
            energy: self.state.energy,
            max_energy: self.state.max_energy,
            game_level_index: level.index,
            level,
        }
    }

    /// Reconciled copy of the state for persistence or analytics.
    pub fn snapshot(&mut self, now: Timestamp) -> GameState {
        self.recalculate_energy(now);
        self.state.clone()
    }

    pub fn time_until_full(&self, now: Timestamp) -> Option<Duration> {
        self.regulator.time_until_full(&self.state, now)
    }

    // ── Actions ─────────────────────────────────────────────────────

    pub fn register_tap(&mut self, now: Timestamp, at: ScreenPoint) -> TapOutcome {
        logic::tap(&mut self.state, &self.regulator, &mut self.feedback, now, at)
    }

    /// One physical input event; multi-touch points are applied in order.
    pub fn register_input(&mut self, now: Timestamp, input: &TapInput) -> Vec<TapOutcome> {
        logic::tap_input(&mut self.state, &self.regulator, &mut self.feedback, now, input)
    }

    /// Bring energy up to date. Idempotent for a given `now`.
    pub fn recalculate_energy(&mut self, now: Timestamp) -> u64 {
        self.regulator.reconcile(&mut self.state, now)
    }

    // ── Feedback ────────────────────────────────────────────────────

    pub fn feedback(&self) -> impl Iterator<Item = &FeedbackEvent> {
        self.feedback.iter()
    }

    /// The presentation layer finished animating `id`.
    pub fn consume_feedback(&mut self, id: FeedbackId) -> bool {
        self.feedback.consume(id)
    }

    // ── Collaborator hooks ──────────────────────────────────────────

    pub fn set_points_per_click(&mut self, value: u64) -> Result<()> {
        if value == 0 {
            log::warn!("refusing points_per_click = 0");
            return Err(EngineError::InvalidAdjustment("points_per_click must be at least 1"));
        }
        self.state.points_per_click = value;
        Ok(())
    }

    /// Change the energy ceiling. Energy above a lowered ceiling is clamped.
    pub fn set_max_energy(&mut self, now: Timestamp, value: u64) -> Result<()> {
        if value == 0 {
            log::warn!("refusing max_energy = 0");
            return Err(EngineError::InvalidAdjustment("max_energy must be at least 1"));
        }
        self.recalculate_energy(now);
        self.state.max_energy = value;
        self.state.energy = self.state.energy.min(value);
        Ok(())
    }

    /// Debit the spendable balance. Lifetime points are unaffected.
    pub fn spend_balance(&mut self, amount: u64) -> Result<u64> {
        if amount > self.state.points_balance {
            log::warn!(
                "refusing spend of {} with balance {}",
                amount,
                self.state.points_balance
            );
            return Err(EngineError::InvalidAdjustment("insufficient points balance"));
        }
        self.state.points_balance -= amount;
        Ok(self.state.points_balance)
    }

    /// Credit the spendable balance (rewards, refunds).
    pub fn credit_balance(&mut self, amount: u64) -> u64 {
        self.state.points_balance = self.state.points_balance.saturating_add(amount);
        self.state.points_balance
    }

    /// Fill energy to capacity (e.g. a boost).
    pub fn refill_energy(&mut self, now: Timestamp) {
        self.state.energy = self.state.max_energy;
        energy::restart(&mut self.state, now);
    }
}

/// Thread-safe handle: every call runs under one lock, so actions from
/// different threads are applied one at a time.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<GameStore>>,
}

impl SharedStore {
    pub fn new(store: GameStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GameStore> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut GameStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn register_tap(&self, now: Timestamp, at: ScreenPoint) -> TapOutcome {
        self.lock().register_tap(now, at)
    }

    pub fn register_input(&self, now: Timestamp, input: &TapInput) -> Vec<TapOutcome> {
        self.lock().register_input(now, input)
    }

    pub fn recalculate_energy(&self, now: Timestamp) -> u64 {
        self.lock().recalculate_energy(now)
    }

    pub fn view(&self, now: Timestamp) -> GameView {
        self.lock().view(now)
    }
}

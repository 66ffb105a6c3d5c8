//! Tap economy: the single authoritative state transition.
//!
//! Pure functions over [`GameState`]: reconcile energy, validate the tap,
//! debit energy, credit points, and emit the feedback record in one step.

use crate::input::{ScreenPoint, TapInput};
use crate::time::Timestamp;

use super::energy::EnergyRegulator;
use super::feedback::{FeedbackEvent, FeedbackQueue};
use super::state::GameState;

/// Why a tap had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Energy after regeneration was below `points_per_click`.
    InsufficientEnergy,
    /// Lifetime points cannot grow by another `points_per_click`.
    PointsCapReached,
}

/// Result of one tap.
#[derive(Clone, Debug, PartialEq)]
pub enum TapOutcome {
    Accepted(FeedbackEvent),
    Rejected(RejectReason),
}

impl TapOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, TapOutcome::Accepted(_))
    }

    pub fn feedback(&self) -> Option<&FeedbackEvent> {
        match self {
            TapOutcome::Accepted(event) => Some(event),
            TapOutcome::Rejected(_) => None,
        }
    }
}

/// Apply one tap at `now`. A rejected tap leaves points, balance, energy and
/// the click timestamp untouched (energy may still have been brought up to
/// date by regeneration).
pub fn tap(
    state: &mut GameState,
    regulator: &EnergyRegulator,
    feedback: &mut FeedbackQueue,
    now: Timestamp,
    at: ScreenPoint,
) -> TapOutcome {
    regulator.reconcile(state, now);

    let cost = state.points_per_click;
    if state.energy < cost {
        log::debug!(
            "tap rejected: energy {} < points_per_click {}",
            state.energy,
            cost
        );
        return TapOutcome::Rejected(RejectReason::InsufficientEnergy);
    }

    let Some(points) = state.points.checked_add(cost) else {
        log::warn!("tap rejected: points at cap {}", state.points);
        return TapOutcome::Rejected(RejectReason::PointsCapReached);
    };

    state.energy -= cost;
    state.points = points;
    state.points_balance = state.points_balance.saturating_add(cost);
    state.last_click_timestamp = state.last_click_timestamp.max(now);
    state.total_taps += 1;

    TapOutcome::Accepted(feedback.push(now, at, cost))
}

/// Apply every tap point of one input event, in reported order. Each point is
/// validated against the energy left by the previous one.
pub fn tap_input(
    state: &mut GameState,
    regulator: &EnergyRegulator,
    feedback: &mut FeedbackQueue,
    now: Timestamp,
    input: &TapInput,
) -> Vec<TapOutcome> {
    input
        .points()
        .iter()
        .map(|&at| tap(state, regulator, feedback, now, at))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::EngineConfig;
    use proptest::prelude::*;

    /// One step of a random session: either a tap after `gap_ms`, or a pure
    /// time skip.
    #[derive(Clone, Debug)]
    enum Step {
        Tap { gap_ms: u64 },
        Wait { gap_ms: u64 },
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            4 => (0u64..2_000).prop_map(|gap_ms| Step::Tap { gap_ms }),
            1 => (0u64..60_000).prop_map(|gap_ms| Step::Wait { gap_ms }),
        ]
    }

    proptest! {
        #[test]
        fn prop_energy_stays_in_bounds(
            max_energy in 1u64..2_000,
            ppc in 1u64..50,
            rate in 0.0f64..50.0,
            steps in prop::collection::vec(arb_step(), 0..200),
        ) {
            let config = EngineConfig { max_energy, points_per_click: ppc, ..EngineConfig::default() };
            let mut state = GameState::new(&config, Timestamp(0));
            let reg = EnergyRegulator::new(rate).unwrap();
            let mut fb = FeedbackQueue::new(8);
            let mut now = 0u64;
            for step in steps {
                match step {
                    Step::Tap { gap_ms } => {
                        now += gap_ms;
                        tap(&mut state, &reg, &mut fb, Timestamp(now), ScreenPoint::default());
                    }
                    Step::Wait { gap_ms } => {
                        now += gap_ms;
                        reg.reconcile(&mut state, Timestamp(now));
                    }
                }
                prop_assert!(state.energy <= state.max_energy);
            }
        }

        #[test]
        fn prop_points_increase_by_ppc_per_accepted_tap(
            ppc in 1u64..20,
            gaps in prop::collection::vec(0u64..500, 1..100),
        ) {
            let config = EngineConfig { max_energy: 500, points_per_click: ppc, ..EngineConfig::default() };
            let mut state = GameState::new(&config, Timestamp(0));
            let reg = EnergyRegulator::new(5.0).unwrap();
            let mut fb = FeedbackQueue::new(8);
            let mut now = 0u64;
            for gap in gaps {
                now += gap;
                let before = state.points;
                let out = tap(&mut state, &reg, &mut fb, Timestamp(now), ScreenPoint::default());
                if out.accepted() {
                    prop_assert_eq!(state.points, before + ppc);
                } else {
                    prop_assert_eq!(state.points, before);
                }
                prop_assert!(state.points >= before);
            }
        }

        #[test]
        fn prop_rejected_tap_is_pure(energy in 0u64..10, ppc in 10u64..40) {
            let config = EngineConfig {
                max_energy: 100,
                starting_energy: Some(energy),
                points_per_click: ppc,
                ..EngineConfig::default()
            };
            let mut state = GameState::new(&config, Timestamp(0));
            let reg = EnergyRegulator::new(0.0).unwrap();
            let mut fb = FeedbackQueue::new(8);
            let before = state.clone();
            let out = tap(&mut state, &reg, &mut fb, Timestamp(1_000), ScreenPoint::default());
            prop_assert!(!out.accepted());
            prop_assert_eq!(state, before);
            prop_assert!(fb.is_empty());
        }

        #[test]
        fn prop_rejected_tap_is_pure_while_regenerating(
            ppc in 2u64..50,
            shortfall in 1u64..50,
            rate in 0.1f64..20.0,
            fraction in 0.0f64..1.0,
        ) {
            let energy = ppc.saturating_sub(shortfall);
            let config = EngineConfig {
                max_energy: 1_000,
                starting_energy: Some(energy),
                points_per_click: ppc,
                ..EngineConfig::default()
            };
            let mut state = GameState::new(&config, Timestamp(0));
            let reg = EnergyRegulator::new(rate).unwrap();
            let mut fb = FeedbackQueue::new(8);

            // Stay short of the time that would regenerate the missing energy.
            let missing = ppc - energy;
            let gap_ms = (fraction * missing as f64 * 1000.0 / rate).floor() as u64;
            let now = Timestamp(gap_ms);
            let before = state.clone();
            let expected_energy = reg.current_energy(&before, now);
            prop_assume!(expected_energy < ppc);

            let out = tap(&mut state, &reg, &mut fb, now, ScreenPoint::default());
            prop_assert_eq!(out, TapOutcome::Rejected(RejectReason::InsufficientEnergy));
            prop_assert_eq!(state.points, before.points);
            prop_assert_eq!(state.points_balance, before.points_balance);
            prop_assert_eq!(state.last_click_timestamp, before.last_click_timestamp);
            prop_assert_eq!(state.total_taps, before.total_taps);
            prop_assert_eq!(state.energy, expected_energy);
            prop_assert!(fb.is_empty());
        }
    }
}

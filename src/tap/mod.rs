//! Tap-to-earn mechanics: energy, taps, points and levels.

pub mod countdown;
pub mod energy;
pub mod feedback;
pub mod levels;
pub mod logic;
pub mod progress;
pub mod save;
pub mod state;
pub mod store;

mod simulator;

pub use energy::EnergyRegulator;
pub use feedback::{FeedbackEvent, FeedbackId, FeedbackQueue};
pub use levels::{LevelDefinition, LevelTable};
pub use logic::{RejectReason, TapOutcome};
pub use progress::LevelView;
pub use state::GameState;
pub use store::{GameStore, GameView, SharedStore};

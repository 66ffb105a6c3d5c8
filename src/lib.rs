//! Mechanics engine for a tap-to-earn idle game.
//!
//! Each tap converts energy into points. Energy regenerates lazily from
//! elapsed wall-clock time up to a capacity, and cumulative points place the
//! player on a level ladder. The host owns rendering, persistence and the
//! clock; it drives a [`GameStore`] with timestamps and reads back a
//! [`GameView`].
//!
//! ```
//! use tap_energy::{EngineConfig, GameStore, ScreenPoint, Timestamp};
//!
//! let mut store = GameStore::new(&EngineConfig::default(), Timestamp(0)).unwrap();
//! let outcome = store.register_tap(Timestamp(10), ScreenPoint::new(120.0, 300.0));
//! assert!(outcome.accepted());
//! assert_eq!(store.view(Timestamp(10)).points, 1);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod tap;
pub mod time;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
pub use input::{ScreenPoint, TapInput};
pub use tap::{GameState, GameStore, GameView, SharedStore, TapOutcome};
pub use time::{Clock, ManualClock, SystemClock, Timestamp};

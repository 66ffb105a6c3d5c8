//! Snapshot save/restore as a versioned JSON envelope.
//!
//! ## Versioning
//!
//! - `SAVE_VERSION`: current format. Bump when fields are added.
//! - `MIN_COMPATIBLE_VERSION`: oldest format still readable. Bump only for
//!   breaking changes (a field removed or its meaning changed).
//!
//! Older saves at or above `MIN_COMPATIBLE_VERSION` load with missing fields
//! filled from defaults; unknown fields are ignored. Where the JSON ends up
//! (local storage, a server) is the host's business.
//!
//! The level index is never written: it is re-derived from `points`.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::time::Timestamp;

use super::state::GameState;

const SAVE_VERSION: u32 = 3;

const MIN_COMPATIBLE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct SaveData {
    version: u32,
    game: GameSave,
}

#[derive(Serialize, Deserialize)]
#[serde(default)]
struct GameSave {
    points: u64,
    points_balance: u64,
    points_per_click: u64,
    energy: u64,
    max_energy: u64,
    last_click_timestamp: Timestamp,
    // v2
    regen_checkpoint: Option<Timestamp>,
    // v3
    regen_credited: u64,
    total_taps: u64,
}

impl Default for GameSave {
    fn default() -> Self {
        Self {
            points: 0,
            points_balance: 0,
            points_per_click: 1,
            energy: 0,
            max_energy: 1,
            last_click_timestamp: Timestamp::default(),
            regen_checkpoint: None,
            regen_credited: 0,
            total_taps: 0,
        }
    }
}

fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        version: SAVE_VERSION,
        game: GameSave {
            points: state.points,
            points_balance: state.points_balance,
            points_per_click: state.points_per_click,
            energy: state.energy,
            max_energy: state.max_energy,
            last_click_timestamp: state.last_click_timestamp,
            regen_checkpoint: Some(state.regen_checkpoint),
            regen_credited: state.regen_credited,
            total_taps: state.total_taps,
        },
    }
}

fn apply_save(save: &GameSave) -> GameState {
    GameState {
        points: save.points,
        points_balance: save.points_balance,
        points_per_click: save.points_per_click,
        energy: save.energy,
        max_energy: save.max_energy,
        last_click_timestamp: save.last_click_timestamp,
        // v1 saves regenerated from the last click
        regen_checkpoint: save.regen_checkpoint.unwrap_or(save.last_click_timestamp),
        // v2 checkpoints already had credited time folded in
        regen_credited: save.regen_credited,
        total_taps: save.total_taps,
    }
}

/// Serialize a snapshot.
pub fn to_json(state: &GameState) -> Result<String> {
    serde_json::to_string(&extract_save(state)).map_err(|e| EngineError::SaveParse(e.to_string()))
}

/// Restore a snapshot, rejecting incompatible versions and states that break
/// the energy or click-yield invariants.
pub fn from_json(json: &str) -> Result<GameState> {
    let data: SaveData = serde_json::from_str(json).map_err(|e| {
        log::warn!("discarding unreadable save data: {e}");
        EngineError::SaveParse(e.to_string())
    })?;

    if data.version < MIN_COMPATIBLE_VERSION {
        log::warn!(
            "save version too old (saved={}, min_compatible={})",
            data.version,
            MIN_COMPATIBLE_VERSION
        );
        return Err(EngineError::IncompatibleSaveVersion {
            saved: data.version,
            min_compatible: MIN_COMPATIBLE_VERSION,
        });
    }
    if data.version < SAVE_VERSION {
        log::info!(
            "migrating save data (saved={}, current={})",
            data.version,
            SAVE_VERSION
        );
    }

    let state = apply_save(&data.game);
    state.check_invariants().map_err(EngineError::InvalidSnapshot)?;
    Ok(state)
}

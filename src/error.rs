//! Engine error types.
//!
//! Only configuration-time problems and snapshot restore failures are errors.
//! Routine conditions (a tap without enough energy, a clock that went
//! backwards) are absorbed by the engine and never reach this type.

/// Errors surfaced by the tap engine.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    // ── Invalid configuration (fatal for the session) ─────────────
    #[error("level table is empty")]
    EmptyLevelTable,

    #[error("first level must start at 0 points, found {min_points}")]
    FirstLevelNotZero { min_points: u64 },

    #[error("level {index} threshold {current} is not above the previous threshold {previous}")]
    LevelsNotAscending {
        index: usize,
        previous: u64,
        current: u64,
    },

    #[error("max energy must be at least 1")]
    ZeroMaxEnergy,

    #[error("points per click must be at least 1")]
    ZeroPointsPerClick,

    #[error("energy regeneration rate must be finite and non-negative, got {0}")]
    InvalidRegenRate(f64),

    #[error("failed to parse engine config: {0}")]
    ConfigParse(String),

    // ── Collaborator hooks ────────────────────────────────────────
    #[error("rejected adjustment: {0}")]
    InvalidAdjustment(&'static str),

    // ── Snapshot restore ──────────────────────────────────────────
    #[error("failed to parse save data: {0}")]
    SaveParse(String),

    #[error("save version {saved} is older than the minimum compatible version {min_compatible}")]
    IncompatibleSaveVersion { saved: u32, min_compatible: u32 },

    #[error("snapshot violates an engine invariant: {0}")]
    InvalidSnapshot(&'static str),
}

impl EngineError {
    /// True for errors that make the session unusable (bad configuration).
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::EmptyLevelTable
                | Self::FirstLevelNotZero { .. }
                | Self::LevelsNotAscending { .. }
                | Self::ZeroMaxEnergy
                | Self::ZeroPointsPerClick
                | Self::InvalidRegenRate(_)
                | Self::ConfigParse(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

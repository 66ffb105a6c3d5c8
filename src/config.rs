//! Engine configuration.
//!
//! Loaded once at session start, usually from JSON supplied by the host.
//! Missing fields fall back to [`EngineConfig::default`].

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::tap::levels::{default_levels, LevelDefinition, LevelTable};

/// Tunable parameters for a tap session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Energy units regenerated per second. 0 disables regeneration.
    pub regen_per_second: f64,
    /// Energy capacity of a fresh session.
    pub max_energy: u64,
    /// Energy of a fresh session. `None` starts full.
    pub starting_energy: Option<u64>,
    /// Points (and energy cost) per accepted tap.
    pub points_per_click: u64,
    /// Ordered level ladder.
    pub levels: Vec<LevelDefinition>,
    /// Maximum pending feedback records before the oldest is dropped.
    pub feedback_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            regen_per_second: 1.0,
            max_energy: 1000,
            starting_energy: None,
            points_per_click: 1,
            levels: default_levels(),
            feedback_capacity: 64,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every configuration invariant up front so a broken setup fails
    /// at initialisation rather than mid-game.
    pub fn validate(&self) -> Result<()> {
        if !self.regen_per_second.is_finite() || self.regen_per_second < 0.0 {
            return Err(EngineError::InvalidRegenRate(self.regen_per_second));
        }
        if self.max_energy == 0 {
            return Err(EngineError::ZeroMaxEnergy);
        }
        if self.points_per_click == 0 {
            return Err(EngineError::ZeroPointsPerClick);
        }
        LevelTable::validate(&self.levels)
    }

    /// Starting energy clamped into `0..=max_energy`.
    pub fn initial_energy(&self) -> u64 {
        self.starting_energy
            .unwrap_or(self.max_energy)
            .min(self.max_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_energy(), 1000);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = EngineConfig::from_json(r#"{ "regen_per_second": 10.0 }"#).unwrap();
        assert!((config.regen_per_second - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.max_energy, 1000);
        assert_eq!(config.levels.len(), default_levels().len());
    }

    #[test]
    fn starting_energy_is_clamped() {
        let config = EngineConfig {
            starting_energy: Some(5000),
            ..EngineConfig::default()
        };
        assert_eq!(config.initial_energy(), 1000);
    }

    #[test]
    fn negative_rate_rejected() {
        let err = EngineConfig::from_json(r#"{ "regen_per_second": -2.0 }"#).unwrap_err();
        assert_eq!(err, EngineError::InvalidRegenRate(-2.0));
    }

    #[test]
    fn zero_capacity_and_yield_rejected() {
        let config = EngineConfig {
            max_energy: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::ZeroMaxEnergy));

        let config = EngineConfig {
            points_per_click: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(EngineError::ZeroPointsPerClick));
    }

    #[test]
    fn unsorted_levels_rejected_at_load() {
        let json = r#"{
            "levels": [
                { "name": "A", "min_points": 0 },
                { "name": "B", "min_points": 500 },
                { "name": "C", "min_points": 100 }
            ]
        }"#;
        let err = EngineConfig::from_json(json).unwrap_err();
        assert!(matches!(err, EngineError::LevelsNotAscending { index: 2, .. }));
        assert!(err.is_fatal());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, EngineError::ConfigParse(_)));
    }
}

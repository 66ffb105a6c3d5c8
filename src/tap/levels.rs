//! Level ladder: ordered thresholds of cumulative points.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// One tier of the ladder. Its index is its position in the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    /// Inclusive lower bound of cumulative points for this level.
    pub min_points: u64,
    /// Opaque asset references for the presentation layer.
    #[serde(default)]
    pub small_image: String,
    #[serde(default)]
    pub big_image: String,
}

impl LevelDefinition {
    pub fn new(name: &str, min_points: u64) -> Self {
        Self {
            name: name.to_string(),
            min_points,
            small_image: String::new(),
            big_image: String::new(),
        }
    }

    fn with_images(name: &str, min_points: u64, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            min_points,
            small_image: format!("{slug}_small"),
            big_image: format!("{slug}_big"),
        }
    }
}

/// Built-in ten-tier ladder.
pub fn default_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition::with_images("Bronze", 0, "bronze"),
        LevelDefinition::with_images("Silver", 5_000, "silver"),
        LevelDefinition::with_images("Gold", 25_000, "gold"),
        LevelDefinition::with_images("Platinum", 100_000, "platinum"),
        LevelDefinition::with_images("Diamond", 1_000_000, "diamond"),
        LevelDefinition::with_images("Epic", 2_000_000, "epic"),
        LevelDefinition::with_images("Legendary", 10_000_000, "legendary"),
        LevelDefinition::with_images("Master", 50_000_000, "master"),
        LevelDefinition::with_images("GrandMaster", 100_000_000, "grandmaster"),
        LevelDefinition::with_images("Lord", 1_000_000_000, "lord"),
    ]
}

/// A validated level ladder: non-empty, starts at 0, strictly ascending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelTable {
    levels: Vec<LevelDefinition>,
}

impl LevelTable {
    pub fn new(levels: Vec<LevelDefinition>) -> Result<Self> {
        Self::validate(&levels)?;
        Ok(Self { levels })
    }

    pub fn validate(levels: &[LevelDefinition]) -> Result<()> {
        let first = levels.first().ok_or(EngineError::EmptyLevelTable)?;
        if first.min_points != 0 {
            return Err(EngineError::FirstLevelNotZero {
                min_points: first.min_points,
            });
        }
        for (i, pair) in levels.windows(2).enumerate() {
            if pair[1].min_points <= pair[0].min_points {
                return Err(EngineError::LevelsNotAscending {
                    index: i + 1,
                    previous: pair[0].min_points,
                    current: pair[1].min_points,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a validated table.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelDefinition> {
        self.levels.iter()
    }

    /// Largest index whose threshold is `<= points`. An exact threshold match
    /// belongs to that level.
    pub fn level_for_points(&self, points: u64) -> usize {
        // levels[0].min_points == 0, so the partition point is at least 1.
        self.levels
            .partition_point(|l| l.min_points <= points)
            .saturating_sub(1)
    }

    /// Percentage (0..=100) of the way from `index`'s threshold to the next.
    /// The last level is always 100.
    pub fn progress_toward(&self, points: u64, index: usize) -> f64 {
        if index >= self.last_index() {
            return 100.0;
        }
        let current = self.levels[index].min_points;
        let next = self.levels[index + 1].min_points;
        let span = (next - current) as f64;
        let gained = points as f64 - current as f64;
        (gained / span * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: default_levels(),
        }
    }
}

//! Level progression view, derived on every read and never cached.

use serde::Serialize;

use super::levels::LevelTable;

/// What the header and progress bar show: "Gold • 3 / 10" plus a bar width.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LevelView {
    /// Index into the level table.
    pub index: usize,
    pub name: String,
    /// 1-based level number.
    pub number: usize,
    /// Total number of levels.
    pub total: usize,
    /// 0..=100 toward the next level; 100 at the last level.
    pub progress: f64,
    pub big_image: String,
}

impl LevelView {
    pub fn is_max_level(&self) -> bool {
        self.number == self.total
    }
}

/// Derive the level view for `points`.
pub fn level_view(levels: &LevelTable, points: u64) -> LevelView {
    let index = levels.level_for_points(points);
    let (name, big_image) = levels
        .get(index)
        .map(|l| (l.name.clone(), l.big_image.clone()))
        .unwrap_or_default();
    LevelView {
        index,
        name,
        number: index + 1,
        total: levels.len(),
        progress: levels.progress_toward(points, index),
        big_image,
    }
}

/// Points still needed to reach the next level, `None` at the last level.
pub fn points_to_next_level(levels: &LevelTable, points: u64) -> Option<u64> {
    let index = levels.level_for_points(points);
    levels
        .get(index + 1)
        .map(|next| next.min_points.saturating_sub(points))
}

/// Format a point count with commas (e.g. 1234567 → "1,234,567").
pub fn format_points(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tap::levels::LevelDefinition;

    fn ladder() -> LevelTable {
        LevelTable::new(vec![
            LevelDefinition::new("Bronze", 0),
            LevelDefinition::new("Silver", 100),
            LevelDefinition::new("Gold", 500),
        ])
        .unwrap()
    }

    #[test]
    fn view_at_threshold() {
        let v = level_view(&ladder(), 100);
        assert_eq!(v.index, 1);
        assert_eq!(v.name, "Silver");
        assert_eq!((v.number, v.total), (2, 3));
        assert!((v.progress - 0.0).abs() < 1e-9);
        assert!(!v.is_max_level());
    }

    #[test]
    fn view_at_last_level() {
        let v = level_view(&ladder(), 500);
        assert_eq!(v.index, 2);
        assert!((v.progress - 100.0).abs() < 1e-9);
        assert!(v.is_max_level());
    }

    #[test]
    fn remaining_points() {
        let t = ladder();
        assert_eq!(points_to_next_level(&t, 0), Some(100));
        assert_eq!(points_to_next_level(&t, 450), Some(50));
        assert_eq!(points_to_next_level(&t, 500), None);
    }

    #[test]
    fn format_points_groups_thousands() {
        assert_eq!(format_points(0), "0");
        assert_eq!(format_points(999), "999");
        assert_eq!(format_points(1_000), "1,000");
        assert_eq!(format_points(1_234_567), "1,234,567");
        assert_eq!(format_points(100_000), "100,000");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::tap::levels::default_levels;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_level_consistent_with_points(points in 0u64..2_000_000_000) {
            let t = LevelTable::new(default_levels()).unwrap();
            let v = level_view(&t, points);
            prop_assert!(t.get(v.index).unwrap().min_points <= points);
            if let Some(next) = t.get(v.index + 1) {
                prop_assert!(next.min_points > points);
            }
            prop_assert!((0.0..=100.0).contains(&v.progress));
        }

        #[test]
        fn prop_format_points_commas_at_correct_positions(n in 0u64..u64::MAX) {
            let s = format_points(n);
            let stripped: String = s.chars().filter(|c| *c != ',').collect();
            prop_assert_eq!(stripped, n.to_string());
            for group in s.split(',').skip(1) {
                prop_assert_eq!(group.len(), 3);
            }
        }
    }
}

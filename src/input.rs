//! Tap input normalisation.
//!
//! Mouse clicks and touch-end events are reduced to an ordered list of screen
//! points. Each point becomes one independent tap.

use serde::{Deserialize, Serialize};

/// Page coordinates of a tap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single physical input event.
#[derive(Clone, Debug, PartialEq)]
pub enum TapInput {
    /// Mouse click at one point.
    Click(ScreenPoint),
    /// Touch end carrying every changed touch point, in reported order.
    Touch(Vec<ScreenPoint>),
}

impl TapInput {
    /// Tap points in the order they must be processed.
    pub fn points(&self) -> &[ScreenPoint] {
        match self {
            TapInput::Click(p) => std::slice::from_ref(p),
            TapInput::Touch(points) => points,
        }
    }

    pub fn tap_count(&self) -> usize {
        self.points().len()
    }
}

impl From<ScreenPoint> for TapInput {
    fn from(p: ScreenPoint) -> Self {
        TapInput::Click(p)
    }
}

//! Game simulation modules

pub mod combat;
pub mod effects;
pub mod fighter;
pub mod gesture;
pub mod r#match;

pub use r#match::{GameLoop, GameMatch, MatchState, Winner};

use serde::{Deserialize, Serialize};

/// Logical arena dimensions. Detector output arrives in normalized [0,1]
/// frame coordinates and is scaled into this space before classification.
pub const ARENA_WIDTH: f32 = 1000.0;
pub const ARENA_HEIGHT: f32 = 600.0;

/// A point or offset in arena space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Player action derived from one gesture sample (consumed the same tick)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionSignal {
    pub punch_left: bool,
    pub punch_right: bool,
    pub block: bool,
}

impl ActionSignal {
    pub fn any_punch(&self) -> bool {
        self.punch_left || self.punch_right
    }
}

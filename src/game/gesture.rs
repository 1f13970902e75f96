//! Gesture classification - wrist motion to punch/block signals

use crate::vision::DetectedHand;

use super::{ActionSignal, Vec2, ARENA_HEIGHT, ARENA_WIDTH};

/// Frame-to-frame wrist displacement (arena units) that registers a punch
pub const PUNCH_THRESHOLD: f32 = 60.0;

/// Wrist positions for one tick, scaled into arena space. Hands are assigned
/// to sides by ascending x; a single detected hand counts as the left.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureSample {
    pub left: Option<Vec2>,
    pub right: Option<Vec2>,
    pub timestamp_ms: u64,
}

impl GestureSample {
    /// Build a sample from raw detector output
    pub fn from_hands(hands: &[DetectedHand], timestamp_ms: u64) -> Self {
        let mut wrists: Vec<Vec2> = hands
            .iter()
            .map(|h| Vec2::new(h.wrist_x * ARENA_WIDTH, h.wrist_y * ARENA_HEIGHT))
            .collect();
        wrists.sort_by(|a, b| a.x.total_cmp(&b.x));

        Self {
            left: wrists.first().copied(),
            right: wrists.get(1).copied(),
            timestamp_ms,
        }
    }
}

/// Converts per-tick wrist positions into discrete punch/block signals.
///
/// Keeps one previous position per side; the history is overwritten every
/// tick (including with `None` when a hand drops out) so velocity tracking
/// stays continuous across misses.
#[derive(Debug, Default)]
pub struct GestureClassifier {
    prev_left: Option<Vec2>,
    prev_right: Option<Vec2>,
}

impl GestureClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one sample. Punch fires per side when displacement since the
    /// previous tick exceeds the threshold. Block fires when both wrists are
    /// present above the vertical midpoint; the resolver gives block
    /// precedence over punch.
    pub fn classify(&mut self, sample: &GestureSample) -> ActionSignal {
        let punch_left = displacement_exceeds(self.prev_left, sample.left);
        let punch_right = displacement_exceeds(self.prev_right, sample.right);

        let block = match (sample.left, sample.right) {
            (Some(l), Some(r)) => l.y < ARENA_HEIGHT / 2.0 && r.y < ARENA_HEIGHT / 2.0,
            _ => false,
        };

        self.prev_left = sample.left;
        self.prev_right = sample.right;

        ActionSignal {
            punch_left,
            punch_right,
            block,
        }
    }

    /// Clear wrist history (match reset)
    pub fn reset(&mut self) {
        self.prev_left = None;
        self.prev_right = None;
    }
}

fn displacement_exceeds(prev: Option<Vec2>, current: Option<Vec2>) -> bool {
    match (prev, current) {
        (Some(p), Some(c)) => p.distance(c) > PUNCH_THRESHOLD,
        _ => false,
    }
}

//! Scripted stand-ins for the camera and detector collaborators
//!
//! The real webcam + landmark model live outside this crate. This pair lets
//! the binary demo a full match end-to-end and gives tests a deterministic
//! gesture source: two hands swaying at guard height, a fast jab every ~1.25
//! seconds, and a raised double-hand guard every four seconds.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{Camera, DetectedHand, Frame, HandDetector};

/// Camera that produces blank frames forever (or a fixed number for tests)
pub struct SyntheticCamera {
    remaining: Option<u64>,
}

impl SyntheticCamera {
    pub fn new() -> Self {
        Self { remaining: None }
    }

    /// Camera that runs dry after `frames` captures, for exercising the
    /// fatal-loss path.
    pub fn limited(frames: u64) -> Self {
        Self {
            remaining: Some(frames),
        }
    }
}

impl Default for SyntheticCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera for SyntheticCamera {
    fn capture(&mut self) -> Option<Frame> {
        if let Some(remaining) = &mut self.remaining {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        // The core never inspects pixels, so a tiny frame is enough.
        Some(Frame::new(2, 2))
    }
}

/// Jab every 75 frames (~1.25s at 60 TPS), comfortably past the punch cooldown
const JAB_INTERVAL: u64 = 75;
/// Raise a guard for 30 frames out of every 240 (~0.5s out of 4s)
const GUARD_PERIOD: u64 = 240;
const GUARD_HOLD: u64 = 30;

/// Detector that follows a fixed gesture script instead of running a model
pub struct ScriptedDetector {
    frame: u64,
    rng: ChaCha8Rng,
}

impl ScriptedDetector {
    pub fn new(seed: u64) -> Self {
        Self {
            frame: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl HandDetector for ScriptedDetector {
    fn detect(&mut self, _frame: &Frame, _timestamp_ms: u64) -> Vec<DetectedHand> {
        let n = self.frame;
        self.frame += 1;

        // Resting guard height, below the frame midpoint
        let mut left = DetectedHand {
            wrist_x: 0.35,
            wrist_y: 0.65,
        };
        let mut right = DetectedHand {
            wrist_x: 0.65,
            wrist_y: 0.65,
        };

        // Idle sway, well under the punch threshold
        left.wrist_x += self.rng.gen_range(-0.005..0.005);
        left.wrist_y += self.rng.gen_range(-0.005..0.005);
        right.wrist_x += self.rng.gen_range(-0.005..0.005);
        right.wrist_y += self.rng.gen_range(-0.005..0.005);

        if n % GUARD_PERIOD < GUARD_HOLD {
            // Both hands raised above the midpoint
            left.wrist_y = 0.2;
            right.wrist_y = 0.2;
        } else if n % JAB_INTERVAL == 0 {
            // Single-frame snap of the right hand
            right.wrist_x += 0.12;
            right.wrist_y -= 0.05;
        }

        vec![left, right]
    }
}

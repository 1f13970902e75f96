//! Vision collaborator seams - camera capture and hand-landmark detection
//!
//! The game core never looks inside a frame; it only forwards frames to the
//! detector and consumes wrist positions. Real backends (a webcam plus a
//! landmark model) plug in behind these traits.

pub mod synthetic;

pub use synthetic::{ScriptedDetector, SyntheticCamera};

/// One captured color frame, already horizontally mirrored by the capture
/// backend so on-screen motion matches the player's own.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Packed RGB bytes, row-major
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 3) as usize],
        }
    }
}

/// A detected hand. The detector may report more landmarks; the game only
/// requires the wrist, in normalized [0,1]x[0,1] frame coordinates.
#[derive(Debug, Clone, Copy)]
pub struct DetectedHand {
    pub wrist_x: f32,
    pub wrist_y: f32,
}

/// Camera capture collaborator. Returning `None` means the stream ended,
/// which the loop treats as fatal.
pub trait Camera {
    fn capture(&mut self) -> Option<Frame>;
}

/// Hand-landmark detector collaborator. `timestamp_ms` is strictly
/// increasing across calls. An empty result is not an error; it simply means
/// no hands were visible this frame.
pub trait HandDetector {
    fn detect(&mut self, frame: &Frame, timestamp_ms: u64) -> Vec<DetectedHand>;
}

//! Audio collaborator seam - fire-and-forget sound cues
//!
//! Playback never affects game logic: a backend that fails to load a cue
//! keeps an inert slot for it and stays silent for the rest of the run.

use tracing::debug;

/// The four named cues the game triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    PlayerPunch,
    Hit,
    Ko,
    EnemyPunch,
}

/// Audio sink collaborator
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Silent sink
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Logs cues at debug level; the default sink for the headless demo
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, cue: AudioCue) {
        debug!(?cue, "audio cue");
    }
}

/// Records cues for assertions in tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<AudioCue>,
}

#[cfg(test)]
impl AudioSink for RecordingAudio {
    fn play(&mut self, cue: AudioCue) {
        self.played.push(cue);
    }
}

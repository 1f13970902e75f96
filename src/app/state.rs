//! Application wiring - collaborators assembled from configuration

use std::io::{stdout, Stdout};

use crate::audio::LogAudio;
use crate::config::Config;
use crate::game::{GameLoop, GameMatch};
use crate::input::Controls;
use crate::render::{JsonLinesRenderer, NullRenderer, Renderer, SceneBuilder};
use crate::util::time::unix_millis;
use crate::vision::{ScriptedDetector, SyntheticCamera};

/// Owns the collaborator set behind the game loop. The camera and detector
/// here are the scripted demo pair; a real webcam/landmark backend swaps in
/// behind the same traits.
pub struct AppState {
    seed: u64,
    renderer: Box<dyn Renderer>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let seed = config.rng_seed.unwrap_or_else(unix_millis);

        let renderer: Box<dyn Renderer> = if config.dump_frames {
            Box::new(JsonLinesRenderer::<Stdout>::new(stdout()))
        } else {
            Box::new(NullRenderer)
        };

        Self { seed, renderer }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Assemble the loop; controls start listening on stdin and ctrl-c
    pub fn into_loop(self) -> GameLoop {
        GameLoop::new(
            GameMatch::new(self.seed),
            Box::new(SyntheticCamera::new()),
            Box::new(ScriptedDetector::new(self.seed)),
            self.renderer,
            Box::new(LogAudio),
            Controls::spawn(),
            SceneBuilder::new(self.seed),
        )
    }
}

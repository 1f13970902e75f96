//! Presentation - draw-primitive contract, scene building, render sinks

pub mod primitives;
pub mod scene;

pub use primitives::{Color, DrawPrimitive, Scene};
pub use scene::SceneBuilder;

use std::io::Write;

use tracing::warn;

/// Rendering collaborator. Present is fire-and-forget: a sink that fails
/// keeps the game running.
pub trait Renderer {
    fn present(&mut self, scene: &Scene);
}

/// Discards every scene; the default when no sink is configured
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _scene: &Scene) {}
}

/// Writes one JSON scene per line, for piping into an external renderer or
/// inspecting frames by hand (`DUMP_FRAMES=1`)
pub struct JsonLinesRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for JsonLinesRenderer<W> {
    fn present(&mut self, scene: &Scene) {
        match serde_json::to_string(scene) {
            Ok(line) => {
                if let Err(e) = writeln!(self.out, "{}", line) {
                    warn!(error = %e, "frame dump write failed");
                }
            }
            Err(e) => warn!(error = %e, "frame serialization failed"),
        }
    }
}

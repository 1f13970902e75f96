//! Renderer contract types
//! These are the wire types handed to the rendering collaborator each tick

use serde::{Deserialize, Serialize};

use crate::game::Vec2;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0);
pub const WHITE: Color = Color(255, 255, 255);
pub const YELLOW: Color = Color(255, 255, 0);
pub const RED: Color = Color(255, 0, 0);
pub const GREEN: Color = Color(0, 255, 0);
pub const SKIN: Color = Color(255, 220, 170);

/// A single draw intent. The renderer presents all primitives for a tick in
/// submission order, back to front.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawPrimitive {
    /// Axis-aligned rectangle; `stroke_width` of `None` means filled
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
        corner_radius: f32,
        stroke_width: Option<f32>,
    },

    /// Filled circle
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Color,
    },

    /// Line segment with width
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },

    /// Filled ellipse inside the given bounding box
    Ellipse {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },

    /// Filled convex polygon
    Polygon { points: Vec<Vec2>, color: Color },

    /// Rendered text, anchored top-left
    Text {
        x: f32,
        y: f32,
        text: String,
        size: u32,
        bold: bool,
        color: Color,
    },
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub tick: u64,
    pub primitives: Vec<DrawPrimitive>,
}

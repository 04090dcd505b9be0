//! Primitive draw requests

use glam::Vec2;

/// Images the core can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Apple,
    Poison,
}

/// One thing to draw, in canvas units with the origin at the top-left
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole canvas
    Clear { color: [f32; 4] },
    /// Filled axis-aligned rectangle
    Rect {
        pos: Vec2,
        size: Vec2,
        color: [f32; 4],
    },
    /// Image scaled to `size`
    Sprite { sprite: Sprite, pos: Vec2, size: Vec2 },
    /// Text label anchored at its top-left
    Text {
        text: String,
        pos: Vec2,
        color: [f32; 4],
        big: bool,
    },
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SNAKE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const EYE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [150.0 / 255.0, 75.0 / 255.0, 0.0, 1.0];
    pub const HUD: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const HIGH_SCORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    /// Used by frontends that draw sprites as glyphs
    pub const APPLE: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const POISON: [f32; 4] = [0.6, 0.2, 0.9, 1.0];
}

/// Convert a normalized color to 8-bit RGB
pub fn to_rgb8(color: [f32; 4]) -> (u8, u8, u8) {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    (c(color[0]), c(color[1]), c(color[2]))
}

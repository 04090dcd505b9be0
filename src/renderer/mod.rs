//! Draw intents
//!
//! The simulation never touches a screen. Each tick the round controller
//! asks `build_frame` for a list of primitives on the fixed 1200x800
//! logical canvas and hands it to the platform, which rasterizes it however
//! it can.

pub mod commands;
pub mod frame;

pub use commands::{DrawCommand, Sprite, colors};
pub use frame::build_frame;

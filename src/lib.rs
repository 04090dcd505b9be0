//! Snake Levels - a five-level grid Snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (levels, item placement, collisions, tick)
//! - `round`: Fixed-rate loop driving one round to its outcome
//! - `progression`: Level sequencing and run-wide totals
//! - `renderer`: Per-tick draw intents on a fixed logical canvas
//! - `platform`: Input/output seam plus the crossterm terminal frontend
//! - `settings`: JSON configuration

pub mod audio;
pub mod platform;
pub mod progression;
pub mod renderer;
pub mod report;
pub mod round;
pub mod settings;
pub mod sim;

pub use progression::{Progression, RunExit, RunState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical canvas size
    pub const SCREEN_WIDTH: i32 = 1200;
    pub const SCREEN_HEIGHT: i32 = 800;

    /// Snake segment and obstacle footprint (also the grid used for layouts)
    pub const SNAKE_SIZE: i32 = 32;
    /// Food/poison visual footprint; the hitbox stays `SNAKE_SIZE`
    pub const FOOD_SIZE: i32 = 48;
    /// Distance the head travels per tick
    pub const SNAKE_SPEED: i32 = 20;

    /// Default simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 15;

    /// Number of hand-authored levels
    pub const MAX_LEVEL: u32 = 5;
    /// Score that wins a round
    pub const WIN_SCORE: u32 = 10;
    /// Poison items scattered at round start
    pub const POISON_COUNT: usize = 5;

    /// Head cell at round start
    pub const START_X: i32 = 100;
    pub const START_Y: i32 = 100;
}

/// Clamp a level number into the authored range
#[inline]
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(1, consts::MAX_LEVEL)
}

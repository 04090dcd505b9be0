//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed grid step per tick
//! - Seeded RNG only
//! - Stable iteration order (obstacles and poison keep insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod food;
pub mod level;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use food::{place_food, random_item_position, relocate_food, scatter_poison};
pub use level::generate_obstacles;
pub use state::{Cell, Direction, GameEvent, GameState, MoveCounts, RoundStatus};
pub use tick::{TickInput, tick, wrap_toroidal};

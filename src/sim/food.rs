//! Item placement
//!
//! Food and poison share one sampler: a uniformly random grid-aligned
//! position whose 48-unit footprint starts inside the canvas. Food retries
//! until its footprint clears every obstacle; poison takes whatever it gets.

use glam::IVec2;
use rand::Rng;

use super::collision::{Rect, hits_any_cell};
use super::state::Cell;
use crate::consts::{FOOD_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH, SNAKE_SIZE};

/// Number of grid-aligned starts in `[0, limit)`
#[inline]
fn aligned_slots(limit: i32) -> i32 {
    (limit + SNAKE_SIZE - 1) / SNAKE_SIZE
}

/// Uniformly random aligned item position; no overlap checks
pub fn random_item_position<R: Rng + ?Sized>(rng: &mut R) -> Cell {
    let x = rng.random_range(0..aligned_slots(SCREEN_WIDTH - FOOD_SIZE)) * SNAKE_SIZE;
    let y = rng.random_range(0..aligned_slots(SCREEN_HEIGHT - FOOD_SIZE)) * SNAKE_SIZE;
    IVec2::new(x, y)
}

/// Sample until the item footprint overlaps no obstacle
///
/// Does not terminate if the obstacles cover every candidate; none of the
/// authored levels come close.
pub fn place_food<R: Rng + ?Sized>(rng: &mut R, obstacles: &[Cell]) -> Cell {
    loop {
        let food = random_item_position(rng);
        if !hits_any_cell(&Rect::item_footprint(food), obstacles) {
            return food;
        }
    }
}

/// Like `place_food`, but never returns `previous`
pub fn relocate_food<R: Rng + ?Sized>(rng: &mut R, obstacles: &[Cell], previous: Cell) -> Cell {
    loop {
        let food = place_food(rng, obstacles);
        if food != previous {
            return food;
        }
    }
}

/// Poison is placed blind: it may sit on obstacles, food or other poison
pub fn scatter_poison<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Cell> {
    (0..count).map(|_| random_item_position(rng)).collect()
}

//! Axis-aligned hitboxes
//!
//! Every collision in the game is a rectangle overlap test. Snake segments
//! and obstacles use their full 32-unit footprint; food and poison draw at
//! 48 units but collide through a 32-unit box centered inside that footprint.

use crate::consts::{FOOD_SIZE, SNAKE_SIZE};

use super::state::Cell;

/// An axis-aligned rectangle in canvas units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of a snake segment or obstacle cell
    #[inline]
    pub fn cell(cell: Cell) -> Self {
        Self::new(cell.x, cell.y, SNAKE_SIZE, SNAKE_SIZE)
    }

    /// Full visual footprint of an item (used only for food placement)
    #[inline]
    pub fn item_footprint(pos: Cell) -> Self {
        Self::new(pos.x, pos.y, FOOD_SIZE, FOOD_SIZE)
    }

    /// Collision box of an item: a cell-sized box centered in the footprint
    #[inline]
    pub fn item_hitbox(pos: Cell) -> Self {
        let inset = (FOOD_SIZE - SNAKE_SIZE) / 2;
        Self::new(pos.x + inset, pos.y + inset, SNAKE_SIZE, SNAKE_SIZE)
    }

    /// Strict overlap. Touching edges do not count and empty boxes never hit.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.w <= 0 || self.h <= 0 || other.w <= 0 || other.h <= 0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// True if `rect` overlaps the box of any cell in `cells`
pub fn hits_any_cell(rect: &Rect, cells: &[Cell]) -> bool {
    cells.iter().any(|&c| rect.intersects(&Rect::cell(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0, 0, 32, 32);
        let b = Rect::new(31, 31, 32, 32);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 32, 32);
        assert!(!a.intersects(&Rect::new(32, 0, 32, 32)));
        assert!(!a.intersects(&Rect::new(0, 32, 32, 32)));
        assert!(!a.intersects(&Rect::new(-32, -32, 32, 32)));
    }

    #[test]
    fn test_empty_rect_never_hits() {
        let a = Rect::new(0, 0, 32, 32);
        assert!(!a.intersects(&Rect::new(10, 10, 0, 5)));
    }

    #[test]
    fn test_item_hitbox_is_centered() {
        let hitbox = Rect::item_hitbox(IVec2::new(64, 96));
        assert_eq!(hitbox, Rect::new(72, 104, 32, 32));

        // A segment touching the footprint corner but not the hitbox misses
        let segment = Rect::cell(IVec2::new(64 - 24, 96 - 24));
        assert!(segment.intersects(&Rect::item_footprint(IVec2::new(64, 96))));
        assert!(!segment.intersects(&hitbox));
    }

    #[test]
    fn test_hits_any_cell() {
        let cells = [IVec2::new(0, 0), IVec2::new(320, 320)];
        assert!(hits_any_cell(&Rect::cell(IVec2::new(300, 300)), &cells));
        assert!(!hits_any_cell(&Rect::cell(IVec2::new(100, 100)), &cells));
    }
}

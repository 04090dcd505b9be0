//! Hand-authored level layouts
//!
//! Every level above the first is fenced by a one-cell border; levels 3-5
//! each add one interior pattern. Layouts are a pure function of the level
//! number and the fixed canvas size.

use std::collections::HashSet;

use glam::IVec2;

use super::state::Cell;
use crate::clamp_level;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SNAKE_SIZE};

const STEP: usize = SNAKE_SIZE as usize;

/// Obstacle cells for `level`, in a stable order without duplicates
///
/// Levels outside 1..=5 are clamped, so anything past the last level reuses
/// the level-5 layout.
pub fn generate_obstacles(level: u32) -> Vec<Cell> {
    let level = clamp_level(level);
    let mut blocks = Vec::new();

    if level >= 2 {
        border(&mut blocks);
    }

    match level {
        3 => center_divider(&mut blocks),
        4 => horizontal_bars(&mut blocks),
        5 => inner_frame(&mut blocks),
        _ => {}
    }

    let mut seen = HashSet::with_capacity(blocks.len());
    blocks.retain(|c| seen.insert(*c));
    blocks
}

/// Outer frame one grid step thick
fn border(blocks: &mut Vec<Cell>) {
    for x in (0..SCREEN_WIDTH).step_by(STEP) {
        blocks.push(IVec2::new(x, 0));
        blocks.push(IVec2::new(x, SCREEN_HEIGHT - SNAKE_SIZE));
    }
    for y in (SNAKE_SIZE..SCREEN_HEIGHT - SNAKE_SIZE).step_by(STEP) {
        blocks.push(IVec2::new(0, y));
        blocks.push(IVec2::new(SCREEN_WIDTH - SNAKE_SIZE, y));
    }
}

/// Level 3: vertical line down the middle, open over the middle third
fn center_divider(blocks: &mut Vec<Cell>) {
    let mid_x = SCREEN_WIDTH / 2;
    let gap_start = SCREEN_HEIGHT / 3;
    let gap_end = SCREEN_HEIGHT * 2 / 3;
    for y in (SNAKE_SIZE * 2..SCREEN_HEIGHT - SNAKE_SIZE * 2).step_by(STEP) {
        if !(gap_start..=gap_end).contains(&y) {
            blocks.push(IVec2::new(mid_x, y));
        }
    }
}

/// Level 4: two horizontal bars at the thirds, open in the middle
fn horizontal_bars(blocks: &mut Vec<Cell>) {
    let y1 = SCREEN_HEIGHT / 3;
    let y2 = SCREEN_HEIGHT * 2 / 3;
    let gap_left = SNAKE_SIZE * 3;
    let gap_right = SCREEN_WIDTH - SNAKE_SIZE * 5;
    for x in (SNAKE_SIZE * 2..SCREEN_WIDTH - SNAKE_SIZE * 2).step_by(STEP) {
        if x < gap_left || x > gap_right {
            blocks.push(IVec2::new(x, y1));
            blocks.push(IVec2::new(x, y2));
        }
    }
}

/// Level 5: square frame between the thirds with a one-cell door per side
fn inner_frame(blocks: &mut Vec<Cell>) {
    let (start_x, start_y) = (SCREEN_WIDTH / 3, SCREEN_HEIGHT / 3);
    let (end_x, end_y) = (SCREEN_WIDTH * 2 / 3, SCREEN_HEIGHT * 2 / 3);
    let (mid_x, mid_y) = (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

    for x in (start_x..=end_x).step_by(STEP) {
        if !spans(x, mid_x) {
            blocks.push(IVec2::new(x, start_y));
            blocks.push(IVec2::new(x, end_y));
        }
    }
    for y in (start_y..=end_y).step_by(STEP) {
        if !spans(y, mid_y) {
            blocks.push(IVec2::new(start_x, y));
            blocks.push(IVec2::new(end_x, y));
        }
    }
}

/// Whether a cell starting at `start` covers coordinate `mid`
#[inline]
fn spans(start: i32, mid: i32) -> bool {
    start <= mid && mid < start + SNAKE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has(blocks: &[Cell], x: i32, y: i32) -> bool {
        blocks.contains(&IVec2::new(x, y))
    }

    #[test]
    fn test_level_one_is_open() {
        assert!(generate_obstacles(1).is_empty());
        assert!(generate_obstacles(0).is_empty());
    }

    #[test]
    fn test_border_is_unbroken_on_levels_two_to_five() {
        for level in 2..=5 {
            let blocks = generate_obstacles(level);
            for x in (0..SCREEN_WIDTH).step_by(STEP) {
                assert!(has(&blocks, x, 0), "level {level} top gap at x={x}");
                assert!(
                    has(&blocks, x, SCREEN_HEIGHT - SNAKE_SIZE),
                    "level {level} bottom gap at x={x}"
                );
            }
            for y in (SNAKE_SIZE..SCREEN_HEIGHT - SNAKE_SIZE).step_by(STEP) {
                assert!(has(&blocks, 0, y), "level {level} left gap at y={y}");
                assert!(
                    has(&blocks, SCREEN_WIDTH - SNAKE_SIZE, y),
                    "level {level} right gap at y={y}"
                );
            }
        }
    }

    #[test]
    fn test_level_two_is_border_only() {
        // 38 cells across top and bottom, 23 down each side
        assert_eq!(generate_obstacles(2).len(), 38 * 2 + 23 * 2);
    }

    #[test]
    fn test_level_three_divider_has_middle_gap() {
        let blocks = generate_obstacles(3);
        let mid_x = SCREEN_WIDTH / 2;
        assert!(has(&blocks, mid_x, 64));
        assert!(has(&blocks, mid_x, 704));
        // 256 is just above the gap, 288..=512 is open, 544 resumes
        assert!(has(&blocks, mid_x, 256));
        for y in (288..=512).step_by(STEP) {
            assert!(!has(&blocks, mid_x, y), "divider should be open at y={y}");
        }
        assert!(has(&blocks, mid_x, 544));
    }

    #[test]
    fn test_level_four_bars() {
        let blocks = generate_obstacles(4);
        let (y1, y2) = (SCREEN_HEIGHT / 3, SCREEN_HEIGHT * 2 / 3);
        assert!(has(&blocks, 64, y1) && has(&blocks, 64, y2));
        assert!(!has(&blocks, 96, y1));
        assert!(!has(&blocks, 608, y2));
        assert!(!has(&blocks, 1024, y1));
        assert!(has(&blocks, 1056, y1) && has(&blocks, 1120, y2));
        // Level-3 divider does not carry over
        assert!(!has(&blocks, SCREEN_WIDTH / 2, 64));
    }

    #[test]
    fn test_level_five_frame_has_doors() {
        let blocks = generate_obstacles(5);
        let (sx, sy) = (SCREEN_WIDTH / 3, SCREEN_HEIGHT / 3);
        let (ex, ey) = (SCREEN_WIDTH * 2 / 3, SCREEN_HEIGHT * 2 / 3);
        assert!(has(&blocks, sx, sy));
        assert!(has(&blocks, ex, sy));
        assert!(has(&blocks, sx, ey));

        // The cell covering x=600 is missing from top and bottom
        assert!(!has(&blocks, 592, sy));
        assert!(!has(&blocks, 592, ey));
        assert!(has(&blocks, 560, sy) && has(&blocks, 624, sy));

        // The cell covering y=400 is missing from both sides
        assert!(!has(&blocks, sx, 394));
        assert!(!has(&blocks, ex, 394));
        assert!(has(&blocks, sx, 362) && has(&blocks, sx, 426));
    }

    #[test]
    fn test_levels_past_five_reuse_last_layout() {
        assert_eq!(generate_obstacles(9), generate_obstacles(5));
    }

    #[test]
    fn test_no_duplicates() {
        for level in 1..=5 {
            let blocks = generate_obstacles(level);
            let unique: HashSet<_> = blocks.iter().collect();
            assert_eq!(unique.len(), blocks.len());
        }
    }
}

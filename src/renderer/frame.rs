//! Frame building from game state

use glam::{IVec2, Vec2};

use super::commands::{DrawCommand, Sprite, colors};
use crate::consts::{FOOD_SIZE, SNAKE_SIZE, WIN_SCORE};
use crate::sim::GameState;

#[inline]
fn canvas(cell: IVec2) -> Vec2 {
    cell.as_vec2()
}

#[inline]
fn square(size: i32) -> Vec2 {
    Vec2::splat(size as f32)
}

/// Draw list for the current state, back to front
pub fn build_frame(state: &GameState, high_score: u32) -> Vec<DrawCommand> {
    let mut frame =
        Vec::with_capacity(state.obstacles.len() + state.poison.len() + state.snake.len() + 8);

    frame.push(DrawCommand::Clear {
        color: colors::BACKGROUND,
    });

    for &block in &state.obstacles {
        frame.push(DrawCommand::Rect {
            pos: canvas(block),
            size: square(SNAKE_SIZE),
            color: colors::OBSTACLE,
        });
    }

    frame.push(DrawCommand::Sprite {
        sprite: Sprite::Apple,
        pos: canvas(state.food),
        size: square(FOOD_SIZE),
    });
    for &p in &state.poison {
        frame.push(DrawCommand::Sprite {
            sprite: Sprite::Poison,
            pos: canvas(p),
            size: square(FOOD_SIZE),
        });
    }

    for &segment in &state.snake {
        frame.push(DrawCommand::Rect {
            pos: canvas(segment),
            size: square(SNAKE_SIZE),
            color: colors::SNAKE,
        });
    }

    // Eyes on the head show the heading
    let head = state.head();
    for offset in state.direction.eye_offsets(SNAKE_SIZE) {
        frame.push(DrawCommand::Rect {
            pos: canvas(head + offset),
            size: square(SNAKE_SIZE / 6),
            color: colors::EYE,
        });
    }

    frame.push(DrawCommand::Text {
        text: format!("Score: {}/{}", state.score, WIN_SCORE),
        pos: Vec2::new(10.0, 10.0),
        color: colors::HUD,
        big: false,
    });
    frame.push(DrawCommand::Text {
        text: format!("Level: {}", state.level),
        pos: Vec2::new(10.0, 40.0),
        color: colors::HUD,
        big: false,
    });
    frame.push(DrawCommand::Text {
        text: format!("High Score: {}", high_score),
        pos: Vec2::new(900.0, 10.0),
        color: colors::HIGH_SCORE,
        big: false,
    });

    frame
}

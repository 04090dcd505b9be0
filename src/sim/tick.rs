//! Fixed-step simulation tick
//!
//! Advances a round by exactly one grid step.

use super::collision::{Rect, hits_any_cell};
use super::state::{Cell, Direction, GameEvent, GameState, RoundStatus};
use crate::consts::*;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Most recent direction key seen since the previous tick
    pub direction: Option<Direction>,
    /// Player asked to quit; handled by the round controller before ticking
    pub quit: bool,
}

impl TickInput {
    pub fn steer(direction: Direction) -> Self {
        Self {
            direction: Some(direction),
            quit: false,
        }
    }
}

/// Wrap a head that left the canvas back in from the opposite edge
pub fn wrap_toroidal(mut head: Cell) -> Cell {
    if head.x < 0 {
        head.x = SCREEN_WIDTH - SNAKE_SIZE;
    } else if head.x >= SCREEN_WIDTH {
        head.x = 0;
    }
    if head.y < 0 {
        head.y = SCREEN_HEIGHT - SNAKE_SIZE;
    } else if head.y >= SCREEN_HEIGHT {
        head.y = 0;
    }
    head
}

/// Advance the round by one step
///
/// Self, obstacle and poison hits all end the round as a loss. The win check
/// runs last and overrides a loss from the same tick, so eating the final
/// apple always wins even if the head also landed on something lethal.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    if let Some(requested) = input.direction {
        if requested != state.direction.opposite() {
            state.direction = requested;
            state.moves.increment(requested);
        }
    }

    let mut head = state.head() + state.direction.delta() * SNAKE_SPEED;
    if state.level == 1 {
        head = wrap_toroidal(head);
    }
    state.snake.push_back(head);
    let head_box = Rect::cell(head);

    let body_len = state.snake.len() - 1;
    let hit_self = state.snake.iter().take(body_len).any(|&s| s == head);
    let hit_obstacle = hits_any_cell(&head_box, &state.obstacles);

    if head_box.intersects(&Rect::item_hitbox(state.food)) {
        state.target_length += 1;
        state.score += 1;
        state.apples_eaten += 1;
        state.events.push(GameEvent::AppleEaten);
        state.respawn_food();
        log::debug!("apple eaten, score {}", state.score);
    }

    let hit_poison = state
        .poison
        .iter()
        .any(|&p| head_box.intersects(&Rect::item_hitbox(p)));

    if hit_self || hit_obstacle || hit_poison {
        log::debug!(
            "fatal at {:?} (self={}, obstacle={}, poison={})",
            head,
            hit_self,
            hit_obstacle,
            hit_poison
        );
        state.events.push(GameEvent::Died);
        state.status = RoundStatus::Lost;
    }

    if state.snake.len() > state.target_length {
        state.snake.pop_front();
    }

    if state.score >= WIN_SCORE {
        state.status = RoundStatus::Won;
        state.events.push(GameEvent::RoundWon);
    }
}

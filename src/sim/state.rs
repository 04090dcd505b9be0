//! Game state and core simulation types
//!
//! Everything one round needs lives in `GameState`; it is created at round
//! start, mutated only by `tick`, and dropped when the round ends.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::food::{place_food, relocate_food, scatter_poison};
use super::level::generate_obstacles;
use crate::clamp_level;
use crate::consts::{POISON_COUNT, START_X, START_Y};

/// A position on the canvas, in canvas units
pub type Cell = IVec2;

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed reporting order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step; y grows downward
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Top-left offsets of the two eyes on a head of `size`, facing `self`
    pub fn eye_offsets(self, size: i32) -> [IVec2; 2] {
        let eye = size / 6;
        let near = eye;
        let far = size - 2 * eye;
        match self {
            Direction::Up => [IVec2::new(near, near), IVec2::new(far, near)],
            Direction::Down => [IVec2::new(near, far), IVec2::new(far, far)],
            Direction::Left => [IVec2::new(near, near), IVec2::new(near, far)],
            Direction::Right => [IVec2::new(far, near), IVec2::new(far, far)],
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// Accepted direction changes, per direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCounts([u32; 4]);

impl MoveCounts {
    pub fn get(&self, direction: Direction) -> u32 {
        self.0[direction.index()]
    }

    pub fn increment(&mut self, direction: Direction) {
        self.0[direction.index()] += 1;
    }

    /// All four directions in `Direction::ALL` order, zeros included
    pub fn entries(&self) -> [(Direction, u32); 4] {
        Direction::ALL.map(|d| (d, self.get(d)))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

/// Where a round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    Running,
    Won,
    Lost,
}

/// Side effects of a tick, drained by the round controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Food consumed
    AppleEaten,
    /// A lethal collision happened (self, obstacle or poison)
    Died,
    /// Score reached the win threshold
    RoundWon,
}

/// Complete state of one round
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the round RNG was built from
    pub seed: u64,
    /// Level being played (1-based, already clamped)
    pub level: u32,
    /// Body segments, tail first; the back element is the head
    pub snake: VecDeque<Cell>,
    /// Length the body is trimmed to after each step
    pub target_length: usize,
    pub direction: Direction,
    pub score: u32,
    /// Static obstacle cells for this level
    pub obstacles: Vec<Cell>,
    /// Top-left of the food footprint
    pub food: Cell,
    /// Top-left of each poison footprint
    pub poison: Vec<Cell>,
    pub moves: MoveCounts,
    /// Apples eaten this round
    pub apples_eaten: u32,
    pub status: RoundStatus,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Fresh round on `level`; food is placed before poison
    pub fn new(level: u32, seed: u64) -> Self {
        let level = clamp_level(level);
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = generate_obstacles(level);
        let food = place_food(&mut rng, &obstacles);
        let poison = scatter_poison(&mut rng, POISON_COUNT);

        let mut snake = VecDeque::new();
        snake.push_back(IVec2::new(START_X, START_Y));

        Self {
            seed,
            level,
            snake,
            target_length: 1,
            direction: Direction::Right,
            score: 0,
            obstacles,
            food,
            poison,
            moves: MoveCounts::default(),
            apples_eaten: 0,
            status: RoundStatus::Running,
            time_ticks: 0,
            events: Vec::new(),
            rng,
        }
    }

    /// Current head cell
    pub fn head(&self) -> Cell {
        self.snake
            .back()
            .copied()
            .unwrap_or(IVec2::new(START_X, START_Y))
    }

    pub fn is_running(&self) -> bool {
        self.status == RoundStatus::Running
    }

    /// Move the food to a different slot clear of obstacles
    pub fn respawn_food(&mut self) {
        self.food = relocate_food(&mut self.rng, &self.obstacles, self.food);
    }

    /// Take the pending events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

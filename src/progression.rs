//! Progression across levels
//!
//! A run is a sequence of rounds. Winning a level moves straight on to the
//! next one; losing, or clearing the final level, shows the summary and lets
//! the player retry or leave.

use std::io;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;
use crate::platform::Platform;
use crate::report::{Choice, RoundReport};
use crate::round::{RoundEnd, RoundSummary, play_round};
use crate::settings::Settings;
use crate::sim::GameState;

/// Golden-ratio increment spreading round seeds apart
const SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

/// Values that live for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub level: u32,
    /// Best score seen this run; never decreases
    pub high_score: u32,
    pub total_apples: u32,
    pub total_wins: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            level: 1,
            high_score: 0,
            total_apples: 0,
            total_wins: 0,
        }
    }
}

impl RunState {
    pub fn starting_at(level: u32) -> Self {
        Self {
            level: crate::clamp_level(level),
            ..Self::default()
        }
    }

    /// Raise the high score if `score` beats it
    pub fn observe_score(&mut self, score: u32) {
        self.high_score = self.high_score.max(score);
    }
}

/// Where the run is between rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Playing { level: u32 },
    ShowingSummary { level: u32, won: bool },
    Advancing { level: u32 },
    Retrying { level: u32, from_start: bool },
    Exiting,
}

/// Stage following a finished round
pub fn after_round(level: u32, won: bool) -> Stage {
    if won && level < MAX_LEVEL {
        Stage::Advancing { level }
    } else {
        Stage::ShowingSummary { level, won }
    }
}

/// Stage following the player's pick on the summary
pub fn after_choice(level: u32, won: bool, choice: Choice) -> Stage {
    let last_level = level >= MAX_LEVEL;
    match (won, last_level, choice) {
        (false, _, Choice::Retry) => Stage::Retrying {
            level,
            from_start: false,
        },
        (true, true, Choice::Retry) => Stage::Retrying {
            level: 1,
            from_start: true,
        },
        (true, false, Choice::Next) => Stage::Advancing { level },
        _ => Stage::Exiting,
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunExit {
    /// Player chose Exit on the summary, or ran out of levels
    Exited,
    /// Player quit mid-round or from the summary
    Quit,
}

/// Builds the opening state of a round from its level and seed
pub type RoundFactory = fn(u32, u64) -> GameState;

/// Drives rounds and summaries until the player leaves
pub struct Progression {
    settings: Settings,
    run: RunState,
    base_seed: u64,
    rounds_played: u64,
    new_round: RoundFactory,
}

impl Progression {
    pub fn new(settings: Settings) -> Self {
        let base_seed = settings.seed.unwrap_or_else(rand::random);
        let run = RunState::starting_at(settings.effective_start_level());
        Self {
            settings,
            run,
            base_seed,
            rounds_played: 0,
            new_round: GameState::new,
        }
    }

    /// Replace how each round's opening state is built
    pub fn with_round_factory(mut self, new_round: RoundFactory) -> Self {
        self.new_round = new_round;
        self
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    /// Seed for the next round; distinct per round, reproducible per run
    fn next_seed(&mut self) -> u64 {
        let seed = self
            .base_seed
            .wrapping_add(self.rounds_played.wrapping_mul(SEED_STEP));
        self.rounds_played += 1;
        seed
    }

    fn report(&self, summary: &RoundSummary) -> RoundReport {
        RoundReport {
            level: summary.level,
            won: summary.won,
            seconds: summary.elapsed_secs,
            level_apples: summary.apples,
            moves: summary.moves,
            total_wins: summary.total_wins,
            total_apples: summary.total_apples,
            last_level: summary.level >= MAX_LEVEL,
        }
    }

    /// Play the run to the end
    pub fn run<P: Platform>(&mut self, platform: &mut P) -> io::Result<RunExit> {
        log::info!(
            "Run started on level {} (seed {}, {} ticks/s)",
            self.run.level,
            self.base_seed,
            self.settings.effective_tick_rate()
        );
        let mut stage = Stage::Playing {
            level: self.run.level,
        };
        let mut last: Option<RoundSummary> = None;

        loop {
            stage = match stage {
                Stage::Playing { level } => {
                    self.run.level = level;
                    let seed = self.next_seed();
                    let state = (self.new_round)(level, seed);
                    match play_round(state, &mut self.run, platform)? {
                        RoundEnd::Quit => return Ok(RunExit::Quit),
                        RoundEnd::Finished(summary) => {
                            let next = after_round(summary.level, summary.won);
                            last = Some(summary);
                            next
                        }
                    }
                }
                Stage::ShowingSummary { level, won } => {
                    let choice = match &last {
                        Some(summary) => platform.show_summary(&self.report(summary))?,
                        None => Choice::Exit,
                    };
                    log::info!("Summary for level {}: {:?}", level, choice);
                    if choice == Choice::Quit {
                        return Ok(RunExit::Quit);
                    }
                    after_choice(level, won, choice)
                }
                Stage::Advancing { level } => {
                    if level >= MAX_LEVEL {
                        Stage::Exiting
                    } else {
                        Stage::Playing { level: level + 1 }
                    }
                }
                Stage::Retrying { level, from_start } => {
                    if from_start {
                        self.run = RunState::starting_at(level);
                    }
                    Stage::Playing { level }
                }
                Stage::Exiting => {
                    log::info!(
                        "Run over: {} wins, {} apples, high score {}",
                        self.run.total_wins,
                        self.run.total_apples,
                        self.run.high_score
                    );
                    return Ok(RunExit::Exited);
                }
            };
        }
    }
}

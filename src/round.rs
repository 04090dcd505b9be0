//! Round controller
//!
//! Runs the tick loop for a single level until the snake dies, the score
//! threshold is reached, or the player quits.

use std::io;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::platform::Platform;
use crate::progression::RunState;
use crate::renderer::build_frame;
use crate::sim::{GameEvent, GameState, MoveCounts, RoundStatus, tick};

/// Immutable record of a finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub level: u32,
    pub won: bool,
    pub elapsed_secs: f64,
    pub ticks: u64,
    /// Apples eaten during this round
    pub apples: u32,
    pub score: u32,
    pub moves: MoveCounts,
    /// Run totals after this round
    pub total_apples: u32,
    pub total_wins: u32,
    pub high_score: u32,
}

/// How a round stopped
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEnd {
    Finished(RoundSummary),
    /// Player quit mid-round; the round state was discarded
    Quit,
}

/// Play `state` to completion, updating the run-wide totals as it goes
pub fn play_round<P: Platform>(
    mut state: GameState,
    run: &mut RunState,
    platform: &mut P,
) -> io::Result<RoundEnd> {
    log::info!("Level {} started (seed {})", state.level, state.seed);
    let started = Instant::now();

    while state.is_running() {
        let input = platform.poll_input()?;
        if input.quit {
            log::info!("Quit during level {}", state.level);
            return Ok(RoundEnd::Quit);
        }

        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::AppleEaten => {
                    run.total_apples += 1;
                    platform.play(SoundEffect::Eat)?;
                }
                GameEvent::Died => platform.play(SoundEffect::Die)?,
                GameEvent::RoundWon => run.total_wins += 1,
            }
        }
        run.observe_score(state.score);

        platform.present(&build_frame(&state, run.high_score))?;
        platform.wait_frame();
    }

    let won = state.status == RoundStatus::Won;
    let summary = RoundSummary {
        level: state.level,
        won,
        elapsed_secs: started.elapsed().as_secs_f64(),
        ticks: state.time_ticks,
        apples: state.apples_eaten,
        score: state.score,
        moves: state.moves,
        total_apples: run.total_apples,
        total_wins: run.total_wins,
        high_score: run.high_score,
    };
    log::info!(
        "Level {} {} after {} ticks ({:.1}s), score {}, {} turns",
        summary.level,
        if won { "won" } else { "lost" },
        summary.ticks,
        summary.elapsed_secs,
        summary.score,
        summary.moves.total()
    );
    Ok(RoundEnd::Finished(summary))
}

//! Platform abstraction layer
//!
//! Everything the game needs from the outside world goes through `Platform`:
//! - Input (latched once per tick)
//! - Presenting a frame of draw intents
//! - Sound cues
//! - The blocking post-round summary
//! - Tick pacing

pub mod terminal;

use std::io;
use std::time::{Duration, Instant};

use crate::audio::SoundEffect;
use crate::renderer::DrawCommand;
use crate::report::{Choice, RoundReport};
use crate::sim::{Direction, TickInput};

pub use terminal::TerminalPlatform;

/// Input/output seam between the game loops and a frontend
pub trait Platform {
    /// Input gathered since the previous call
    fn poll_input(&mut self) -> io::Result<TickInput>;
    /// Show one frame
    fn present(&mut self, frame: &[DrawCommand]) -> io::Result<()>;
    /// Fire a sound cue
    fn play(&mut self, effect: SoundEffect) -> io::Result<()>;
    /// Show the round summary and block until the player picks an option
    fn show_summary(&mut self, report: &RoundReport) -> io::Result<Choice>;
    /// Sleep until the next tick is due
    fn wait_frame(&mut self);
}

/// A player action decoded from a raw key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Steer(Direction),
    Quit,
}

/// Collapses all key events of one tick into a single `TickInput`
///
/// Later steering overwrites earlier steering, so only the most recent
/// direction reaches the simulation. Quit is sticky.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputLatch {
    pending: TickInput,
}

impl InputLatch {
    pub fn push(&mut self, command: Command) {
        match command {
            Command::Steer(direction) => self.pending.direction = Some(direction),
            Command::Quit => self.pending.quit = true,
        }
    }

    /// Hand out the latched input and start a new tick
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }
}

/// Fixed-rate pacing
///
/// Tracks the deadline of the next tick. A caller that falls behind is
/// resynchronised to "now" instead of running a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    next: Instant,
}

impl FrameClock {
    pub fn new(ticks_per_second: u32) -> Self {
        let period = Duration::from_secs(1) / ticks_per_second.max(1);
        Self {
            period,
            next: Instant::now() + period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next deadline as of `now`, advancing the deadline
    pub fn advance(&mut self, now: Instant) -> Duration {
        let wait = self.next.saturating_duration_since(now);
        let period = self.period();
        self.next = if wait.is_zero() {
            now + period
        } else {
            self.next + period
        };
        wait
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let wait = self.advance(Instant::now());
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }
}

/// In-memory platform for driving the loops from tests
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    pub struct ScriptedPlatform {
        /// Inputs returned by `poll_input`, one per tick; empty means no input
        pub inputs: VecDeque<TickInput>,
        /// Answers returned by `show_summary`; empty means `Exit`
        pub choices: VecDeque<Choice>,
        /// Quit as soon as this many polls have happened
        pub quit_after_polls: Option<usize>,
        pub polls: usize,
        pub frames: usize,
        pub last_frame: Vec<DrawCommand>,
        pub sounds: Vec<SoundEffect>,
        pub reports: Vec<RoundReport>,
    }

    impl Platform for ScriptedPlatform {
        fn poll_input(&mut self) -> io::Result<TickInput> {
            self.polls += 1;
            let mut input = self.inputs.pop_front().unwrap_or_default();
            if self.quit_after_polls.is_some_and(|n| self.polls > n) {
                input.quit = true;
            }
            Ok(input)
        }

        fn present(&mut self, frame: &[DrawCommand]) -> io::Result<()> {
            self.frames += 1;
            self.last_frame = frame.to_vec();
            Ok(())
        }

        fn play(&mut self, effect: SoundEffect) -> io::Result<()> {
            self.sounds.push(effect);
            Ok(())
        }

        fn show_summary(&mut self, report: &RoundReport) -> io::Result<Choice> {
            self.reports.push(report.clone());
            Ok(self.choices.pop_front().unwrap_or(Choice::Exit))
        }

        fn wait_frame(&mut self) {}
    }
}

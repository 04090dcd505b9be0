//! Post-round statistics handed to the reporting surface

use serde::{Deserialize, Serialize};

use crate::sim::{Direction, MoveCounts};

/// What the player picked on the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Retry,
    Next,
    Exit,
    /// Left the summary with a quit key instead of a button
    Quit,
}

impl Choice {
    pub fn label(self) -> &'static str {
        match self {
            Choice::Retry => "Try Again",
            Choice::Next => "Next Level",
            Choice::Exit => "Exit",
            Choice::Quit => "Quit",
        }
    }
}

/// Everything the summary screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub level: u32,
    pub won: bool,
    /// Wall-clock length of the round
    pub seconds: f64,
    /// Apples eaten this level
    pub level_apples: u32,
    pub moves: MoveCounts,
    pub total_wins: u32,
    pub total_apples: u32,
    /// Whether `level` is the final level
    pub last_level: bool,
}

impl RoundReport {
    /// Headline for the summary
    pub fn status_text(&self) -> &'static str {
        match (self.won, self.last_level) {
            (true, true) => "YOU FINISHED ALL LEVELS!",
            (true, false) => "YOU WON THIS LEVEL!",
            (false, _) => "YOU LOST!",
        }
    }

    /// Detail lines under the headline
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Level: {}", self.level),
            format!("Time played: {:.2} seconds", self.seconds),
            format!("Apples this level: {}", self.level_apples),
            format!("Total apples eaten: {}", self.total_apples),
            format!("Total wins this run: {}", self.total_wins),
        ]
    }

    /// The two buttons the summary offers
    pub fn choices(&self) -> [Choice; 2] {
        if self.won && !self.last_level {
            [Choice::Retry, Choice::Next]
        } else {
            [Choice::Retry, Choice::Exit]
        }
    }

    /// Bar lengths for the moves-per-direction chart, scaled so the longest
    /// bar is `width` wide
    pub fn move_bars(&self, width: usize) -> [(Direction, u32, usize); 4] {
        let max = self.moves.entries().iter().map(|&(_, n)| n).max().unwrap_or(0);
        self.moves.entries().map(|(dir, n)| {
            let len = if max == 0 {
                0
            } else {
                (n as usize * width).div_ceil(max as usize)
            };
            (dir, n, len)
        })
    }
}

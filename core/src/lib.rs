#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use hints::*;
pub use progress::*;
pub use selection::*;
pub use trie::*;
pub use types::*;
pub use wordlist::*;

mod board;
mod engine;
mod error;
mod generator;
mod hints;
mod progress;
mod selection;
pub mod solver;
mod trie;
mod types;
mod wordlist;

/// Everything that identifies one generated board.
///
/// Changing any field changes the seed key and therefore the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub puzzle_id: u32,
    pub size: Size2,
    pub dictionary_id: String,
    pub frequency_table_id: String,
}

impl PuzzleConfig {
    pub const DEFAULT_SIZE: Size2 = (4, 4);
    pub const DEFAULT_DICTIONARY: &'static str = "small.json";
    pub const DEFAULT_FREQUENCIES: &'static str = "letters.json";

    pub fn new(puzzle_id: u32) -> Self {
        Self {
            puzzle_id,
            size: Self::DEFAULT_SIZE,
            dictionary_id: Self::DEFAULT_DICTIONARY.into(),
            frequency_table_id: Self::DEFAULT_FREQUENCIES.into(),
        }
    }

    /// The daily puzzle uses the day key as its id.
    pub fn for_day(day: DayKey) -> Self {
        Self::new(day.value())
    }

    pub fn with_size(mut self, size: Size2) -> Self {
        self.size = size;
        self
    }

    pub fn with_sources(
        mut self,
        dictionary_id: impl Into<String>,
        frequency_table_id: impl Into<String>,
    ) -> Self {
        self.dictionary_id = dictionary_id.into();
        self.frequency_table_id = frequency_table_id.into();
        self
    }

    pub const fn total_tiles(&self) -> TileIndex {
        area(self.size.0, self.size.1)
    }

    pub fn seed_key(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.puzzle_id,
            self.dictionary_id,
            self.frequency_table_id,
            self.size.0,
            self.size.1
        )
    }
}

/// Emitted once when a board is completed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub hints_remaining: u32,
    pub time_taken_ms: u64,
    pub streak: u32,
    pub max_streak: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// First run of this board, `streak_reset` tells whether a missed day
    /// broke the streak.
    Started { streak_reset: bool },
    /// Board was already started, nothing changed.
    Resumed(SessionState),
    /// A board without any words is complete as soon as it starts.
    Completed(CompletionRecord),
}

impl StartOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Resumed(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    WordRejected,
    WordAlreadyFound,
    WordAccepted,
    /// The word was accepted and it was the last one missing.
    GameCompleted(CompletionRecord),
}

impl SubmitOutcome {
    pub const fn has_update(&self) -> bool {
        use SubmitOutcome::*;
        match self {
            WordRejected => false,
            WordAlreadyFound => false,
            WordAccepted => true,
            GameCompleted(_) => true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    HintGranted(RevealResult),
    /// The hint uncovered the whole word, which now counts as found.
    WordCompleted(RevealResult),
    /// The completed word was the last one missing.
    GameCompleted(RevealResult, CompletionRecord),
}

impl HintOutcome {
    pub fn reveal(&self) -> &RevealResult {
        match self {
            Self::HintGranted(reveal) => reveal,
            Self::WordCompleted(reveal) => reveal,
            Self::GameCompleted(reveal, _) => reveal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileOutcome {
    Selection(SelectionEvent),
    Submitted { word: String, outcome: SubmitOutcome },
}

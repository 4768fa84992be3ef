use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// Every word hidden on one board plus a by-length index for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordList {
    solution: BTreeSet<String>,
    by_length: BTreeMap<usize, Vec<String>>,
}

impl WordList {
    pub fn new(solution: BTreeSet<String>) -> Self {
        let mut by_length: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for word in &solution {
            by_length
                .entry(word.chars().count())
                .or_default()
                .push(word.clone());
        }
        // the solution set iterates sorted, but keep the buckets honest anyway
        by_length.values_mut().for_each(|bucket| bucket.sort());
        Self {
            solution,
            by_length,
        }
    }

    pub fn solve(board: &Board, dictionary: &Trie) -> Self {
        Self::new(solver::find_all(board, dictionary))
    }

    pub fn solution(&self) -> &BTreeSet<String> {
        &self.solution
    }

    pub fn by_length(&self) -> &BTreeMap<usize, Vec<String>> {
        &self.by_length
    }

    pub fn contains(&self, word: &str) -> bool {
        self.solution.contains(word)
    }

    pub fn len(&self) -> usize {
        self.solution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solution.is_empty()
    }

    /// Share-card text announcing how many words are hidden.
    pub fn preview_text(&self) -> String {
        let count = self.len();
        format!(
            "{} word{} to find today. Play now to find them all.",
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}

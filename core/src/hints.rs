use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;

/// What happens when a hint uncovers a word's second-to-last letter.
///
/// Awaiting product sign-off, see `DESIGN.md`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HintPolicy {
    /// Every hint reveals one letter. Revealing the final hidden letter
    /// completes the word exactly like submitting it.
    #[default]
    CompleteOnLastLetter,
    /// Once a single letter would remain hidden it is revealed as well and
    /// the word completes.
    AutoRevealFinalLetter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealResult {
    pub word: String,
    /// Letter position uncovered by this hint, `None` when nothing was hidden.
    pub index: Option<usize>,
    /// All uncovered positions after this hint.
    pub revealed: BTreeSet<usize>,
    /// Whether every letter is now known and the word counts as found.
    pub completes_word: bool,
    pub hints_remaining: u32,
}

/// Spends hints to reveal letters of unsolved words.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HintAllocator {
    policy: HintPolicy,
}

impl HintAllocator {
    pub const fn new(policy: HintPolicy) -> Self {
        Self { policy }
    }

    pub const fn policy(&self) -> HintPolicy {
        self.policy
    }

    /// Reveals one hidden letter of `word`, chosen uniformly by `rng`.
    ///
    /// Does not mark the word as found, callers do that when
    /// [`RevealResult::completes_word`] is set.
    pub fn grant(
        &self,
        account: &mut AccountProgress,
        board: &mut BoardProgress,
        words: &WordList,
        word: &str,
        rng: &mut SeededRng,
    ) -> Result<RevealResult> {
        if !words.contains(word) {
            return Err(PuzzleError::WordNotInSolution(word.to_string()));
        }
        if board.found.contains(word) {
            return Err(PuzzleError::WordAlreadyFound(word.to_string()));
        }

        let length = word.chars().count();
        let revealed = board.hints.entry(word.to_string()).or_default();
        let hidden: Vec<usize> = (0..length).filter(|i| !revealed.contains(i)).collect();

        if hidden.is_empty() {
            log::warn!("Hint requested for {:?} with every letter known", word);
            return Ok(RevealResult {
                word: word.to_string(),
                index: None,
                revealed: revealed.clone(),
                completes_word: true,
                hints_remaining: account.hint_budget,
            });
        }

        if account.hint_budget == 0 {
            return Err(PuzzleError::InsufficientHints);
        }
        account.hint_budget -= 1;

        let index = hidden[rng.next_index(hidden.len())];
        revealed.insert(index);
        let still_hidden = hidden.len() - 1;

        let completes_word = match self.policy {
            HintPolicy::CompleteOnLastLetter => still_hidden == 0,
            HintPolicy::AutoRevealFinalLetter => {
                if still_hidden == 1 {
                    revealed.extend(hidden.iter().filter(|&&i| i != index));
                }
                still_hidden <= 1
            }
        };

        log::debug!(
            "Hint revealed letter {} of {:?}, {} hints left",
            index,
            word,
            account.hint_budget
        );
        Ok(RevealResult {
            word: word.to_string(),
            index: Some(index),
            revealed: revealed.clone(),
            completes_word,
            hints_remaining: account.hint_budget,
        })
    }
}

/// Renders a word for the word list: found words in full, otherwise hidden
/// letters as `_` and hinted letters in place, separated by spaces.
pub fn mask_word(word: &str, found: bool, revealed: Option<&BTreeSet<usize>>) -> String {
    if found {
        return word.to_string();
    }
    let mut masked = String::new();
    for (i, letter) in word.chars().enumerate() {
        if i > 0 {
            masked.push(' ');
        }
        let shown = revealed.is_some_and(|revealed| revealed.contains(&i));
        masked.push(if shown { letter } else { '_' });
    }
    masked
}

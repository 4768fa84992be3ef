use alloc::collections::BTreeMap;
use alloc::string::String;

use super::*;

/// Hand-picked boards for specific days, replacing the generated letters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardOverrides {
    boards: BTreeMap<DayKey, String>,
}

impl BoardOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, day: DayKey, letters: impl Into<String>) -> Option<String> {
        self.boards.insert(day, letters.into())
    }

    /// Letters for a puzzle id, if that id is a day with an override.
    pub fn letters_for(&self, puzzle_id: u32) -> Option<&str> {
        let day = DayKey::try_from(puzzle_id).ok()?;
        self.boards.get(&day).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(DayKey, S)> for BoardOverrides {
    fn from_iter<T: IntoIterator<Item = (DayKey, S)>>(iter: T) -> Self {
        Self {
            boards: iter
                .into_iter()
                .map(|(day, letters)| (day, letters.into()))
                .collect(),
        }
    }
}

/// Uses an override when one exists for the puzzle and fits its board size,
/// otherwise defers to `fallback`.
#[derive(Debug)]
pub struct OverridingGenerator<'a, G> {
    overrides: &'a BoardOverrides,
    fallback: G,
}

impl<'a, G: BoardGenerator> OverridingGenerator<'a, G> {
    pub fn new(overrides: &'a BoardOverrides, fallback: G) -> Self {
        Self {
            overrides,
            fallback,
        }
    }
}

impl<G: BoardGenerator> BoardGenerator for OverridingGenerator<'_, G> {
    fn generate(self, config: &PuzzleConfig) -> Result<Board> {
        let total = usize::from(config.total_tiles());
        match self.overrides.letters_for(config.puzzle_id) {
            Some(letters) if letters.chars().count() == total => {
                log::info!("Using board override for puzzle {}", config.puzzle_id);
                Board::from_letters(config.size, letters)
            }
            Some(letters) => {
                log::warn!(
                    "Board override for puzzle {} has {} letters, a {}x{} board needs {}",
                    config.puzzle_id,
                    letters.chars().count(),
                    config.size.0,
                    config.size.1,
                    total
                );
                self.fallback.generate(config)
            }
            None => self.fallback.generate(config),
        }
    }
}

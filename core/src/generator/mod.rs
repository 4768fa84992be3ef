use alloc::string::ToString;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::*;
pub use overrides::*;
pub use random::*;
pub use seeded::*;

mod overrides;
mod random;
mod seeded;

pub trait BoardGenerator {
    fn generate(self, config: &PuzzleConfig) -> Result<Board>;
}

/// Letters ordered most common first, as loaded from a frequency table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<alloc::string::String>", into = "Vec<alloc::string::String>")]
pub struct FrequencyTable {
    letters: Vec<char>,
}

impl FrequencyTable {
    /// Every entry must be exactly one lowercase letter.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let letters = entries
            .into_iter()
            .map(|entry| {
                let entry = entry.as_ref();
                let mut chars = entry.chars();
                match (chars.next(), chars.next()) {
                    (Some(letter), None) if letter.is_lowercase() => Ok(letter),
                    _ => Err(PuzzleError::InvalidFrequencyEntry(entry.to_string())),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        if letters.is_empty() {
            return Err(PuzzleError::EmptyFrequencyTable);
        }
        Ok(Self { letters })
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }
}

impl TryFrom<Vec<alloc::string::String>> for FrequencyTable {
    type Error = PuzzleError;

    fn try_from(entries: Vec<alloc::string::String>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<FrequencyTable> for Vec<alloc::string::String> {
    fn from(table: FrequencyTable) -> Self {
        table.letters.iter().map(|letter| letter.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_table_accepts_single_letters() {
        let table = FrequencyTable::new(["e", "t", "a"]).unwrap();

        assert_eq!(table.letters(), &['e', 't', 'a']);
    }

    #[test]
    fn frequency_table_rejects_malformed_input() {
        assert_eq!(
            FrequencyTable::new(Vec::<&str>::new()),
            Err(PuzzleError::EmptyFrequencyTable)
        );
        assert_eq!(
            FrequencyTable::new(["e", "th"]),
            Err(PuzzleError::InvalidFrequencyEntry("th".to_string()))
        );
        assert!(FrequencyTable::new(["E"]).is_err());
        assert!(FrequencyTable::new([""]).is_err());
    }

    #[test]
    fn frequency_table_deserializes_from_json_strings() {
        let table: FrequencyTable = serde_json::from_str(r#"["s","e"]"#).unwrap();
        assert_eq!(table.letters(), &['s', 'e']);

        assert!(serde_json::from_str::<FrequencyTable>("[]").is_err());
    }
}

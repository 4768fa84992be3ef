use super::*;

/// Fills the board with letters drawn from a weighted frequency pool.
///
/// The generator borrows the session's [`SeededRng`] so later draws (hint
/// reveals) continue the same sequence.
#[derive(Debug)]
pub struct SeededBoardGenerator<'a> {
    rng: &'a mut SeededRng,
    frequencies: &'a FrequencyTable,
}

impl<'a> SeededBoardGenerator<'a> {
    pub fn new(rng: &'a mut SeededRng, frequencies: &'a FrequencyTable) -> Self {
        Self { rng, frequencies }
    }
}

impl BoardGenerator for SeededBoardGenerator<'_> {
    fn generate(self, config: &PuzzleConfig) -> Result<Board> {
        let total = usize::from(config.total_tiles());
        if total == 0 {
            return Err(PuzzleError::InvalidDimensions);
        }

        let letters = self.rng.weighted_pick(self.frequencies.letters(), total);
        log::debug!(
            "Generated {}x{} board for puzzle {}",
            config.size.0,
            config.size.1,
            config.puzzle_id
        );
        Board::new(config.size, &letters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    fn frequencies() -> FrequencyTable {
        let letters = "etaoinshrdlcumwfgypbvkjxqz".chars().map(String::from);
        FrequencyTable::new(letters.collect::<Vec<_>>()).unwrap()
    }

    fn generate(config: &PuzzleConfig) -> Board {
        let table = frequencies();
        let mut rng = SeededRng::seed(&config.seed_key());
        SeededBoardGenerator::new(&mut rng, &table)
            .generate(config)
            .unwrap()
    }

    #[test]
    fn same_config_generates_same_board() {
        let config = PuzzleConfig::new(20240101);

        assert_eq!(generate(&config), generate(&config));
    }

    #[test]
    fn any_config_field_changes_the_board() {
        let base = PuzzleConfig::new(20240101);
        let board = generate(&base);

        let mut other_dictionary = base.clone();
        other_dictionary.dictionary_id = "large.json".into();
        assert_ne!(board.letters(), generate(&other_dictionary).letters());

        assert_ne!(board.letters(), generate(&PuzzleConfig::new(20240102)).letters());
    }

    #[test]
    fn board_matches_requested_size() {
        let config = PuzzleConfig::new(7).with_size((6, 3));
        let board = generate(&config);

        assert_eq!(board.size(), (6, 3));
        assert_eq!(board.total_tiles(), 18);
        assert!(board.letters().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn zero_sized_config_is_rejected() {
        let table = frequencies();
        let mut rng = SeededRng::seed("x");
        let config = PuzzleConfig::new(1).with_size((0, 4));

        assert_eq!(
            SeededBoardGenerator::new(&mut rng, &table).generate(&config),
            Err(PuzzleError::InvalidDimensions)
        );
    }
}

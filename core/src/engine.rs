use alloc::string::{String, ToString};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one board for one player.
///
/// Valid transitions:
/// - NotStarted -> InProgress
/// - NotStarted -> Completed (boards without words)
/// - InProgress -> Completed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl SessionState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hint budget guaranteed at the start of each new day.
    pub daily_hint_floor: u32,
    pub hint_policy: HintPolicy,
}

impl EngineConfig {
    pub const DEFAULT_DAILY_HINT_FLOOR: u32 = 3;
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            daily_hint_floor: Self::DEFAULT_DAILY_HINT_FLOOR,
            hint_policy: HintPolicy::default(),
        }
    }
}

/// A generated board together with its solution.
///
/// Never changes after generation. The generator used to build the board is
/// kept so hint reveals continue its sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Puzzle {
    config: PuzzleConfig,
    board: Board,
    words: WordList,
    rng: SeededRng,
}

impl Puzzle {
    pub fn generate(
        config: PuzzleConfig,
        dictionary: &Trie,
        frequencies: &FrequencyTable,
        overrides: &BoardOverrides,
    ) -> Result<Self> {
        if dictionary.is_empty() {
            return Err(PuzzleError::EmptyDictionary);
        }

        let mut rng = SeededRng::seed(&config.seed_key());
        let board = OverridingGenerator::new(
            overrides,
            SeededBoardGenerator::new(&mut rng, frequencies),
        )
        .generate(&config)?;
        let words = WordList::solve(&board, dictionary);

        log::info!(
            "Puzzle {} ({}) has {} words to find",
            config.puzzle_id,
            board.letters(),
            words.len()
        );
        Ok(Self {
            config,
            board,
            words,
            rng,
        })
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }
}

/// One player's session on one puzzle.
///
/// Every transition works on a copy of the committed progress, hands the copy
/// to a [`ProgressSink`] as its last step and only then reports its outcome.
/// A failed save leaves the new progress pending, further transitions are
/// refused until [`PuzzleSession::retry_save`] succeeds.
#[derive(Clone, Debug)]
pub struct PuzzleSession {
    puzzle: Puzzle,
    day: DayKey,
    seed_key: String,
    config: EngineConfig,
    hints: HintAllocator,
    selection: Selection,
    progress: PlayerProgress,
    save_pending: bool,
}

impl PuzzleSession {
    pub fn new(puzzle: Puzzle, day: DayKey, progress: PlayerProgress, config: EngineConfig) -> Self {
        let seed_key = puzzle.config.seed_key();
        Self {
            puzzle,
            day,
            seed_key,
            config,
            hints: HintAllocator::new(config.hint_policy),
            selection: Selection::new(),
            progress,
            save_pending: false,
        }
    }

    pub fn state(&self) -> SessionState {
        match self.board_progress() {
            None => SessionState::NotStarted,
            Some(board) if board.is_finished() => SessionState::Completed,
            Some(_) => SessionState::InProgress,
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn board(&self) -> &Board {
        &self.puzzle.board
    }

    pub fn words(&self) -> &WordList {
        &self.puzzle.words
    }

    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn seed_key(&self) -> &str {
        &self.seed_key
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn board_progress(&self) -> Option<&BoardProgress> {
        self.progress.board(&self.seed_key)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn hints_remaining(&self) -> u32 {
        self.progress.account.hint_budget
    }

    pub fn found_count(&self) -> usize {
        self.board_progress().map_or(0, |board| board.found.len())
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.board_progress()
            .is_some_and(|board| board.found.contains(word))
    }

    pub fn is_save_pending(&self) -> bool {
        self.save_pending
    }

    /// Word as shown in the word list, with hinted letters filled in.
    pub fn masked(&self, word: &str) -> String {
        let revealed = self.board_progress().and_then(|board| board.revealed(word));
        hints::mask_word(word, self.is_found(word), revealed)
    }

    /// Starts the board the first time it is played.
    ///
    /// The first board of a new day also records the day as played, checks
    /// the streak and tops hints up to the daily floor.
    pub fn start(&mut self, now: DateTime<Utc>, sink: &mut impl ProgressSink) -> Result<StartOutcome> {
        self.check_saved()?;

        let state = self.state();
        if state.is_started() {
            return Ok(StartOutcome::Resumed(state));
        }

        let mut next = self.progress.clone();
        let mut streak_reset = false;
        if !next.account.has_played(self.day) {
            next.account.record_played(self.day);
            streak_reset = next.account.check_streak(self.day);
            next.account.ensure_hint_floor(self.config.daily_hint_floor);
        }

        let mut board = BoardProgress::new(self.day);
        board.started_at = Some(now);
        next.boards.insert(self.seed_key.clone(), board);
        let completed = self.complete_if_solved(&mut next, now);

        log::debug!(
            "Started puzzle {} for {}, streak {}{}",
            self.puzzle.config.puzzle_id,
            self.day,
            next.account.streak,
            if streak_reset { " (reset)" } else { "" }
        );
        self.commit(next, sink)?;

        Ok(match completed {
            Some(record) => StartOutcome::Completed(record),
            None => StartOutcome::Started { streak_reset },
        })
    }

    pub fn submit(
        &mut self,
        word: &str,
        now: DateTime<Utc>,
        sink: &mut impl ProgressSink,
    ) -> Result<SubmitOutcome> {
        self.check_saved()?;
        if !self.state().is_started() {
            return Err(PuzzleError::NotStarted);
        }

        if self.is_found(word) {
            return Ok(SubmitOutcome::WordAlreadyFound);
        }
        if !self.puzzle.words.contains(word) {
            log::debug!("Rejected {:?}", word);
            return Ok(SubmitOutcome::WordRejected);
        }

        let mut next = self.progress.clone();
        if let Some(board) = next.board_mut(&self.seed_key) {
            board.found.insert(word.to_string());
        }
        let completed = self.complete_if_solved(&mut next, now);
        log::debug!("Accepted {:?}", word);
        self.commit(next, sink)?;

        Ok(match completed {
            Some(record) => SubmitOutcome::GameCompleted(record),
            None => SubmitOutcome::WordAccepted,
        })
    }

    /// Spends one hint on `word`.
    pub fn request_hint(
        &mut self,
        word: &str,
        now: DateTime<Utc>,
        sink: &mut impl ProgressSink,
    ) -> Result<HintOutcome> {
        self.check_saved()?;
        match self.state() {
            SessionState::NotStarted => return Err(PuzzleError::NotStarted),
            SessionState::Completed => return Err(PuzzleError::AlreadyCompleted),
            SessionState::InProgress => {}
        }

        let mut next = self.progress.clone();
        let PlayerProgress { account, boards } = &mut next;
        let Some(board) = boards.get_mut(&self.seed_key) else {
            return Err(PuzzleError::NotStarted);
        };
        let reveal = self.hints.grant(
            account,
            board,
            &self.puzzle.words,
            word,
            &mut self.puzzle.rng,
        )?;

        let outcome = if reveal.completes_word {
            board.found.insert(word.to_string());
            match self.complete_if_solved(&mut next, now) {
                Some(record) => HintOutcome::GameCompleted(reveal, record),
                None => HintOutcome::WordCompleted(reveal),
            }
        } else {
            HintOutcome::HintGranted(reveal)
        };
        self.commit(next, sink)?;
        Ok(outcome)
    }

    /// Adds hints granted from outside, e.g. after a purchase.
    pub fn grant_hints(&mut self, count: u32, sink: &mut impl ProgressSink) -> Result<u32> {
        self.check_saved()?;

        let mut next = self.progress.clone();
        next.account.hint_budget = next.account.hint_budget.saturating_add(count);
        let budget = next.account.hint_budget;
        log::debug!("Granted {} hints, {} available", count, budget);
        self.commit(next, sink)?;
        Ok(budget)
    }

    /// Drives the tile selection, submitting the word when the path's last
    /// tile is activated again.
    pub fn activate_tile(
        &mut self,
        tile: usize,
        now: DateTime<Utc>,
        sink: &mut impl ProgressSink,
    ) -> Result<TileOutcome> {
        match self.selection.activate(&self.puzzle.board, tile)? {
            SelectionEvent::Submitted(word) => {
                let outcome = self.submit(&word, now, sink)?;
                Ok(TileOutcome::Submitted { word, outcome })
            }
            event => Ok(TileOutcome::Selection(event)),
        }
    }

    /// Saves pending progress again after an earlier failure.
    pub fn retry_save(&mut self, sink: &mut impl ProgressSink) -> Result<()> {
        if !self.save_pending {
            return Ok(());
        }
        sink.save(&self.progress)
            .map_err(|err| PuzzleError::PersistenceFailure {
                reason: err.to_string(),
            })?;
        self.save_pending = false;
        log::debug!("Pending progress saved");
        Ok(())
    }

    fn check_saved(&self) -> Result<()> {
        if self.save_pending {
            Err(PuzzleError::SavePending)
        } else {
            Ok(())
        }
    }

    fn commit(&mut self, next: PlayerProgress, sink: &mut impl ProgressSink) -> Result<()> {
        self.progress = next;
        if let Err(err) = sink.save(&self.progress) {
            log::warn!("Could not save progress, keeping it pending: {}", err);
            self.save_pending = true;
            return Err(PuzzleError::PersistenceFailure {
                reason: err.to_string(),
            });
        }
        Ok(())
    }

    /// Marks the board finished once every solution word is found.
    fn complete_if_solved(&self, next: &mut PlayerProgress, now: DateTime<Utc>) -> Option<CompletionRecord> {
        let board = next.board_mut(&self.seed_key)?;
        let solution = self.puzzle.words.solution();
        if board.is_finished() || !solution.iter().all(|word| board.found.contains(word)) {
            return None;
        }

        board.finished_at = Some(now);
        let time_taken_ms = board.time_taken_ms().unwrap_or(0);
        next.account.record_completed(self.day);
        let purged = next.purge_stale(self.day);

        let record = CompletionRecord {
            hints_remaining: next.account.hint_budget,
            time_taken_ms,
            streak: next.account.streak,
            max_streak: next.account.max_streak,
        };
        log::info!(
            "Completed puzzle {} in {}ms, streak {}, purged {} old boards",
            self.puzzle.config.puzzle_id,
            time_taken_ms,
            record.streak,
            purged
        );
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 8, minute, 0).unwrap()
    }

    fn day(value: u32) -> DayKey {
        DayKey::try_from(value).unwrap()
    }

    /// 2x2 board spelling "cats" with every tile linked.
    fn session(progress: PlayerProgress) -> PuzzleSession {
        let today = day(20240102);
        let config = PuzzleConfig::for_day(today).with_size((2, 2));
        let overrides: BoardOverrides = [(today, "cats")].into_iter().collect();
        let frequencies = FrequencyTable::new(["e"]).unwrap();
        let dictionary = Trie::build(["cat", "cats", "at", "dog"]);
        let puzzle = Puzzle::generate(config, &dictionary, &frequencies, &overrides).unwrap();
        PuzzleSession::new(puzzle, today, progress, EngineConfig::default())
    }

    fn started(progress: PlayerProgress, sink: &mut RecordingSink) -> PuzzleSession {
        let mut session = session(progress);
        session.start(at(0), sink).unwrap();
        session
    }

    #[test]
    fn start_records_day_and_tops_up_hints() {
        let mut sink = RecordingSink::new();
        let mut session = session(PlayerProgress::default());
        assert_eq!(session.state(), SessionState::NotStarted);

        let outcome = session.start(at(0), &mut sink).unwrap();

        assert_eq!(outcome, StartOutcome::Started { streak_reset: false });
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.hints_remaining(), 3);
        assert_eq!(session.progress().account.played, [day(20240102)]);
        assert_eq!(sink.last(), Some(session.progress()));
    }

    #[test]
    fn starting_twice_resumes_without_saving() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);

        let outcome = session.start(at(5), &mut sink).unwrap();

        assert_eq!(outcome, StartOutcome::Resumed(SessionState::InProgress));
        assert_eq!(sink.saved.len(), 1);
    }

    #[test]
    fn missed_day_resets_streak_on_start() {
        let mut progress = PlayerProgress::default();
        progress.account.completed.push(day(20231231));
        progress.account.streak = 6;
        progress.account.max_streak = 6;
        let mut sink = RecordingSink::new();
        let mut session = session(progress);

        let outcome = session.start(at(0), &mut sink).unwrap();

        assert_eq!(outcome, StartOutcome::Started { streak_reset: true });
        assert_eq!(session.progress().account.streak, 0);
        assert_eq!(session.progress().account.max_streak, 6);
    }

    #[test]
    fn submit_before_start_is_refused() {
        let mut sink = RecordingSink::new();
        let mut session = session(PlayerProgress::default());

        assert_eq!(
            session.submit("cat", at(1), &mut sink),
            Err(PuzzleError::NotStarted)
        );
    }

    #[test]
    fn submissions_classify_words() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);

        assert_eq!(session.submit("dog", at(1), &mut sink), Ok(SubmitOutcome::WordRejected));
        assert_eq!(session.submit("ca", at(1), &mut sink), Ok(SubmitOutcome::WordRejected));
        assert_eq!(session.submit("cat", at(1), &mut sink), Ok(SubmitOutcome::WordAccepted));
        assert_eq!(session.submit("cat", at(2), &mut sink), Ok(SubmitOutcome::WordAlreadyFound));
        assert_eq!(sink.saved.len(), 2);
        assert_eq!(session.masked("cat"), "cat");
        assert_eq!(session.masked("cats"), "_ _ _ _");
    }

    #[test]
    fn finding_every_word_completes_and_extends_streak() {
        let mut progress = PlayerProgress::default();
        progress.account.completed.push(day(20240101));
        progress.account.streak = 2;
        progress.account.max_streak = 2;
        progress
            .boards
            .insert("stale".into(), BoardProgress::new(day(20240101)));
        let mut sink = RecordingSink::new();
        let mut session = started(progress, &mut sink);

        session.submit("cat", at(1), &mut sink).unwrap();
        session.submit("at", at(2), &mut sink).unwrap();
        let outcome = session.submit("cats", at(3), &mut sink).unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::GameCompleted(CompletionRecord {
                hints_remaining: 3,
                time_taken_ms: 180_000,
                streak: 3,
                max_streak: 3,
            })
        );
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.progress().board("stale").is_none());
        assert!(session.progress().account.has_completed(day(20240102)));

        // completed boards stay idempotent
        let saves = sink.saved.len();
        assert_eq!(session.submit("cats", at(4), &mut sink), Ok(SubmitOutcome::WordAlreadyFound));
        assert_eq!(sink.saved.len(), saves);
    }

    #[test]
    fn hints_reveal_letters_and_can_finish_a_word() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);

        let first = session.request_hint("at", at(1), &mut sink).unwrap();
        assert!(matches!(first, HintOutcome::HintGranted(_)));
        assert_eq!(session.hints_remaining(), 2);
        assert!(!session.is_found("at"));

        let second = session.request_hint("at", at(2), &mut sink).unwrap();
        assert!(matches!(second, HintOutcome::WordCompleted(_)));
        assert!(session.is_found("at"));
        assert_eq!(session.hints_remaining(), 1);

        assert_eq!(
            session.request_hint("at", at(3), &mut sink),
            Err(PuzzleError::WordAlreadyFound("at".into()))
        );
    }

    #[test]
    fn hints_run_out() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);

        for _ in 0..3 {
            session.request_hint("cats", at(1), &mut sink).unwrap();
        }
        assert_eq!(
            session.request_hint("cats", at(1), &mut sink),
            Err(PuzzleError::InsufficientHints)
        );

        assert_eq!(session.grant_hints(2, &mut sink), Ok(2));
        assert!(session.request_hint("cats", at(2), &mut sink).is_ok());
    }

    #[test]
    fn failed_save_keeps_transition_pending() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);
        let mut broken = RecordingSink::failing(2);

        assert!(matches!(
            session.submit("cat", at(1), &mut broken),
            Err(PuzzleError::PersistenceFailure { .. })
        ));
        assert!(session.is_found("cat"));
        assert!(session.is_save_pending());
        assert_eq!(
            session.submit("at", at(1), &mut sink),
            Err(PuzzleError::SavePending)
        );

        assert!(session.retry_save(&mut broken).is_err());
        assert_eq!(session.retry_save(&mut broken), Ok(()));
        assert!(broken.last().is_some_and(|saved| saved.board(session.seed_key()).unwrap().found.contains("cat")));
        assert_eq!(session.submit("at", at(2), &mut sink), Ok(SubmitOutcome::WordAccepted));
    }

    #[test]
    fn tapping_tiles_submits_words() {
        let mut sink = RecordingSink::new();
        let mut session = started(PlayerProgress::default(), &mut sink);

        for tile in [1, 2] {
            assert_eq!(
                session.activate_tile(tile, at(1), &mut sink),
                Ok(TileOutcome::Selection(SelectionEvent::Extended))
            );
        }
        assert_eq!(
            session.activate_tile(2, at(1), &mut sink),
            Ok(TileOutcome::Submitted {
                word: "at".into(),
                outcome: SubmitOutcome::WordAccepted
            })
        );
        assert!(session.selection().is_empty());
    }

    #[test]
    fn empty_dictionary_is_rejected() {
        let result = Puzzle::generate(
            PuzzleConfig::new(1),
            &Trie::build(Vec::<&str>::new()),
            &FrequencyTable::new(["a"]).unwrap(),
            &BoardOverrides::new(),
        );

        assert_eq!(result.err(), Some(PuzzleError::EmptyDictionary));
    }
}

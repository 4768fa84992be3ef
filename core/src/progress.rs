use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-wide state shared by every board: hints and the streak ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProgress {
    pub hint_budget: u32,
    pub played: Vec<DayKey>,
    pub completed: Vec<DayKey>,
    pub streak: u32,
    pub max_streak: u32,
}

impl AccountProgress {
    pub fn has_played(&self, day: DayKey) -> bool {
        self.played.contains(&day)
    }

    pub fn has_completed(&self, day: DayKey) -> bool {
        self.completed.contains(&day)
    }

    pub fn record_played(&mut self, day: DayKey) {
        if !self.has_played(day) {
            self.played.push(day);
        }
    }

    /// Resets the streak unless the day before `today` was completed.
    ///
    /// Returns whether the streak was reset.
    pub fn check_streak(&mut self, today: DayKey) -> bool {
        let continued = today
            .previous()
            .is_some_and(|yesterday| self.has_completed(yesterday));
        if continued {
            false
        } else {
            let was_running = self.streak > 0;
            self.streak = 0;
            was_running
        }
    }

    pub fn record_completed(&mut self, day: DayKey) {
        if self.has_completed(day) {
            return;
        }
        self.completed.push(day);
        self.streak += 1;
        self.max_streak = self.max_streak.max(self.streak);
    }

    /// Tops the hint budget up to the daily guaranteed amount.
    pub fn ensure_hint_floor(&mut self, floor: u32) {
        self.hint_budget = self.hint_budget.max(floor);
    }
}

/// State of one board: words found, letters revealed by hints, timings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardProgress {
    pub day: DayKey,
    pub found: BTreeSet<String>,
    pub hints: BTreeMap<String, BTreeSet<usize>>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BoardProgress {
    pub fn new(day: DayKey) -> Self {
        Self {
            day,
            found: BTreeSet::new(),
            hints: BTreeMap::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    pub fn revealed(&self, word: &str) -> Option<&BTreeSet<usize>> {
        self.hints.get(word)
    }

    /// Milliseconds between start and finish, when both are known.
    pub fn time_taken_ms(&self) -> Option<u64> {
        let elapsed = self.finished_at? - self.started_at?;
        Some(elapsed.num_milliseconds().max(0) as u64)
    }
}

/// Everything persisted for a player.
///
/// Board records are keyed by the puzzle's seed key and joined to the
/// account only through their day.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProgress {
    pub account: AccountProgress,
    pub boards: BTreeMap<String, BoardProgress>,
}

impl PlayerProgress {
    pub fn board(&self, seed_key: &str) -> Option<&BoardProgress> {
        self.boards.get(seed_key)
    }

    pub fn board_mut(&mut self, seed_key: &str) -> Option<&mut BoardProgress> {
        self.boards.get_mut(seed_key)
    }

    /// Drops board records from other days, returning how many went.
    pub fn purge_stale(&mut self, today: DayKey) -> usize {
        let before = self.boards.len();
        self.boards.retain(|_, board| board.day == today);
        before - self.boards.len()
    }
}

/// Storage collaborator receiving a full snapshot after every transition.
pub trait ProgressSink {
    type Error: fmt::Display;

    fn save(&mut self, progress: &PlayerProgress) -> core::result::Result<(), Self::Error>;
}

/// Keeps every saved snapshot in memory, optionally failing the next saves.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub saved: Vec<PlayerProgress>,
    pub fail_next: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(times: usize) -> Self {
        Self {
            saved: Vec::new(),
            fail_next: times,
        }
    }

    pub fn last(&self) -> Option<&PlayerProgress> {
        self.saved.last()
    }
}

impl ProgressSink for RecordingSink {
    type Error = &'static str;

    fn save(&mut self, progress: &PlayerProgress) -> core::result::Result<(), Self::Error> {
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err("storage unavailable");
        }
        self.saved.push(progress.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(value: u32) -> DayKey {
        DayKey::try_from(value).unwrap()
    }

    #[test]
    fn streak_continues_when_yesterday_completed() {
        let mut account = AccountProgress {
            completed: alloc::vec![day(20240102)],
            streak: 4,
            max_streak: 4,
            ..Default::default()
        };

        assert!(!account.check_streak(day(20240103)));
        assert_eq!(account.streak, 4);
    }

    #[test]
    fn streak_resets_after_a_gap() {
        // day before yesterday is not enough
        let mut account = AccountProgress {
            completed: alloc::vec![day(20240101)],
            streak: 2,
            max_streak: 5,
            ..Default::default()
        };

        assert!(account.check_streak(day(20240103)));
        assert_eq!(account.streak, 0);
        assert_eq!(account.max_streak, 5);
    }

    #[test]
    fn completing_grows_streak_once_per_day() {
        let mut account = AccountProgress::default();

        account.record_completed(day(20240101));
        account.record_completed(day(20240101));
        account.record_completed(day(20240102));

        assert_eq!(account.streak, 2);
        assert_eq!(account.max_streak, 2);
        assert_eq!(account.completed, [day(20240101), day(20240102)]);
    }

    #[test]
    fn hint_floor_only_raises_budget() {
        let mut account = AccountProgress {
            hint_budget: 1,
            ..Default::default()
        };
        account.ensure_hint_floor(3);
        assert_eq!(account.hint_budget, 3);

        account.hint_budget = 10;
        account.ensure_hint_floor(3);
        assert_eq!(account.hint_budget, 10);
    }

    #[test]
    fn purge_keeps_only_todays_boards() {
        let mut progress = PlayerProgress::default();
        progress
            .boards
            .insert("old".into(), BoardProgress::new(day(20240101)));
        progress
            .boards
            .insert("today-4x4".into(), BoardProgress::new(day(20240102)));
        progress
            .boards
            .insert("today-5x5".into(), BoardProgress::new(day(20240102)));
        progress.account.hint_budget = 7;

        assert_eq!(progress.purge_stale(day(20240102)), 1);
        assert!(progress.board("old").is_none());
        assert_eq!(progress.boards.len(), 2);
        assert_eq!(progress.account.hint_budget, 7);
    }

    #[test]
    fn time_taken_needs_both_timestamps() {
        let mut board = BoardProgress::new(day(20240101));
        assert_eq!(board.time_taken_ms(), None);

        board.started_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap());
        board.finished_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 1, 30).unwrap());
        assert_eq!(board.time_taken_ms(), Some(90_000));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut progress = PlayerProgress::default();
        let mut board = BoardProgress::new(day(20240101));
        board.found.insert("cat".into());
        board.hints.insert("cats".into(), [0, 2].into_iter().collect());
        progress.boards.insert("key".into(), board);
        progress.account.played.push(day(20240101));

        let json = serde_json::to_string(&progress).unwrap();
        assert!(json.contains("20240101"));
        assert_eq!(serde_json::from_str::<PlayerProgress>(&json).unwrap(), progress);
    }

    #[test]
    fn recording_sink_fails_on_request() {
        let mut sink = RecordingSink::failing(1);
        let progress = PlayerProgress::default();

        assert!(sink.save(&progress).is_err());
        assert!(sink.save(&progress).is_ok());
        assert_eq!(sink.saved.len(), 1);
    }
}

use std::fmt::Write;

use linkagram_core::{Board, CompletionRecord, PuzzleSession, SessionState};

/// Board letters as an uppercase grid, one row per line.
pub fn board(board: &Board) -> String {
    board
        .grid()
        .rows()
        .into_iter()
        .map(|row| {
            row.iter()
                .map(|letter| letter.to_uppercase().to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Word list grouped by length, unfound words masked.
pub fn word_list(session: &PuzzleSession) -> String {
    let mut out = String::new();
    for (length, words) in session.words().by_length() {
        let masked: Vec<String> = words.iter().map(|word| session.masked(word)).collect();
        let _ = writeln!(out, "{:>2}: {}", length, masked.join(", "));
    }
    out
}

pub fn status(session: &PuzzleSession) -> String {
    let account = &session.progress().account;
    let state = match session.state() {
        SessionState::NotStarted => "not started",
        SessionState::InProgress => "in progress",
        SessionState::Completed => "completed",
    };

    let mut out = String::new();
    let _ = writeln!(out, "Puzzle {} ({})", session.day(), state);
    let _ = writeln!(out, "{}", board(session.board()));
    let _ = writeln!(
        out,
        "Found {}/{}, {} hints left, streak {} (best {})",
        session.found_count(),
        session.words().len(),
        account.hint_budget,
        account.streak,
        account.max_streak
    );
    out.push_str(&word_list(session));
    out
}

pub fn completion(record: &CompletionRecord) -> String {
    format!(
        "Puzzle complete in {}s! Streak {} (best {}), {} hints left",
        record.time_taken_ms / 1000,
        record.streak,
        record.max_streak,
        record.hints_remaining
    )
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use linkagram_core::{
    DayKey, EngineConfig, HintOutcome, Puzzle, PuzzleConfig, PuzzleSession, StartOutcome,
    SubmitOutcome, Trie, solver,
};

use store::JsonFileStore;

mod render;
mod store;

#[derive(Parser, Debug)]
#[command(version, about = "Daily linked-letter word puzzle", long_about = None)]
struct Cli {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Dictionary, a JSON array of lowercase words
    #[arg(long, global = true, default_value = PuzzleConfig::DEFAULT_DICTIONARY)]
    dictionary: PathBuf,

    /// Letter frequencies, a JSON array of letters most common first
    #[arg(long, global = true, default_value = PuzzleConfig::DEFAULT_FREQUENCIES)]
    frequencies: PathBuf,

    /// Hand-picked boards, a JSON object of day key to letters
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = PuzzleConfig::DEFAULT_SIZE.0)]
    width: u8,

    #[arg(long, global = true, default_value_t = PuzzleConfig::DEFAULT_SIZE.1)]
    height: u8,

    /// Day key (YYYYMMDD) to play instead of today
    #[arg(long, global = true)]
    date: Option<DayKey>,

    /// Where player progress is stored
    #[arg(long, global = true, default_value = "progress.json")]
    progress: PathBuf,

    /// Hints guaranteed at the start of each day
    #[arg(long, global = true, default_value_t = EngineConfig::DEFAULT_DAILY_HINT_FLOOR)]
    daily_hints: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the board
    Board {
        /// Also list every hidden word and the tiles spelling it
        #[arg(long)]
        solution: bool,
    },
    /// Print the share text for the day
    Preview,
    /// Start (or resume) the day's puzzle
    Start,
    /// Submit a word
    Submit { word: String },
    /// Spend a hint on a word from the list
    Hint { word: String },
    /// Add hints to the budget
    GrantHints { count: u32 },
    /// Show board, found words and streak
    Status,
    /// Add a word to the dictionary file
    AddWord { word: String },
}

impl Cli {
    fn day(&self) -> DayKey {
        self.date
            .unwrap_or_else(|| DayKey::from_date(Local::now().date_naive()))
    }

    fn puzzle(&self) -> Result<Puzzle> {
        let words = store::load_dictionary(&self.dictionary)?;
        let frequencies = store::load_frequencies(&self.frequencies)?;
        let overrides = store::load_overrides(self.overrides.as_deref())?;

        let config = PuzzleConfig::for_day(self.day())
            .with_size((self.width, self.height))
            .with_sources(source_id(&self.dictionary), source_id(&self.frequencies));
        Puzzle::generate(config, &Trie::build(&words), &frequencies, &overrides)
            .context("could not generate puzzle")
    }

    fn session(&self, store: &JsonFileStore) -> Result<PuzzleSession> {
        let engine_config = EngineConfig {
            daily_hint_floor: self.daily_hints,
            ..Default::default()
        };
        Ok(PuzzleSession::new(
            self.puzzle()?,
            self.day(),
            store.load()?,
            engine_config,
        ))
    }
}

/// Boards are seeded by the source file name, not the full path.
fn source_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn start(session: &mut PuzzleSession, store: &mut JsonFileStore) -> Result<()> {
    match session.start(Utc::now(), store)? {
        StartOutcome::Started { streak_reset } => {
            if streak_reset {
                println!("Streak reset, a day was missed.");
            }
            println!("{}", session.words().preview_text());
        }
        StartOutcome::Resumed(_) => {}
        StartOutcome::Completed(record) => println!("{}", render::completion(&record)),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();
    log::debug!("{:?}", cli);

    let mut store = JsonFileStore::new(&cli.progress);
    log::debug!("Progress file {}", store.path().display());
    match &cli.command {
        Command::Board { solution } => {
            let puzzle = cli.puzzle()?;
            println!("{}", render::board(puzzle.board()));
            if *solution {
                for word in puzzle.words().solution() {
                    let path = solver::trace_word(puzzle.board(), word).unwrap_or_default();
                    println!("{word:<16} {path:?}");
                }
            }
        }
        Command::Preview => {
            println!("{}", cli.puzzle()?.words().preview_text());
        }
        Command::Start => {
            let mut session = cli.session(&store)?;
            start(&mut session, &mut store)?;
            print!("{}", render::status(&session));
        }
        Command::Submit { word } => {
            let mut session = cli.session(&store)?;
            start(&mut session, &mut store)?;
            let word = word.to_lowercase();
            match session.submit(&word, Utc::now(), &mut store)? {
                SubmitOutcome::WordRejected => println!("{word:?} is not on the list."),
                SubmitOutcome::WordAlreadyFound => println!("{word:?} was already found."),
                SubmitOutcome::WordAccepted => println!(
                    "Found {word:?}, {}/{} words.",
                    session.found_count(),
                    session.words().len()
                ),
                SubmitOutcome::GameCompleted(record) => {
                    println!("{}", render::completion(&record))
                }
            }
        }
        Command::Hint { word } => {
            let mut session = cli.session(&store)?;
            start(&mut session, &mut store)?;
            let word = word.to_lowercase();
            let outcome = session.request_hint(&word, Utc::now(), &mut store)?;
            println!(
                "{} ({} hints left)",
                session.masked(&word),
                outcome.reveal().hints_remaining
            );
            if let HintOutcome::GameCompleted(_, record) = outcome {
                println!("{}", render::completion(&record));
            }
        }
        Command::GrantHints { count } => {
            let mut session = cli.session(&store)?;
            let budget = session.grant_hints(*count, &mut store)?;
            println!("{budget} hints available.");
        }
        Command::Status => {
            print!("{}", render::status(&cli.session(&store)?));
        }
        Command::AddWord { word } => {
            if store::add_word(&cli.dictionary, word)? {
                println!("Added {word:?}.");
            } else {
                println!("{word:?} is already in the dictionary.");
            }
        }
    }
    Ok(())
}

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use linkagram_core::{BoardOverrides, FrequencyTable, PlayerProgress, ProgressSink};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

/// Player progress kept as one JSON document on disk.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a new player.
    pub fn load(&self) -> Result<PlayerProgress> {
        match File::open(&self.path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("could not parse progress {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::debug!("No progress at {}, starting fresh", self.path.display());
                Ok(PlayerProgress::default())
            }
            Err(err) => Err(err)
                .with_context(|| format!("could not open progress {}", self.path.display())),
        }
    }
}

impl ProgressSink for JsonFileStore {
    type Error = anyhow::Error;

    fn save(&mut self, progress: &PlayerProgress) -> Result<()> {
        write_json(&self.path, progress)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse {}", path.display()))
}

/// Replaces `path` in one step so readers never see a partial file.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    let mut writer = BufWriter::new(&temp_file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    drop(writer);

    temp_file
        .persist(path)
        .with_context(|| format!("could not write {}", path.display()))?;
    Ok(())
}

/// Dictionary file: a JSON array of lowercase words in any order.
pub fn load_dictionary(path: &Path) -> Result<Vec<String>> {
    let words: Vec<String> = read_json(path)?;
    log::debug!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Frequency file: a JSON array of single letters, most common first.
pub fn load_frequencies(path: &Path) -> Result<FrequencyTable> {
    read_json(path)
}

pub fn load_overrides(path: Option<&Path>) -> Result<BoardOverrides> {
    match path {
        Some(path) => read_json(path),
        None => Ok(BoardOverrides::new()),
    }
}

/// Inserts `word`, trimmed and lowercased, into a sorted dictionary file,
/// returning whether it was new.
pub fn add_word(path: &Path, word: &str) -> Result<bool> {
    let word = word.trim().to_lowercase();
    if word.is_empty() || !word.chars().all(char::is_lowercase) {
        bail!("{:?} is not a word", word);
    }
    let word = word.as_str();

    let mut words = if path.exists() {
        load_dictionary(path)?
    } else {
        Vec::new()
    };
    words.sort();
    words.dedup();

    match words.binary_search_by(|probe| probe.as_str().cmp(word)) {
        Ok(_) => Ok(false),
        Err(position) => {
            words.insert(position, word.to_string());
            write_json(path, &words)?;
            log::info!("Added {:?} to {}", word, path.display());
            Ok(true)
        }
    }
}

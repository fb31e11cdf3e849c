//! Scoreboard persisted as a small CSV file
//!
//! One record per line: `player,score,when`. Fields containing a comma or a
//! double quote are quoted, with inner quotes doubled.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ScoreResult, ScoreStoreError};

/// Number of entries the scoreboard screen lists
pub const DEFAULT_LISTING: usize = 50;

/// Timestamp layout of the `when` column
pub const WHEN_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A single scoreboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub player: String,
    pub score: u64,
    /// Local time the run ended, as `YYYY-MM-DD HH:MM`
    pub when: String,
}

impl ScoreRecord {
    /// Line breaks in text fields become spaces; one record is one line
    pub fn new(player: impl Into<String>, score: u64, when: impl Into<String>) -> Self {
        Self {
            player: single_line(player.into()),
            score,
            when: single_line(when.into()),
        }
    }

    /// Record stamped with the current local time
    pub fn now(player: impl Into<String>, score: u64) -> Self {
        let when = chrono::Local::now().format(WHEN_FORMAT).to_string();
        Self::new(player, score, when)
    }

    pub fn to_csv_line(&self) -> String {
        format!("{},{},{}", escape(&self.player), self.score, escape(&self.when))
    }

    /// Parse one stored line (`line` is 1-based, for error reporting)
    pub fn parse(text: &str, line: usize) -> ScoreResult<Self> {
        let malformed = |reason: String| ScoreStoreError::MalformedRecord { line, reason };

        let fields = split_csv(text).map_err(|r| malformed(r.to_string()))?;
        if fields.len() < 3 {
            return Err(malformed(format!("expected 3 fields, found {}", fields.len())));
        }
        let score = fields[1]
            .trim()
            .parse::<u64>()
            .map_err(|e| malformed(format!("bad score {:?}: {}", fields[1], e)))?;

        let mut fields = fields.into_iter();
        let player = fields.next().unwrap_or_default();
        let when = fields.nth(1).unwrap_or_default();
        Ok(Self { player, score, when })
    }
}

fn single_line(text: String) -> String {
    if text.contains(['\n', '\r']) {
        text.replace(['\n', '\r'], " ")
    } else {
        text
    }
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Split one line into unquoted fields
fn split_csv(line: &str) -> Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (in_quotes, c) {
            (true, '"') if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            (true, '"') => in_quotes = false,
            (false, '"') => in_quotes = true,
            (false, ',') => fields.push(std::mem::take(&mut current)),
            (_, c) => current.push(c),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field");
    }
    fields.push(current);
    Ok(fields)
}

/// Persistence capability for finished runs
pub trait ScoreStore {
    fn append(&mut self, record: &ScoreRecord) -> ScoreResult<()>;
    /// Best `n` records, highest score first. An absent store has none.
    fn top(&self, n: usize) -> ScoreResult<Vec<ScoreRecord>>;
    fn clear(&mut self) -> ScoreResult<()>;
}

/// CSV-file scoreboard
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    path: PathBuf,
}

impl ScoreBoard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Top records, or an empty list if the file cannot be read
    pub fn top_or_empty(&self, n: usize) -> Vec<ScoreRecord> {
        self.top(n).unwrap_or_else(|e| {
            log::warn!("Could not read {}: {}", self.path.display(), e);
            Vec::new()
        })
    }
}

impl ScoreStore for ScoreBoard {
    fn append(&mut self, record: &ScoreRecord) -> ScoreResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record.to_csv_line())?;
        log::info!("Recorded {} for {}", record.score, record.player);
        Ok(())
    }

    fn top(&self, n: usize) -> ScoreResult<Vec<ScoreRecord>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records: Vec<ScoreRecord> = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match ScoreRecord::parse(line, i + 1) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping record in {}: {}", self.path.display(), e);
                    None
                }
            })
            .collect();

        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(n);
        Ok(records)
    }

    fn clear(&mut self) -> ScoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                log::info!("Cleared scoreboard {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for hosts without a filesystem
#[derive(Debug, Clone, Default)]
pub struct MemoryScores {
    pub records: Vec<ScoreRecord>,
}

impl ScoreStore for MemoryScores {
    fn append(&mut self, record: &ScoreRecord) -> ScoreResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn top(&self, n: usize) -> ScoreResult<Vec<ScoreRecord>> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(n);
        Ok(records)
    }

    fn clear(&mut self) -> ScoreResult<()> {
        self.records.clear();
        Ok(())
    }
}

//! Error types for scoreboard and settings files.
//!
//! The simulation itself never fails; only the file-backed collaborators do.

use thiserror::Error;

/// Result type for scoreboard operations.
pub type ScoreResult<T> = Result<T, ScoreStoreError>;

/// Errors from the CSV scoreboard.
#[derive(Debug, Error)]
pub enum ScoreStoreError {
    /// Reading or writing the backing file failed.
    #[error("scoreboard I/O: {0}")]
    Io(#[from] std::io::Error),

    /// A stored line could not be parsed.
    #[error("malformed score record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// Errors from loading the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

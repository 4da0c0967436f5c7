use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors produced by the schedule cleaner.
///
/// Row-level and field-level problems in the input never surface here; they
/// are represented as excluded rows or absent values instead.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output artifact could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tabular input could not be decoded (bad framing or invalid UTF-8).
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed or produced.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the schedule crates.
pub type Result<T> = std::result::Result<T, ScheduleError>;

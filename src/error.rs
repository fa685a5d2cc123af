//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O and JSON errors, and provides semantic variants for
//! run-argument parsing, descriptor building, template matching and execution.
use thiserror::Error;

use crate::types::SlotCategory;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed run arguments at token {token:?}: {reason}")]
    Parse { token: String, reason: &'static str },

    #[error("Entry {entry:?} has no directory and `{key}` was not given")]
    MissingDirectory { key: &'static str, entry: String },

    #[error("No {category} slot accepts file type {file_type:?}")]
    TemplateMatchMiss {
        category: SlotCategory,
        file_type: String,
    },

    #[error("Program exited with {}: {command}", .code.map_or("a signal".to_string(), |c| format!("status {c}")))]
    ProgramFailed { command: String, code: Option<i32> },

    #[error("Unsupported file system {scheme} for {path}")]
    UnsupportedFileSystem { scheme: String, path: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },
}

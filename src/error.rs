// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown difficulty '{0}' (expected Easy, Medium or Hard)")]
    Difficulty(String),
    #[error("unknown solve difficulty '{0}' (expected Easy or Hard)")]
    SolveDifficulty(String),
    #[error("unknown status '{0}'")]
    Status(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate problem id {0} in snapshot")]
    DuplicateId(i64),
    #[error("problem {0} not found")]
    NotFound(i64),
}

//! Error types for the task store and its boundaries

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid task data in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("No task file to back up at {}", .0.display())]
    NothingToBackUp(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Rejections raised by shells before input reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Task content cannot be empty")]
    EmptyContent,

    #[error("Invalid due date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Unknown priority '{0}' (expected high, normal or low)")]
    InvalidPriority(String),

    #[error("Invalid month '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot determine the {0} directory for this platform")]
    NoPlatformDir(&'static str),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to create directory: {0}")]
    CreateDir(#[from] std::io::Error),
}

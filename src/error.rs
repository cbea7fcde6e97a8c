use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("archive is {size} bytes, limit is {limit} bytes")]
    SizeLimitExceeded { size: u64, limit: u64 },

    #[error("failed to read archive: {0}")]
    Decode(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a file: {0}")]
    NotAFile(String),

    // std::io::Error is stringified so it works with Serialize/Deserialize
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("background task failed: {0}")]
    Task(String),
}

impl From<std::io::Error> for TreeError {
    fn from(e: std::io::Error) -> Self {
        TreeError::Io(e.to_string())
    }
}

impl From<zip::result::ZipError> for TreeError {
    fn from(e: zip::result::ZipError) -> Self {
        TreeError::Decode(e.to_string())
    }
}

impl From<tokio::task::JoinError> for TreeError {
    fn from(e: tokio::task::JoinError) -> Self {
        TreeError::Task(e.to_string())
    }
}

pub type TreeResult<T> = Result<T, TreeError>;

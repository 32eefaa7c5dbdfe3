//! Error types produced by the ingest crate.
//!
//! Everything here is an input-source failure: the engine surfaces these to
//! the caller unchanged and never retries. Retry policy, if any, belongs to
//! whoever drives the intake.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`Io`](IngestError::Io) | Directory or file could not be read |
//! | [`NotADirectory`](IngestError::NotADirectory) | Input path is not a directory |
//! | [`InvalidUtf8`](IngestError::InvalidUtf8) | File content is not UTF-8 |
//! | [`FileTooLarge`](IngestError::FileTooLarge) | File exceeds `max_file_bytes` |
//! | [`EmptyId`](IngestError::EmptyId) | Record id is blank |
//! | [`DuplicateId`](IngestError::DuplicateId) | Two records share an id |
//! | [`InvalidConfig`](IngestError::InvalidConfig) | Rejected [`IngestConfig`](crate::IngestConfig) |
use thiserror::Error;

/// Errors raised while enumerating or reading input documents.
///
/// I/O failures are flattened to their message so the error stays
/// `Clone + PartialEq` like the rest of the pipeline errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("input path {0} is not a directory")]
    NotADirectory(String),

    #[error("file {0} is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("file {path} is {size} bytes; limit is {limit}")]
    FileTooLarge {
        path: String,
        size: usize,
        limit: usize,
    },

    #[error("document id must not be empty")]
    EmptyId,

    #[error("duplicate document id {0}")]
    DuplicateId(String),

    #[error("invalid ingest config: {0}")]
    InvalidConfig(String),
}

impl IngestError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        IngestError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}

//! Error types.
//!
//! Parsing itself never fails: malformed input is represented in the tree
//! and flagged with [`SyntaxError`]s. The crate-level [`Error`] covers the
//! file-handling failures the CLI can hit.

use rowan::TextRange;
use std::path::PathBuf;

/// A syntax diagnostic with location, attached to an otherwise total parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {range:?}")]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Failures outside the parser proper.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a template file")]
    NotATemplate { path: PathBuf },
}

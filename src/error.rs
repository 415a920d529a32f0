// Error taxonomy shared by every part of the library.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::Category;

/// Everything that can go wrong while collecting, shelving or querying books.
///
/// Per-item network failures are usually logged and skipped by the caller
/// rather than surfaced; file, argument and input errors end the session.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("No books in category {} ({})", .0.id(), .0.label())]
    EmptyCategory(Category),

    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response from {url} has no '{field}' field")]
    MissingField { field: &'static str, url: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {target} as JSON: {source}")]
    Encode {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read operator input: {0}")]
    Input(#[from] io::Error),

    #[error("operator input closed before an answer was given")]
    InputClosed,
}

pub type Result<T> = std::result::Result<T, LibraryError>;

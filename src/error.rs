//! Error type for the file and command-line layer.
//!
//! Document and processor operations never fail; they report refused
//! operations with `false`. Errors only arise once a disk or a command
//! argument is involved.

use crate::document_model::SearchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotesError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no filename specified")]
    NoFilename,

    #[error("element {index} out of range (document has {count} elements)")]
    ElementOutOfRange { index: usize, count: usize },

    #[error("operation rejected: {0}")]
    Rejected(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

pub type Result<T> = std::result::Result<T, NotesError>;

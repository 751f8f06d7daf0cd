//! mdnotes: block-structured markdown notes with inline comments,
//! bounded undo/redo, and a heuristic that keeps a block's markdown
//! formatting when its rendered text is edited.

pub mod config;
pub mod document_model;
pub mod error;
pub mod note_file;
pub mod processor;

pub use config::{RcConfig, RcLoader};
pub use document_model::{DocumentStats, MarkdownDocument, MarkdownElement};
pub use error::{NotesError, Result};
pub use note_file::NoteFile;
pub use processor::{ChangeAction, ChangeAnalysis, MarkdownPattern, MarkdownProcessor, PatternKind};

/// Document model subsystem - Block-structured markdown with undo/redo
///
/// This module contains the element and document types, the block splitter
/// used when loading markdown, the bounded snapshot history and text search.

pub mod blocks;
pub mod document;
pub mod element;
pub mod history;
pub mod search;

// Re-export main types for convenience
pub use blocks::split_into_blocks;
pub use document::{DocumentStats, MarkdownDocument};
pub use element::{MarkdownElement, encode_comment, extract_comments, strip_comments};
pub use history::{DEFAULT_MAX_HISTORY, History, Snapshot};
pub use search::{SearchError, SearchMatch, find_text};

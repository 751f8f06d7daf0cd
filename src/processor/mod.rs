/// Processor subsystem - Markdown pattern detection and format preservation
///
/// This module recognizes markdown constructs in a text fragment and decides
/// whether an edited fragment keeps its original formatting or adopts new one.

pub mod detect;
pub mod pattern;
pub mod smart_update;

// Re-export public interface
pub use detect::{detect_all_patterns, detect_inline_patterns, detect_markdown_patterns};
pub use pattern::{MarkdownPattern, PatternKind, rank_patterns};
pub use smart_update::{ChangeAction, ChangeAnalysis, MarkdownProcessor};

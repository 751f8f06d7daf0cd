use super::detect::{detect_all_patterns, detect_markdown_patterns};
use super::pattern::{MarkdownPattern, PatternKind, rank_patterns};
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// How an edit relates to the formatting of the text it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeAction {
    /// Keep the original formatting.
    Preserve,
    /// Switch to the formatting found in the edited text.
    Convert,
    /// Neither side carries formatting.
    Plain,
}

impl ChangeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeAction::Preserve => "preserve",
            ChangeAction::Convert => "convert",
            ChangeAction::Plain => "plain",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeAnalysis {
    pub has_original_format: bool,
    pub has_new_format: bool,
    pub original_kind: Option<PatternKind>,
    pub new_kind: Option<PatternKind>,
    pub format_changed: bool,
    pub content_changed: bool,
    pub action: ChangeAction,
}

/// Rule-based markdown detector and format-preservation heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownProcessor;

impl MarkdownProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Block-level patterns in `text`, line by line.
    pub fn detect_markdown_patterns(&self, text: &str) -> Vec<MarkdownPattern> {
        detect_markdown_patterns(text)
    }

    pub fn is_valid_markdown(&self, text: &str) -> bool {
        !detect_all_patterns(text).is_empty()
    }

    /// The most significant construct in `text`, block or inline.
    pub fn extract_main_pattern(&self, text: &str) -> Option<MarkdownPattern> {
        let patterns = detect_all_patterns(text);
        rank_patterns(&patterns).cloned()
    }

    /// Decide what markdown should be stored after the user edited the
    /// rendered text of `original_md` into `edited_text`.
    ///
    /// Markdown typed into the edit wins. Otherwise the original's main
    /// construct is reapplied to the edited text, and plain text passes
    /// through untouched.
    pub fn smart_update_markdown(&self, original_md: &str, edited_text: &str) -> String {
        if let Some(new_pattern) = self.extract_main_pattern(edited_text) {
            debug!(kind = %new_pattern.kind, "edited text carries its own markdown");
            return edited_text.to_string();
        }

        match self.extract_main_pattern(original_md) {
            Some(original_pattern) => {
                debug!(kind = %original_pattern.kind, "preserving original format");
                self.preserve_original_format(&original_pattern, edited_text)
            }
            None => {
                debug!("no formatting on either side, keeping plain text");
                edited_text.to_string()
            }
        }
    }

    /// Rebuild `new_text` with the delimiters of `original_pattern`.
    pub fn preserve_original_format(
        &self,
        original_pattern: &MarkdownPattern,
        new_text: &str,
    ) -> String {
        match original_pattern.kind {
            PatternKind::Header if !original_pattern.start_marker.is_empty() => {
                format!("{} {new_text}", original_pattern.start_marker)
            }
            PatternKind::Header => match original_pattern.end_marker.as_str() {
                "===" => underline(new_text, '='),
                "---" => underline(new_text, '-'),
                _ => new_text.to_string(),
            },
            PatternKind::Bold => format!("**{new_text}**"),
            PatternKind::Italic => format!("*{new_text}*"),
            PatternKind::InlineCode => format!("`{new_text}`"),
            PatternKind::Quote => format!("> {new_text}"),
            PatternKind::List | PatternKind::OrderedList => {
                format!("{} {new_text}", original_pattern.start_marker)
            }
            PatternKind::CodeBlock => {
                let language = original_pattern
                    .start_marker
                    .strip_prefix("```")
                    .unwrap_or_default();
                format!("```{language}\n{new_text}\n```")
            }
        }
    }

    /// Classify an edit. Diagnostic only; `smart_update_markdown` does not
    /// consult it.
    pub fn analyze_text_changes(&self, original_md: &str, edited_text: &str) -> ChangeAnalysis {
        let original = self.extract_main_pattern(original_md);
        let new = self.extract_main_pattern(edited_text);

        let (format_changed, content_changed, action) = match (&original, &new) {
            (Some(original), Some(new)) => {
                let format_changed = original.kind != new.kind;
                let action = if format_changed {
                    ChangeAction::Convert
                } else {
                    ChangeAction::Preserve
                };
                (format_changed, original.content != new.content, action)
            }
            (None, Some(_)) => (false, false, ChangeAction::Convert),
            (Some(_), None) => (false, false, ChangeAction::Preserve),
            (None, None) => (false, false, ChangeAction::Plain),
        };

        ChangeAnalysis {
            has_original_format: original.is_some(),
            has_new_format: new.is_some(),
            original_kind: original.map(|p| p.kind),
            new_kind: new.map(|p| p.kind),
            format_changed,
            content_changed,
            action,
        }
    }
}

// Setext underline as wide as the widest line of `text`.
fn underline(text: &str, ch: char) -> String {
    let width = text.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    format!("{text}\n{}", ch.to_string().repeat(width.max(3)))
}

use regex::Regex;
use std::sync::LazyLock;

/// Matches one inline comment marker and captures its text.
static COMMENT_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- COMMENT:(.*?) -->").expect("comment marker pattern is valid")
});

/// Encode a comment the way it is stored after a block's content.
///
/// Line breaks fold to spaces and `-->` is escaped, so the marker always
/// stays on one line and ends where the comment does.
pub fn encode_comment(comment: &str) -> String {
    let text = comment
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
        .replace("-->", "--&gt;");
    format!(" <!-- COMMENT:{text} -->")
}

/// Pull every comment marker out of `markdown`, in order of appearance.
pub fn extract_comments(markdown: &str) -> Vec<String> {
    COMMENT_MARKER
        .captures_iter(markdown)
        .map(|caps| caps[1].replace("--&gt;", "-->"))
        .collect()
}

/// Remove every comment marker from `markdown` and trim the result.
pub fn strip_comments(markdown: &str) -> String {
    COMMENT_MARKER.replace_all(markdown, "").trim().to_string()
}

/// One block of markdown. `markdown_code` is the raw source, comment
/// markers included; comments are always read back out of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownElement {
    markdown_code: String,
}

impl MarkdownElement {
    pub fn new(markdown_code: impl Into<String>) -> Self {
        Self {
            markdown_code: markdown_code.into(),
        }
    }

    /// Raw source including comment markers.
    pub fn markdown_code(&self) -> &str {
        &self.markdown_code
    }

    /// Markdown safe for rendering: comment markers removed, trimmed.
    pub fn get_clean_markdown(&self) -> String {
        strip_comments(&self.markdown_code)
    }

    /// Append a comment marker. Duplicates are kept.
    pub fn add_comment(&mut self, comment: &str) {
        self.markdown_code.push_str(&encode_comment(comment));
    }

    pub fn get_comments(&self) -> Vec<String> {
        extract_comments(&self.markdown_code)
    }

    pub fn comment_count(&self) -> usize {
        COMMENT_MARKER.find_iter(&self.markdown_code).count()
    }

    /// Replace the content while keeping the element's comments.
    ///
    /// If `new_markdown` already carries comment markers it is taken as the
    /// complete raw source, so its markers replace the old ones instead of
    /// being doubled up by re-appending.
    pub fn update_content(&mut self, new_markdown: &str) {
        if COMMENT_MARKER.is_match(new_markdown) {
            self.markdown_code = new_markdown.to_string();
            return;
        }

        let current_comments = self.get_comments();
        self.markdown_code = new_markdown.to_string();
        for comment in &current_comments {
            self.add_comment(comment);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.get_clean_markdown().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markdown_strips_markers() {
        let element = MarkdownElement::new("# Title <!-- COMMENT:check spelling -->");
        assert_eq!(element.get_clean_markdown(), "# Title");
        assert_eq!(element.get_comments(), vec!["check spelling"]);
    }

    #[test]
    fn test_clean_markdown_is_idempotent() {
        let mut element = MarkdownElement::new("  Some *text*  ");
        let first = element.get_clean_markdown();
        assert_eq!(first, element.get_clean_markdown());

        element.add_comment("note");
        assert_eq!(element.get_clean_markdown(), first);
    }

    #[test]
    fn test_add_comment_keeps_duplicates() {
        let mut element = MarkdownElement::new("Body");
        element.add_comment("same");
        element.add_comment("same");

        assert_eq!(
            element.markdown_code(),
            "Body <!-- COMMENT:same --> <!-- COMMENT:same -->"
        );
        assert_eq!(element.get_comments(), vec!["same", "same"]);
        assert_eq!(element.comment_count(), 2);
    }

    #[test]
    fn test_update_content_preserves_comments() {
        let mut element = MarkdownElement::new("Old");
        element.add_comment("a");
        element.add_comment("b");

        element.update_content("New body");

        assert_eq!(element.get_clean_markdown(), "New body");
        assert_eq!(element.get_comments(), vec!["a", "b"]);
    }

    #[test]
    fn test_update_content_with_markers_replaces_comments() {
        let mut element = MarkdownElement::new("Old <!-- COMMENT:a -->");

        element.update_content("Edited <!-- COMMENT:a --> <!-- COMMENT:c -->");

        assert_eq!(element.get_comments(), vec!["a", "c"]);
        assert_eq!(element.get_clean_markdown(), "Edited");
    }

    #[test]
    fn test_multiline_comment_is_folded() {
        let mut element = MarkdownElement::new("Body");
        element.add_comment("line one\nline two\r\nline three");

        assert_eq!(element.get_clean_markdown(), "Body");
        assert_eq!(element.get_comments(), vec!["line one line two line three"]);
    }

    #[test]
    fn test_comment_containing_terminator() {
        let mut element = MarkdownElement::new("Body");
        element.add_comment("a --> b");

        assert_eq!(element.get_clean_markdown(), "Body");
        assert_eq!(element.comment_count(), 1);
        assert_eq!(element.get_comments(), vec!["a --> b"]);

        element.update_content("New body");
        assert_eq!(element.get_comments(), vec!["a --> b"]);
        assert_eq!(element.get_clean_markdown(), "New body");
    }

    #[test]
    fn test_malformed_marker_is_literal_text() {
        let element = MarkdownElement::new("Text <!-- COMMENT:unterminated");
        assert!(element.get_comments().is_empty());
        assert_eq!(element.get_clean_markdown(), "Text <!-- COMMENT:unterminated");
    }

    #[test]
    fn test_is_empty() {
        assert!(MarkdownElement::new("").is_empty());
        assert!(MarkdownElement::new("   \n ").is_empty());
        assert!(MarkdownElement::new(" <!-- COMMENT:orphan -->").is_empty());
        assert!(!MarkdownElement::new("x").is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = MarkdownElement::new("Text");
        let mut copy = original.clone();
        copy.add_comment("only on copy");

        assert!(original.get_comments().is_empty());
        assert_eq!(copy.get_comments(), vec!["only on copy"]);
    }
}

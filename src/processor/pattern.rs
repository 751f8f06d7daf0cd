use std::fmt;

/// Kind of markdown construct a pattern was detected as.
///
/// Variants are declared in ranking order: when several constructs are
/// found in one text, the lowest-ranked kind is the main one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PatternKind {
    Header,
    CodeBlock,
    Quote,
    List,
    OrderedList,
    Bold,
    Italic,
    InlineCode,
}

impl PatternKind {
    pub const ALL: [PatternKind; 8] = [
        PatternKind::Header,
        PatternKind::CodeBlock,
        PatternKind::Quote,
        PatternKind::List,
        PatternKind::OrderedList,
        PatternKind::Bold,
        PatternKind::Italic,
        PatternKind::InlineCode,
    ];

    /// Position in the main-pattern ranking, 0 being the strongest.
    pub fn rank(self) -> usize {
        match self {
            PatternKind::Header => 0,
            PatternKind::CodeBlock => 1,
            PatternKind::Quote => 2,
            PatternKind::List => 3,
            PatternKind::OrderedList => 4,
            PatternKind::Bold => 5,
            PatternKind::Italic => 6,
            PatternKind::InlineCode => 7,
        }
    }

    pub fn is_inline(self) -> bool {
        matches!(
            self,
            PatternKind::Bold | PatternKind::Italic | PatternKind::InlineCode
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternKind::Header => "header",
            PatternKind::CodeBlock => "code_block",
            PatternKind::Quote => "quote",
            PatternKind::List => "list",
            PatternKind::OrderedList => "ordered_list",
            PatternKind::Bold => "bold",
            PatternKind::Italic => "italic",
            PatternKind::InlineCode => "inline_code",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected markdown construct with its delimiters.
///
/// `level` is the header level for headers and the nesting depth
/// (two spaces per level) for list items; other kinds use 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPattern {
    pub kind: PatternKind,
    pub level: usize,
    pub start_marker: String,
    pub end_marker: String,
    pub content: String,
}

impl MarkdownPattern {
    pub fn new(
        kind: PatternKind,
        level: usize,
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            level,
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            content: content.into(),
        }
    }

    /// True for setext headers, written as a line underlined by `===` or `---`.
    pub fn is_underline_header(&self) -> bool {
        self.kind == PatternKind::Header && self.start_marker.is_empty()
    }
}

/// Pick the main pattern: the first one of the best-ranked kind present.
pub fn rank_patterns(patterns: &[MarkdownPattern]) -> Option<&MarkdownPattern> {
    patterns
        .iter()
        .enumerate()
        .min_by_key(|(position, pattern)| (pattern.kind.rank(), *position))
        .map(|(_, pattern)| pattern)
}

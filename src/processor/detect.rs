use super::pattern::{MarkdownPattern, PatternKind};
use regex::{Captures, Regex};
use std::sync::LazyLock;

type Build = fn(&Captures) -> MarkdownPattern;

/// Single-line block rules, tried in order; the first match wins.
static LINE_RULES: LazyLock<Vec<(Regex, Build)>> = LazyLock::new(|| {
    let rules: [(&str, Build); 4] = [
        (r"^(#{1,6})\s+(.+)$", header),
        (r"^(\s*)([-*+])\s+(.+)$", unordered_item),
        (r"^(\s*)(\d+\.)\s+(.+)$", ordered_item),
        (r"^>\s*(.+)$", quote),
    ];
    rules
        .into_iter()
        .map(|(pattern, build)| (compile(pattern), build))
        .collect()
});

/// Inline rules, each contributing at most its first match.
static INLINE_RULES: LazyLock<Vec<(Regex, PatternKind, &'static str)>> = LazyLock::new(|| {
    vec![
        (compile(r"\*\*(.+?)\*\*"), PatternKind::Bold, "**"),
        (compile(r"\*(.+?)\*"), PatternKind::Italic, "*"),
        (compile(r"`(.+?)`"), PatternKind::InlineCode, "`"),
    ]
});

static H1_UNDERLINE: LazyLock<Regex> = LazyLock::new(|| compile(r"^={3,}$"));
static H2_UNDERLINE: LazyLock<Regex> = LazyLock::new(|| compile(r"^-{3,}$"));
static FENCE_LANGUAGE: LazyLock<Regex> = LazyLock::new(|| compile(r"^```(\w*)"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in markdown pattern is valid")
}

fn header(caps: &Captures) -> MarkdownPattern {
    let markers = &caps[1];
    MarkdownPattern::new(PatternKind::Header, markers.len(), markers, "", &caps[2])
}

fn unordered_item(caps: &Captures) -> MarkdownPattern {
    list_item(PatternKind::List, caps)
}

fn ordered_item(caps: &Captures) -> MarkdownPattern {
    list_item(PatternKind::OrderedList, caps)
}

fn list_item(kind: PatternKind, caps: &Captures) -> MarkdownPattern {
    let indent = &caps[1];
    MarkdownPattern::new(
        kind,
        indent.len() / 2,
        format!("{indent}{}", &caps[2]),
        "",
        &caps[3],
    )
}

fn quote(caps: &Captures) -> MarkdownPattern {
    MarkdownPattern::new(PatternKind::Quote, 1, ">", "", &caps[1])
}

/// Scan `text` line by line for block-level constructs.
///
/// A non-blank line followed by a `===` or `---` underline is a level 1 or
/// level 2 header and consumes both lines. A line opening a ``` fence
/// consumes everything up to the closing fence (or the end of input).
/// Inline emphasis and code spans are not reported here; see
/// [`detect_inline_patterns`].
pub fn detect_markdown_patterns(text: &str) -> Vec<MarkdownPattern> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut patterns = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.trim_start().starts_with("```") {
            let (pattern, consumed) = fenced_block(&lines[i..]);
            patterns.push(pattern);
            i += consumed;
            continue;
        }

        if let Some(next_line) = lines.get(i + 1)
            && !line.trim().is_empty()
        {
            let underline = next_line.trim();
            let level = if H1_UNDERLINE.is_match(underline) {
                Some((1, "==="))
            } else if H2_UNDERLINE.is_match(underline) {
                Some((2, "---"))
            } else {
                None
            };

            if let Some((level, marker)) = level {
                patterns.push(MarkdownPattern::new(
                    PatternKind::Header,
                    level,
                    "",
                    marker,
                    line.trim(),
                ));
                i += 2;
                continue;
            }
        }

        if let Some(pattern) = LINE_RULES
            .iter()
            .find_map(|(regex, build)| regex.captures(line).map(|caps| build(&caps)))
        {
            patterns.push(pattern);
        }

        i += 1;
    }

    patterns
}

fn fenced_block(lines: &[&str]) -> (MarkdownPattern, usize) {
    let opening = lines[0].trim();
    let language = FENCE_LANGUAGE
        .captures(opening)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    let closing = lines[1..]
        .iter()
        .position(|line| line.trim_start().starts_with("```"));
    let (body, consumed) = match closing {
        Some(offset) => (&lines[1..1 + offset], offset + 2),
        None => (&lines[1..], lines.len()),
    };

    let pattern = MarkdownPattern::new(
        PatternKind::CodeBlock,
        0,
        format!("```{language}"),
        "```",
        body.join("\n"),
    );
    (pattern, consumed)
}

/// Find bold, italic and inline code spans anywhere in `text`.
pub fn detect_inline_patterns(text: &str) -> Vec<MarkdownPattern> {
    INLINE_RULES
        .iter()
        .filter_map(|(regex, kind, delimiter)| {
            regex.captures(text).map(|caps| {
                MarkdownPattern::new(*kind, 0, *delimiter, *delimiter, &caps[1])
            })
        })
        .collect()
}

/// Block patterns followed by inline patterns.
pub fn detect_all_patterns(text: &str) -> Vec<MarkdownPattern> {
    let mut patterns = detect_markdown_patterns(text);
    patterns.extend(detect_inline_patterns(text));
    patterns
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(patterns: &[MarkdownPattern]) -> Vec<PatternKind> {
        patterns.iter().map(|p| p.kind).collect()
    }

    #[test]
    fn test_atx_headers() {
        let patterns = detect_markdown_patterns("### Section");
        assert_eq!(
            patterns,
            vec![MarkdownPattern::new(PatternKind::Header, 3, "###", "", "Section")]
        );
        assert!(detect_markdown_patterns("####### too deep").is_empty());
        assert!(detect_markdown_patterns("#nospace").is_empty());
    }

    #[test]
    fn test_underline_headers() {
        let patterns = detect_markdown_patterns("Title\n=====\nSub\n---");
        assert_eq!(
            patterns,
            vec![
                MarkdownPattern::new(PatternKind::Header, 1, "", "===", "Title"),
                MarkdownPattern::new(PatternKind::Header, 2, "", "---", "Sub"),
            ]
        );
        assert!(patterns[0].is_underline_header());
    }

    #[test]
    fn test_short_underline_is_not_a_header() {
        assert!(detect_markdown_patterns("Title\n==").is_empty());
    }

    #[test]
    fn test_list_items_with_nesting() {
        let patterns = detect_markdown_patterns("- top\n    * nested\n3. third");
        assert_eq!(
            patterns,
            vec![
                MarkdownPattern::new(PatternKind::List, 0, "-", "", "top"),
                MarkdownPattern::new(PatternKind::List, 2, "    *", "", "nested"),
                MarkdownPattern::new(PatternKind::OrderedList, 0, "3.", "", "third"),
            ]
        );
    }

    #[test]
    fn test_quote() {
        let patterns = detect_markdown_patterns(">   wise words");
        assert_eq!(
            patterns,
            vec![MarkdownPattern::new(PatternKind::Quote, 1, ">", "", "wise words")]
        );
    }

    #[test]
    fn test_first_rule_wins_per_line() {
        // "# - x" is a header, never a list item.
        assert_eq!(kinds(&detect_markdown_patterns("# - x")), vec![PatternKind::Header]);
    }

    #[test]
    fn test_fenced_code_block() {
        let patterns = detect_markdown_patterns("```python\nprint(1)\n\nprint(2)\n```\nafter");
        assert_eq!(
            patterns,
            vec![MarkdownPattern::new(
                PatternKind::CodeBlock,
                0,
                "```python",
                "```",
                "print(1)\n\nprint(2)"
            )]
        );
    }

    #[test]
    fn test_fence_contents_are_not_scanned() {
        let patterns = detect_markdown_patterns("```\n# not a header\n- nor a list\n```");
        assert_eq!(kinds(&patterns), vec![PatternKind::CodeBlock]);
    }

    #[test]
    fn test_unclosed_fence() {
        let patterns = detect_markdown_patterns("```\nstill code");
        assert_eq!(patterns[0].content, "still code");
        assert_eq!(patterns[0].start_marker, "```");
    }

    #[test]
    fn test_block_scan_ignores_inline() {
        assert!(detect_markdown_patterns("some **bold** text").is_empty());
    }

    #[test]
    fn test_inline_patterns() {
        let patterns = detect_inline_patterns("a **b** and `c`");
        assert_eq!(
            kinds(&patterns),
            vec![PatternKind::Bold, PatternKind::Italic, PatternKind::InlineCode]
        );
        assert_eq!(patterns[0].content, "b");
        assert_eq!(patterns[2].content, "c");
    }

    #[test]
    fn test_plain_text_has_no_patterns() {
        assert!(detect_all_patterns("just words, nothing else").is_empty());
    }
}

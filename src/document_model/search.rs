use super::document::MarkdownDocument;
use regex::Regex;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    pub element: usize,
    /// Byte offsets into the element's clean markdown.
    pub start: usize,
    pub end: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    NoPattern,
    InvalidPattern(String),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoPattern => write!(f, "No previous search pattern"),
            SearchError::InvalidPattern(msg) => write!(f, "Invalid pattern: {msg}"),
        }
    }
}

impl std::error::Error for SearchError {}

/// Literal text search over the rendered (comment-free) blocks.
pub fn find_text(
    document: &MarkdownDocument,
    term: &str,
    case_sensitive: bool,
) -> Result<Vec<SearchMatch>, SearchError> {
    if term.is_empty() {
        return Err(SearchError::NoPattern);
    }

    let escaped_pattern = regex::escape(term);
    let regex_str = if case_sensitive {
        escaped_pattern
    } else {
        format!("(?i){escaped_pattern}")
    };
    let regex = Regex::new(&regex_str).map_err(|e| SearchError::InvalidPattern(e.to_string()))?;

    let mut matches = Vec::new();
    for (index, text) in document.get_elements_for_rendering().iter().enumerate() {
        for mat in regex.find_iter(text) {
            matches.push(SearchMatch {
                element: index,
                start: mat.start(),
                end: mat.end(),
                text: mat.as_str().to_string(),
            });
        }
    }

    Ok(matches)
}

use super::blocks::split_into_blocks;
use super::element::MarkdownElement;
use super::history::{DEFAULT_MAX_HISTORY, History};
use std::fmt;
use tracing::{debug, trace};

/// Counts reported for a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentStats {
    pub total_elements: usize,
    pub content_elements: usize,
    pub empty_elements: usize,
    pub total_comments: usize,
    pub history_size: usize,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl fmt::Display for DocumentStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Elements: {}/{} | History: {} | Comments: {}",
            self.content_elements, self.total_elements, self.history_size, self.total_comments
        )?;
        if self.can_undo {
            write!(f, " | undo")?;
        }
        if self.can_redo {
            write!(f, " | redo")?;
        }
        Ok(())
    }
}

/// An ordered sequence of markdown blocks with undo/redo.
///
/// Every successful mutation records the resulting element sequence in
/// `history`; failed bounds checks leave both the elements and the history
/// untouched and report `false`.
#[derive(Debug, Clone)]
pub struct MarkdownDocument {
    elements: Vec<MarkdownElement>,
    history: History,
}

impl MarkdownDocument {
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_MAX_HISTORY)
    }

    /// An empty document whose history already holds the empty state.
    pub fn with_history_limit(max_history: usize) -> Self {
        let mut document = Self {
            elements: Vec::new(),
            history: History::with_limit(max_history),
        };
        document.save_state();
        document
    }

    pub fn from_markdown(content: &str) -> Self {
        let mut document = Self::new();
        document.load_from_markdown(content);
        document
    }

    pub fn set_history_limit(&mut self, max_history: usize) {
        self.history.set_max_undo_levels(max_history);
    }

    pub fn history_limit(&self) -> usize {
        self.history.max_undo_levels()
    }

    /// Push a copy of the current elements onto history and clear redo.
    pub fn save_state(&mut self) {
        self.history.push(self.elements.clone());
        trace!(history = self.history.len(), "state saved");
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(previous) => {
                self.elements = previous.clone();
                debug!(elements = self.elements.len(), "undo");
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(next) => {
                self.elements = next.clone();
                debug!(elements = self.elements.len(), "redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Replace the whole document and reset history to the loaded state.
    pub fn load_from_markdown(&mut self, content: &str) {
        self.history.clear();
        self.elements = split_into_blocks(content)
            .into_iter()
            .map(|block| MarkdownElement::new(block.trim()))
            .collect();

        debug!(elements = self.elements.len(), "document loaded");
        self.save_state();
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, index: usize) -> Option<&MarkdownElement> {
        self.elements.get(index)
    }

    pub fn elements(&self) -> &[MarkdownElement] {
        &self.elements
    }

    pub fn update_element(&mut self, index: usize, new_markdown: &str) -> bool {
        let Some(element) = self.elements.get_mut(index) else {
            return false;
        };
        element.update_content(new_markdown);
        self.save_state();
        true
    }

    /// Insert a new element. An index past the end appends.
    pub fn insert_element(&mut self, index: usize, markdown_code: &str) -> bool {
        let index = index.min(self.elements.len());
        self.elements.insert(index, MarkdownElement::new(markdown_code));
        self.save_state();
        true
    }

    /// Remove an element. The last remaining element is never removed.
    pub fn delete_element(&mut self, index: usize) -> bool {
        if index >= self.elements.len() || self.elements.len() <= 1 {
            return false;
        }
        self.elements.remove(index);
        self.save_state();
        true
    }

    /// Split an element at a character offset into its clean text.
    ///
    /// With no position, or one at or past the end, an empty element is
    /// inserted right after instead.
    pub fn split_element(&mut self, index: usize, split_position: Option<usize>) -> bool {
        let Some(element) = self.elements.get_mut(index) else {
            return false;
        };
        let content = element.get_clean_markdown();
        let char_count = content.chars().count();

        match split_position {
            Some(position) if position < char_count => {
                let byte_offset = content
                    .char_indices()
                    .nth(position)
                    .map_or(content.len(), |(offset, _)| offset);
                let (first, second) = content.split_at(byte_offset);

                element.update_content(first.trim());
                self.elements.insert(index + 1, MarkdownElement::new(second.trim()));
            }
            _ => {
                self.elements.insert(index + 1, MarkdownElement::default());
            }
        }

        self.save_state();
        true
    }

    /// Merge two adjacent elements into the lower index.
    ///
    /// Clean texts are joined with a newline; comments from both elements
    /// end up on the merged one.
    pub fn merge_elements(&mut self, index1: usize, index2: usize) -> bool {
        if index1 >= self.elements.len()
            || index2 >= self.elements.len()
            || index1.abs_diff(index2) != 1
        {
            return false;
        }

        let (low, high) = (index1.min(index2), index1.max(index2));
        let removed = self.elements.remove(high);
        let merged = format!(
            "{}\n{}",
            self.elements[low].get_clean_markdown(),
            removed.get_clean_markdown()
        );

        let target = &mut self.elements[low];
        target.update_content(merged.trim());
        for comment in removed.get_comments() {
            target.add_comment(&comment);
        }

        self.save_state();
        true
    }

    pub fn add_comment_to_element(&mut self, index: usize, comment: &str) -> bool {
        let Some(element) = self.elements.get_mut(index) else {
            return false;
        };
        element.add_comment(comment);
        self.save_state();
        true
    }

    /// The whole document as markdown, comments included.
    ///
    /// Empty elements contribute a blank entry rather than their raw code,
    /// so stray markers on an otherwise empty block are dropped.
    pub fn get_full_markdown(&self) -> String {
        self.elements
            .iter()
            .map(|element| {
                if element.is_empty() {
                    ""
                } else {
                    element.markdown_code()
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn get_elements_for_rendering(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(MarkdownElement::get_clean_markdown)
            .collect()
    }

    pub fn get_stats(&self) -> DocumentStats {
        let total_elements = self.elements.len();
        let content_elements = self.elements.iter().filter(|e| !e.is_empty()).count();

        DocumentStats {
            total_elements,
            content_elements,
            empty_elements: total_elements - content_elements,
            total_comments: self.elements.iter().map(MarkdownElement::comment_count).sum(),
            history_size: self.history.len(),
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
        }
    }
}

impl Default for MarkdownDocument {
    fn default() -> Self {
        Self::new()
    }
}

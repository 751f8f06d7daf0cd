use crate::document_model::MarkdownDocument;
use crate::error::{NotesError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

/// A markdown document bound to a file on disk.
#[derive(Debug, Clone, Default)]
pub struct NoteFile {
    pub filename: Option<PathBuf>,
    pub modified: bool,
    document: MarkdownDocument,
}

impl NoteFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(filename: impl Into<PathBuf>) -> Result<Self> {
        let filename = filename.into();
        let content = fs::read_to_string(&filename).map_err(|source| NotesError::Io {
            path: filename.clone(),
            source,
        })?;

        let document = MarkdownDocument::from_markdown(&content);
        info!(
            path = %filename.display(),
            elements = document.element_count(),
            "note opened"
        );

        Ok(Self {
            filename: Some(filename),
            modified: false,
            document,
        })
    }

    /// Open `filename`, or start an empty note bound to it if it does not
    /// exist yet.
    pub fn open_or_create(filename: impl Into<PathBuf>) -> Result<Self> {
        let filename = filename.into();
        match Self::open(&filename) {
            Err(NotesError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                let mut note = Self::new();
                note.document.load_from_markdown("");
                note.filename = Some(filename);
                Ok(note)
            }
            other => other,
        }
    }

    pub fn document(&self) -> &MarkdownDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut MarkdownDocument {
        &mut self.document
    }

    /// Run an operation on the document, marking the note modified when
    /// the operation reports success.
    pub fn edit<F>(&mut self, operation: F) -> bool
    where
        F: FnOnce(&mut MarkdownDocument) -> bool,
    {
        let changed = operation(&mut self.document);
        if changed {
            self.modified = true;
        }
        changed
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn save(&mut self) -> Result<usize> {
        match self.filename.clone() {
            Some(filename) => self.save_as(filename),
            None => Err(NotesError::NoFilename),
        }
    }

    pub fn save_as(&mut self, filename: impl AsRef<Path>) -> Result<usize> {
        let filename = filename.as_ref();
        let content = self.document.get_full_markdown();
        fs::write(filename, &content).map_err(|source| NotesError::Io {
            path: filename.to_path_buf(),
            source,
        })?;

        info!(path = %filename.display(), bytes = content.len(), "note saved");
        self.filename = Some(filename.to_path_buf());
        self.modified = false;
        Ok(content.len())
    }

    pub fn get_display_filename(&self) -> &str {
        self.filename
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("[No Name]")
    }
}

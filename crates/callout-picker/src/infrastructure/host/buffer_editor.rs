//! In-memory document editor used by the headless harness.
//!
//! Holds the document text plus a selection given as a byte range.  An empty
//! range is a plain cursor.  After [`EditorHandle::replace_selection`] the
//! cursor sits right after the inserted text, like in a real editor.

use std::ops::Range;
use std::sync::Mutex;

use thiserror::Error;

use crate::application::ports::EditorHandle;

/// Error type for selection changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("selection {start}..{end} is outside the document ({len} bytes)")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("selection boundary {0} is not on a character boundary")]
    NotCharBoundary(usize),
}

#[derive(Debug, Default)]
struct Document {
    text: String,
    selection: Range<usize>,
}

/// A single document with a cursor or selection.
#[derive(Debug, Default)]
pub struct BufferEditor {
    doc: Mutex<Document>,
}

impl BufferEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document holding `text` with the cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            doc: Mutex::new(Document {
                text,
                selection: end..end,
            }),
        }
    }

    /// Full document text.
    pub fn contents(&self) -> String {
        self.doc.lock().expect("lock poisoned").text.clone()
    }

    /// Current selection as a byte range.
    pub fn selection_range(&self) -> Range<usize> {
        self.doc.lock().expect("lock poisoned").selection.clone()
    }

    /// Selects `range` (byte offsets).
    ///
    /// # Errors
    ///
    /// Returns [`SelectionError`] if the range is reversed, past the end of
    /// the document, or splits a UTF-8 character.
    pub fn select(&self, range: Range<usize>) -> Result<(), SelectionError> {
        let mut doc = self.doc.lock().expect("lock poisoned");
        let len = doc.text.len();
        if range.start > range.end || range.end > len {
            return Err(SelectionError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for boundary in [range.start, range.end] {
            if !doc.text.is_char_boundary(boundary) {
                return Err(SelectionError::NotCharBoundary(boundary));
            }
        }
        doc.selection = range;
        Ok(())
    }

    /// Appends `text` as a new paragraph and selects it.
    pub fn append_and_select(&self, text: &str) {
        let mut doc = self.doc.lock().expect("lock poisoned");
        if !doc.text.is_empty() && !doc.text.ends_with('\n') {
            doc.text.push('\n');
        }
        let start = doc.text.len();
        doc.text.push_str(text);
        let end = doc.text.len();
        doc.selection = start..end;
    }
}

impl EditorHandle for BufferEditor {
    fn selection(&self) -> String {
        let doc = self.doc.lock().expect("lock poisoned");
        doc.text[doc.selection.clone()].to_string()
    }

    fn replace_selection(&self, text: &str) {
        let mut doc = self.doc.lock().expect("lock poisoned");
        let range = doc.selection.clone();
        doc.text.replace_range(range.clone(), text);
        let cursor = range.start + text.len();
        doc.selection = cursor..cursor;
    }
}

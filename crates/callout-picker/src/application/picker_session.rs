//! PickerSession: lifecycle of one picker overlay.
//!
//! # Session lifecycle
//!
//! ```text
//!   Open ──(commit)──►  Committed ──(choose)──►  Closed
//!     │                                            ▲
//!     └────────────────(cancel)────────────────────┘
//! ```
//!
//! - `Open`: accepting query input; every query change recomputes the
//!   suggestion list from the registry.
//! - `Committed`: a suggestion was chosen; the registry's `choose` runs.
//! - `Closed`: terminal.  The overlay is torn down and further input is
//!   rejected.  A new overlay means a new session.

use callout_core::CalloutType;
use thiserror::Error;
use tracing::debug;

use super::callout_registry::CalloutRegistry;
use super::ports::EditorHandle;

/// Current state of a picker session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Accepting query input.
    Open,
    /// A suggestion was chosen and is being inserted.
    Committed,
    /// Torn down; terminal.
    Closed,
}

/// Error type for picker operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickerError {
    #[error("picker session is closed")]
    Closed,
    #[error("no suggestion at index {index} ({available} available)")]
    NoSuchSuggestion { index: usize, available: usize },
}

/// One picker overlay, from open to close.
#[derive(Debug)]
pub struct PickerSession {
    state: PickerState,
    query: String,
    suggestions: Vec<CalloutType>,
}

impl PickerSession {
    /// Opens a session with an empty query.
    pub fn open(registry: &CalloutRegistry) -> Self {
        let suggestions = registry.suggest("");
        debug!(suggestions = suggestions.len(), "picker opened");
        Self {
            state: PickerState::Open,
            query: String::new(),
            suggestions,
        }
    }

    pub fn state(&self) -> PickerState {
        self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Suggestions for the current query.  Empty means "no results".
    pub fn suggestions(&self) -> &[CalloutType] {
        &self.suggestions
    }

    /// Replaces the query and recomputes the suggestions.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Closed`] unless the session is `Open`.
    pub fn update_query(
        &mut self,
        registry: &CalloutRegistry,
        query: &str,
    ) -> Result<&[CalloutType], PickerError> {
        if self.state != PickerState::Open {
            return Err(PickerError::Closed);
        }
        self.query = query.to_string();
        self.suggestions = registry.suggest(query);
        Ok(&self.suggestions)
    }

    /// Commits the suggestion at `index`, inserts it, and closes the session.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Closed`] unless the session is `Open`, and
    /// [`PickerError::NoSuchSuggestion`] for an out-of-range index (the
    /// session then stays `Open`).
    pub fn commit(
        &mut self,
        registry: &CalloutRegistry,
        index: usize,
        editor: &dyn EditorHandle,
    ) -> Result<CalloutType, PickerError> {
        if self.state != PickerState::Open {
            return Err(PickerError::Closed);
        }
        let chosen = self
            .suggestions
            .get(index)
            .cloned()
            .ok_or(PickerError::NoSuchSuggestion {
                index,
                available: self.suggestions.len(),
            })?;

        self.state = PickerState::Committed;
        registry.choose(&chosen, editor);
        self.close();
        Ok(chosen)
    }

    /// Dismisses the session without side effects.
    pub fn cancel(&mut self) {
        if self.state == PickerState::Open {
            debug!(query = %self.query, "picker dismissed");
        }
        self.close();
    }

    fn close(&mut self) {
        self.state = PickerState::Closed;
        self.suggestions.clear();
    }
}

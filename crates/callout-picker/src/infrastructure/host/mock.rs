//! Recording host doubles for tests.
//!
//! Each call is pushed into a `Mutex<Vec<...>>` so assertions can inspect
//! exactly what the picker asked the host to do, and in what order.  These
//! are public so integration tests in `tests/` can use them; unit tests
//! inside the crate use the `mockall` mocks generated for the port traits.
//!
//! ```ignore
//! let notifier = Arc::new(RecordingNotifier::default());
//! let editor = RecordingEditor::with_selection("text");
//! registry.choose(&CalloutType::new("tip"), &editor);
//! assert_eq!(*notifier.messages.lock().unwrap(), vec!["Selected tip"]);
//! ```

use std::sync::Mutex;

use crate::application::ports::{EditorHandle, Notifier};

/// Records every notification message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
    }
}

/// Editor with a fixed selection that records every insertion.
#[derive(Debug, Default)]
pub struct RecordingEditor {
    /// Text returned by `selection()`.
    pub selection: String,
    /// Every text passed to `replace_selection`.
    pub insertions: Mutex<Vec<String>>,
}

impl RecordingEditor {
    pub fn with_selection(selection: impl Into<String>) -> Self {
        Self {
            selection: selection.into(),
            ..Self::default()
        }
    }
}

impl EditorHandle for RecordingEditor {
    fn selection(&self) -> String {
        self.selection.clone()
    }

    fn replace_selection(&self, text: &str) {
        self.insertions
            .lock()
            .expect("lock poisoned")
            .push(text.to_string());
    }
}

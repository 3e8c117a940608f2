//! Host-facing traits.
//!
//! The host application implements these; the infrastructure layer provides
//! adapters for the headless harness and recording doubles for tests.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for plugin data access.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing plugin data at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The host refused or could not service the request.
    #[error("plugin data unavailable: {0}")]
    Unavailable(String),
}

/// Host persistence API for the extension's single data blob.
#[cfg_attr(test, mockall::automock)]
pub trait PluginDataStore: Send + Sync {
    /// Returns the stored blob, or `None` before the first write.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the stored blob.
    fn write(&self, blob: &str) -> Result<(), StorageError>;
}

/// Handle to the active document editor.
#[cfg_attr(test, mockall::automock)]
pub trait EditorHandle: Send + Sync {
    /// Returns the currently selected text, or `""` when nothing is selected.
    fn selection(&self) -> String;

    /// Replaces the selection with `text`, or inserts it at the cursor when
    /// the selection is empty.
    fn replace_selection(&self, text: &str);
}

/// Transient, non-blocking user notifications (toasts).
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// A command shown in the host's command palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Stable command id, e.g. `"insert-callout"`.
    pub id: String,
    /// Palette label.
    pub name: String,
}

/// An icon in the host's ribbon that opens the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RibbonSpec {
    pub icon: String,
    pub title: String,
}

/// Registration API for commands, ribbon icons, and the settings tab.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRegistrar: Send + Sync {
    fn register_command(&self, spec: CommandSpec);
    fn register_ribbon_icon(&self, spec: RibbonSpec);
    fn register_settings_tab(&self, heading: &str);
}

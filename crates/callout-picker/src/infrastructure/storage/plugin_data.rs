//! Plugin data adapters: where the enabled-flag blob actually lives.
//!
//! - [`FilePluginData`] keeps the blob in `<data_dir>/data.json`, the same
//!   place a desktop host keeps per-extension data.
//! - [`MemoryPluginData`] keeps it in memory, for tests and for hosts that
//!   hand the blob over themselves.  Setting `should_fail` makes every call
//!   fail so error paths can be exercised.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::application::ports::{PluginDataStore, StorageError};

/// File name of the blob inside the data directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Blob stored as a file on disk.
#[derive(Debug, Clone)]
pub struct FilePluginData {
    path: PathBuf,
}

impl FilePluginData {
    /// Stores the blob as `data.json` inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(DATA_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PluginDataStore for FilePluginData {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn write(&self, blob: &str) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, blob).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), bytes = blob.len(), "plugin data written");
        Ok(())
    }
}

/// Blob held in memory.
#[derive(Debug, Default)]
pub struct MemoryPluginData {
    blob: Mutex<Option<String>>,
    /// Records every blob passed to `write`, in order.
    pub writes: Mutex<Vec<String>>,
    /// When `true`, `read` and `write` return [`StorageError::Unavailable`].
    pub should_fail: bool,
}

impl MemoryPluginData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `blob` already stored, as if written by a previous run.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
            ..Self::default()
        }
    }

    /// A store whose every operation fails.
    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// The currently stored blob.
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().expect("lock poisoned").clone()
    }
}

impl PluginDataStore for MemoryPluginData {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable("simulated read failure".to_string()));
        }
        Ok(self.blob())
    }

    fn write(&self, blob: &str) -> Result<(), StorageError> {
        if self.should_fail {
            return Err(StorageError::Unavailable("simulated write failure".to_string()));
        }
        *self.blob.lock().expect("lock poisoned") = Some(blob.to_string());
        self.writes
            .lock()
            .expect("lock poisoned")
            .push(blob.to_string());
        Ok(())
    }
}

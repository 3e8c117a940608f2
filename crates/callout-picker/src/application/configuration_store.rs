//! Configuration Store: durable enabled flags per callout identifier.
//!
//! The host persists one opaque blob per installed extension (its "plugin
//! data").  This store encodes the [`Configuration`] as a flat JSON object
//! in that blob.
//!
//! # Failure model
//!
//! Neither operation can fail from the caller's point of view:
//!
//! - [`ConfigurationStore::load`] falls back to all-enabled defaults when the
//!   blob is absent, empty, unreadable, or not a JSON object.  Inside an
//!   object, every key that is not a boolean catalog flag is carried through
//!   to the next save untouched.
//! - [`ConfigurationStore::save`] logs write failures and returns.  The
//!   in-memory configuration stays the source of truth either way.

use std::collections::BTreeMap;
use std::sync::Arc;

use callout_core::{Catalog, Configuration};
use serde_json::Value;
use tracing::{debug, error, warn};

use super::ports::PluginDataStore;

/// Loads and saves the [`Configuration`] through a [`PluginDataStore`].
#[derive(Clone)]
pub struct ConfigurationStore {
    data: Arc<dyn PluginDataStore>,
}

impl ConfigurationStore {
    pub fn new(data: Arc<dyn PluginDataStore>) -> Self {
        Self { data }
    }

    /// Reads persisted flags and overlays them onto the defaults for `catalog`.
    pub fn load(&self, catalog: &Catalog) -> Configuration {
        let persisted = match self.data.read() {
            Ok(Some(blob)) if blob.trim().is_empty() => {
                debug!("plugin data is empty, using defaults");
                BTreeMap::new()
            }
            Ok(Some(blob)) => match serde_json::from_str::<Value>(&blob) {
                Ok(Value::Object(entries)) => entries.into_iter().collect(),
                Ok(Value::Null) => {
                    debug!("plugin data is null, using defaults");
                    BTreeMap::new()
                }
                Ok(other) => {
                    warn!(data = %other, "plugin data is not a JSON object, using defaults");
                    BTreeMap::new()
                }
                Err(e) => {
                    warn!(error = %e, "plugin data is malformed, using defaults");
                    BTreeMap::new()
                }
            },
            Ok(None) => {
                debug!("no plugin data yet, using defaults");
                BTreeMap::new()
            }
            Err(e) => {
                warn!(error = %e, "failed to read plugin data, using defaults");
                BTreeMap::new()
            }
        };
        Configuration::overlay(catalog, persisted)
    }

    /// Writes the full configuration, overwriting the previous blob.
    ///
    /// Failures are logged, never returned.
    pub fn save(&self, configuration: &Configuration) {
        let blob = match serde_json::to_string_pretty(configuration) {
            Ok(blob) => blob,
            Err(e) => {
                error!(error = %e, "failed to encode callout configuration");
                return;
            }
        };
        match self.data.write(&blob) {
            Ok(()) => debug!(entries = configuration.len(), "callout configuration saved"),
            Err(e) => error!(error = %e, "failed to persist callout configuration"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::application::ports::{MockPluginDataStore, StorageError};
    use callout_core::CalloutType;
    use mockall::predicate::function;
    use serde_json::json;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            CalloutType::new("note"),
            CalloutType::new("warning"),
            CalloutType::new("tip"),
        ])
        .unwrap()
    }

    fn store_reading(blob: Option<&'static str>) -> ConfigurationStore {
        let mut data = MockPluginDataStore::new();
        data.expect_read()
            .returning(move || Ok(blob.map(str::to_string)));
        ConfigurationStore::new(Arc::new(data))
    }

    #[test]
    fn test_load_without_persisted_data_enables_everything() {
        let cfg = store_reading(None).load(&catalog());

        assert_eq!(cfg, Configuration::defaults(&catalog()));
        assert!(cfg.iter().all(|(_, enabled)| enabled));
    }

    #[test]
    fn test_load_overlays_partial_persisted_data() {
        // Arrange
        let store = store_reading(Some(r#"{ "warning": false }"#));

        // Act
        let cfg = store.load(&catalog());

        // Assert
        assert_eq!(cfg.get("warning"), Some(false));
        assert_eq!(cfg.get("note"), Some(true));
        assert_eq!(cfg.get("tip"), Some(true));
    }

    #[test]
    fn test_load_keeps_unknown_keys() {
        let cfg = store_reading(Some(r#"{ "notes": false, "tip": false }"#)).load(&catalog());

        assert_eq!(cfg.get("notes"), Some(false));
        assert_eq!(cfg.get("tip"), Some(false));
    }

    #[test]
    fn test_load_malformed_json_falls_back_to_defaults() {
        let cfg = store_reading(Some("{ not json")).load(&catalog());
        assert_eq!(cfg, Configuration::defaults(&catalog()));
    }

    #[test]
    fn test_load_keeps_flags_beside_non_boolean_values() {
        // Arrange
        let store = store_reading(Some(r#"{ "tip": false, "theme": "dark", "warning": "yes" }"#));

        // Act
        let cfg = store.load(&catalog());

        // Assert
        assert_eq!(cfg.get("tip"), Some(false));
        assert_eq!(cfg.get("warning"), Some(true), "non-boolean catalog flag resets");
        assert_eq!(cfg.extra("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_load_non_object_json_falls_back_to_defaults() {
        for blob in ["[true, false]", "42", r#""tip""#] {
            let cfg = store_reading(Some(blob)).load(&catalog());
            assert_eq!(cfg, Configuration::defaults(&catalog()), "blob {blob}");
        }
    }

    #[test]
    fn test_load_then_save_writes_foreign_keys_back() {
        // Arrange
        let mut data = MockPluginDataStore::new();
        data.expect_read()
            .returning(|| Ok(Some(r#"{ "tip": false, "theme": "dark", "notes": false }"#.to_string())));
        data.expect_write()
            .with(function(|blob: &str| {
                let parsed: serde_json::Value = serde_json::from_str(blob).unwrap();
                parsed
                    == json!({
                        "note": false,
                        "notes": false,
                        "theme": "dark",
                        "tip": false,
                        "warning": false
                    })
            }))
            .times(1)
            .returning(|_| Ok(()));
        let store = ConfigurationStore::new(Arc::new(data));

        // Act
        let mut cfg = store.load(&catalog());
        cfg.set("warning", false);
        store.save(&cfg);

        // Assert: write expectation verified on drop
    }

    #[test]
    fn test_load_null_and_empty_blobs_use_defaults() {
        assert_eq!(
            store_reading(Some("null")).load(&catalog()),
            Configuration::defaults(&catalog())
        );
        assert_eq!(
            store_reading(Some("  \n")).load(&catalog()),
            Configuration::defaults(&catalog())
        );
    }

    #[test]
    fn test_load_read_error_falls_back_to_defaults() {
        let mut data = MockPluginDataStore::new();
        data.expect_read()
            .returning(|| Err(StorageError::Unavailable("vault locked".to_string())));
        let store = ConfigurationStore::new(Arc::new(data));

        assert_eq!(store.load(&catalog()), Configuration::defaults(&catalog()));
    }

    #[test]
    fn test_save_writes_every_entry_as_json() {
        // Arrange
        let mut cfg = Configuration::defaults(&catalog());
        cfg.set("note", false);
        let mut data = MockPluginDataStore::new();
        data.expect_write()
            .with(function(|blob: &str| {
                let parsed: serde_json::Value = serde_json::from_str(blob).unwrap();
                parsed == serde_json::json!({ "note": false, "tip": true, "warning": true })
            }))
            .times(1)
            .returning(|_| Ok(()));
        let store = ConfigurationStore::new(Arc::new(data));

        // Act / Assert (expectation verified on drop)
        store.save(&cfg);
    }

    #[test]
    fn test_save_swallows_write_errors() {
        let mut data = MockPluginDataStore::new();
        data.expect_write().times(1).returning(|_| {
            Err(StorageError::Io {
                path: PathBuf::from("/read-only/data.json"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            })
        });
        let store = ConfigurationStore::new(Arc::new(data));

        store.save(&Configuration::defaults(&catalog()));
    }
}

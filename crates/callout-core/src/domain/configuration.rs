//! Per-callout enabled flags.
//!
//! The configuration is a flat map from callout identifier to `bool`.  It is
//! serialised as a plain JSON object so the host can persist it as the
//! plugin's data blob:
//!
//! ```json
//! { "bug": true, "note": true, "warning": false }
//! ```
//!
//! After [`Configuration::overlay`] every identifier of the catalog has a
//! boolean entry.  Every other key is kept with its value as it was read, so
//! writing the configuration back never drops data written by another
//! version of the extension.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::catalog::Catalog;

/// `(legacy key, identifier)` pairs.  A persisted legacy flag seeds the
/// identifier's flag when the identifier itself was never stored.
const LEGACY_KEYS: &[(&str, &str)] = &[("notes", "note")];

/// Enabled flag per callout identifier, plus any foreign keys carried along.
///
/// Invariant: a key lives in at most one of `flags` and `extras`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, Value>"
)]
pub struct Configuration {
    flags: BTreeMap<String, bool>,
    extras: BTreeMap<String, Value>,
}

impl From<BTreeMap<String, Value>> for Configuration {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let mut cfg = Self::default();
        for (key, value) in raw {
            match value {
                Value::Bool(enabled) => {
                    cfg.flags.insert(key, enabled);
                }
                other => {
                    cfg.extras.insert(key, other);
                }
            }
        }
        cfg
    }
}

impl From<Configuration> for BTreeMap<String, Value> {
    fn from(cfg: Configuration) -> Self {
        let mut raw = cfg.extras;
        raw.extend(cfg.flags.into_iter().map(|(k, v)| (k, Value::Bool(v))));
        raw
    }
}

impl Configuration {
    /// Every catalog identifier enabled.
    pub fn defaults(catalog: &Catalog) -> Self {
        Self::overlay(catalog, BTreeMap::new())
    }

    /// Overlays the persisted JSON object onto the defaults for `catalog`.
    ///
    /// Boolean values win per key.  A catalog identifier stored with a
    /// non-boolean value is reset to enabled.  Catalog identifiers missing
    /// from `persisted` are seeded from their legacy key when one was stored,
    /// otherwise backfilled with `true`.  All other keys are preserved as is.
    pub fn overlay(catalog: &Catalog, persisted: BTreeMap<String, Value>) -> Self {
        let mut cfg = Self::from(persisted);

        for id in catalog.identifiers() {
            if let Some(value) = cfg.extras.remove(id) {
                warn!(identifier = id, value = %value, "non-boolean callout flag, resetting to enabled");
            }
        }

        for (legacy, id) in LEGACY_KEYS {
            if !catalog.contains(id) || cfg.flags.contains_key(*id) {
                continue;
            }
            if let Some(&enabled) = cfg.flags.get(*legacy) {
                debug!(legacy, identifier = id, enabled, "migrating legacy callout flag");
                cfg.flags.insert(id.to_string(), enabled);
            }
        }

        for id in catalog.identifiers() {
            cfg.flags.entry(id.to_string()).or_insert(true);
        }
        cfg
    }

    /// Returns whether `identifier` is offered in the picker.
    ///
    /// Identifiers without an entry count as enabled, matching the default.
    pub fn is_enabled(&self, identifier: &str) -> bool {
        self.flags.get(identifier).copied().unwrap_or(true)
    }

    /// Returns the stored flag for `identifier`, if any.
    pub fn get(&self, identifier: &str) -> Option<bool> {
        self.flags.get(identifier).copied()
    }

    /// Returns a preserved non-boolean value.
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }

    /// Sets the flag for `identifier`.
    pub fn set(&mut self, identifier: &str, enabled: bool) {
        self.extras.remove(identifier);
        self.flags.insert(identifier.to_string(), enabled);
    }

    /// Iterates `(identifier, enabled)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.flags.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of stored keys, flags and preserved values together.
    pub fn len(&self) -> usize {
        self.flags.len() + self.extras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty() && self.extras.is_empty()
    }
}

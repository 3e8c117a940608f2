//! The callout catalog: every callout type the picker can offer.
//!
//! # Identifiers
//!
//! An identifier is the lowercase label written between `[!` and `]` in the
//! document (`note`, `warning`, ...).  It doubles as the display label in the
//! picker and as the key of the persisted [`Configuration`].  Identifiers are
//! unique within a catalog and never change at runtime.
//!
//! # Built-in table
//!
//! [`Catalog::builtin`] returns the 27 types understood by the host editor,
//! in the order they appear in the settings panel.  Aliases (`summary` and
//! `tldr` for `abstract`, `hint` and `important` for `tip`, ...) are separate
//! entries so they can be toggled independently; they share the icon of the
//! family they belong to.
//!
//! [`Configuration`]: crate::domain::configuration::Configuration

use std::collections::HashSet;

use thiserror::Error;

/// Error type for catalog construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// An identifier appears more than once.
    #[error("duplicate callout identifier: {0}")]
    DuplicateIdentifier(String),

    /// An identifier is empty.
    #[error("callout identifier must not be empty")]
    EmptyIdentifier,

    /// An identifier contains uppercase characters.
    #[error("callout identifier must be lowercase: {0}")]
    NotLowercase(String),
}

/// One kind of insertable callout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalloutType {
    /// Unique lowercase label, e.g. `"warning"`.
    pub identifier: String,
    /// Host icon name.  Cosmetic only.
    pub icon: Option<String>,
}

impl CalloutType {
    /// Creates a callout type without an icon.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            icon: None,
        }
    }

    /// Attaches a host icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// `(identifier, icon)` pairs for the built-in catalog, in panel order.
const BUILTIN_CALLOUTS: &[(&str, &str)] = &[
    ("note", "pencil"),
    ("abstract", "clipboard-list"),
    ("summary", "clipboard-list"),
    ("tldr", "clipboard-list"),
    ("info", "info"),
    ("todo", "check-circle-2"),
    ("tip", "flame"),
    ("hint", "flame"),
    ("important", "flame"),
    ("success", "check"),
    ("check", "check"),
    ("done", "check"),
    ("question", "help-circle"),
    ("help", "help-circle"),
    ("faq", "help-circle"),
    ("warning", "alert-triangle"),
    ("caution", "alert-triangle"),
    ("attention", "alert-triangle"),
    ("failure", "x"),
    ("fail", "x"),
    ("missing", "x"),
    ("danger", "zap"),
    ("error", "zap"),
    ("bug", "bug"),
    ("example", "list"),
    ("quote", "quote"),
    ("cite", "quote"),
];

/// Immutable, ordered list of callout types with unique identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CalloutType>,
}

impl Catalog {
    /// Builds a catalog from `entries`, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if an identifier is empty, contains uppercase
    /// characters, or appears more than once.
    pub fn new(entries: Vec<CalloutType>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            let id = entry.identifier.as_str();
            if id.is_empty() {
                return Err(CatalogError::EmptyIdentifier);
            }
            if id.chars().any(char::is_uppercase) {
                return Err(CatalogError::NotLowercase(id.to_string()));
            }
            if !seen.insert(id) {
                return Err(CatalogError::DuplicateIdentifier(id.to_string()));
            }
        }
        tracing::debug!(entries = entries.len(), "callout catalog built");
        Ok(Self { entries })
    }

    /// Returns the catalog of callout types understood by the host editor.
    pub fn builtin() -> Self {
        Self {
            entries: BUILTIN_CALLOUTS
                .iter()
                .map(|(id, icon)| CalloutType::new(*id).with_icon(*icon))
                .collect(),
        }
    }

    /// Iterates entries in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, CalloutType> {
        self.entries.iter()
    }

    /// Iterates identifiers in catalog order.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|c| c.identifier.as_str())
    }

    /// Looks up an entry by identifier.
    pub fn get(&self, identifier: &str) -> Option<&CalloutType> {
        self.entries.iter().find(|c| c.identifier == identifier)
    }

    /// Returns `true` if `identifier` is part of this catalog.
    pub fn contains(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CalloutType;
    type IntoIter = std::slice::Iter<'a, CalloutType>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//! CalloutRegistry: catalog, live configuration, and the insertion action.
//!
//! The registry is the single owner of the [`Configuration`].  Reads go to
//! the in-memory copy; the only write path is [`CalloutRegistry::set_enabled`],
//! which updates the flag and persists the whole configuration before
//! returning.  Hosts that share the registry between threads wrap it in one
//! mutex (see `infrastructure::ui_bridge::PluginState`).

use std::sync::Arc;

use callout_core::{render_callout, suggest, CalloutType, Catalog, Configuration};
use thiserror::Error;
use tracing::{debug, info};

use super::configuration_store::ConfigurationStore;
use super::ports::{EditorHandle, Notifier};

/// Error type for registry mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown callout type: {0}")]
    UnknownCallout(String),
}

/// Owns the catalog and its enabled flags.
pub struct CalloutRegistry {
    catalog: Catalog,
    configuration: Configuration,
    store: ConfigurationStore,
    notifier: Arc<dyn Notifier>,
}

impl CalloutRegistry {
    /// Loads the persisted configuration for `catalog` and builds the registry.
    pub fn load(catalog: Catalog, store: ConfigurationStore, notifier: Arc<dyn Notifier>) -> Self {
        let configuration = store.load(&catalog);
        let disabled = configuration
            .iter()
            .filter(|(id, enabled)| !enabled && catalog.contains(id))
            .count();
        info!(callouts = catalog.len(), disabled, "callout registry loaded");
        Self {
            catalog,
            configuration,
            store,
            notifier,
        }
    }

    /// Enabled callouts whose identifier contains `query`, in catalog order.
    pub fn suggest(&self, query: &str) -> Vec<CalloutType> {
        suggest(&self.catalog, &self.configuration, query)
    }

    /// Sets the enabled flag of `identifier` and persists the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownCallout`] if `identifier` is not in the
    /// catalog; nothing is changed or written in that case.
    pub fn set_enabled(&mut self, identifier: &str, enabled: bool) -> Result<(), RegistryError> {
        if !self.catalog.contains(identifier) {
            return Err(RegistryError::UnknownCallout(identifier.to_string()));
        }
        self.configuration.set(identifier, enabled);
        debug!(identifier, enabled, "callout visibility changed");
        self.store.save(&self.configuration);
        Ok(())
    }

    /// Acknowledges the choice and inserts the callout into `editor`.
    ///
    /// The current selection, if any, becomes the callout body.
    pub fn choose(&self, callout: &CalloutType, editor: &dyn EditorHandle) {
        let selection = editor.selection();
        let markup = render_callout(&callout.identifier, &selection);
        self.notifier
            .notify(&format!("Selected {}", callout.identifier));
        editor.replace_selection(&markup);
        info!(
            identifier = %callout.identifier,
            wrapped_bytes = selection.len(),
            "callout inserted"
        );
    }

    pub fn is_enabled(&self, identifier: &str) -> bool {
        self.configuration.is_enabled(identifier)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockEditorHandle, MockNotifier, MockPluginDataStore};
    use mockall::predicate::eq;

    fn war_catalog() -> Catalog {
        Catalog::new(vec![
            CalloutType::new("note"),
            CalloutType::new("warning"),
            CalloutType::new("warfare-demo"),
        ])
        .unwrap()
    }

    /// Registry over an empty plugin data blob that accepts `writes` saves.
    fn make_registry(catalog: Catalog, writes: usize) -> CalloutRegistry {
        let mut data = MockPluginDataStore::new();
        data.expect_read().returning(|| Ok(None));
        data.expect_write().times(writes).returning(|_| Ok(()));
        let store = ConfigurationStore::new(Arc::new(data));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().return_const(());
        CalloutRegistry::load(catalog, store, Arc::new(notifier))
    }

    fn ids(found: &[CalloutType]) -> Vec<&str> {
        found.iter().map(|c| c.identifier.as_str()).collect()
    }

    #[test]
    fn test_load_enables_every_callout_on_first_run() {
        let registry = make_registry(Catalog::builtin(), 0);
        for id in registry.catalog().identifiers() {
            assert!(registry.is_enabled(id));
        }
    }

    #[test]
    fn test_suggest_with_all_enabled() {
        let registry = make_registry(war_catalog(), 0);
        assert_eq!(ids(&registry.suggest("war")), vec!["warning", "warfare-demo"]);
    }

    #[test]
    fn test_set_enabled_false_hides_suggestion_and_persists() {
        // Arrange
        let mut registry = make_registry(war_catalog(), 1);

        // Act
        registry.set_enabled("warning", false).unwrap();

        // Assert
        assert_eq!(ids(&registry.suggest("war")), vec!["warfare-demo"]);
        assert_eq!(registry.configuration().get("warning"), Some(false));
    }

    #[test]
    fn test_set_enabled_unknown_identifier_is_rejected_without_write() {
        let mut registry = make_registry(war_catalog(), 0);

        let result = registry.set_enabled("nope", false);

        assert_eq!(result, Err(RegistryError::UnknownCallout("nope".to_string())));
        assert_eq!(registry.configuration().get("nope"), None);
    }

    #[test]
    fn test_choose_notifies_once_and_inserts_once() {
        // Arrange
        let mut data = MockPluginDataStore::new();
        data.expect_read().returning(|| Ok(None));
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .with(eq("Selected tip"))
            .times(1)
            .return_const(());
        let registry = CalloutRegistry::load(
            Catalog::builtin(),
            ConfigurationStore::new(Arc::new(data)),
            Arc::new(notifier),
        );

        let mut editor = MockEditorHandle::new();
        editor.expect_selection().times(1).returning(String::new);
        editor
            .expect_replace_selection()
            .with(eq("> [!tip]\n> "))
            .times(1)
            .return_const(());

        // Act
        registry.choose(&CalloutType::new("tip"), &editor);
    }

    #[test]
    fn test_choose_wraps_current_selection() {
        let registry = make_registry(Catalog::builtin(), 0);
        let mut editor = MockEditorHandle::new();
        editor
            .expect_selection()
            .returning(|| "Mind the gap.".to_string());
        editor
            .expect_replace_selection()
            .with(eq("> [!warning]\n> Mind the gap.\n"))
            .times(1)
            .return_const(());

        registry.choose(&CalloutType::new("warning"), &editor);
    }
}

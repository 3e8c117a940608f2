//! Host bridge: exposes application-layer operations to the host UI.
//!
//! The host's picker overlay and settings tab call these async commands and
//! render what they return.  The Presentation side is the only consumer of
//! this module; it must NOT be imported by the Application or Domain layers.
//!
//! # Data Transfer Objects (DTOs)
//!
//! Commands return plain serialisable structs (`CalloutDto`, `ToggleDto`,
//! `SettingsDto`) rather than application types, so the host can hand them to
//! its UI layer as JSON.
//!
//! # `CommandResult<T>` wrapper
//!
//! Every command returns `CommandResult<T>` rather than `Result<T, E>`, so
//! every response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//!
//! # Locking
//!
//! [`PluginState`] keeps the registry and the open picker session behind
//! async mutexes.  Commands that need both lock the picker first, then the
//! registry.  A toggle's mutate-then-persist sequence runs entirely under the
//! registry lock, so no command observes a half-applied change.

use std::sync::Arc;

use callout_core::{CalloutType, Catalog};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use crate::application::{
    callout_registry::CalloutRegistry,
    configuration_store::ConfigurationStore,
    picker_session::PickerSession,
    ports::{CommandRegistrar, CommandSpec, EditorHandle, Notifier, PluginDataStore, RibbonSpec},
    settings_panel::{apply_toggle, toggles, ToggleSetting, SETTINGS_HEADING},
};
use crate::infrastructure::storage::config::CommandsConfig;

// ── Shared plugin state ───────────────────────────────────────────────────────

/// State of one running plugin instance.
pub struct PluginState {
    /// Catalog plus the live enabled flags.
    pub registry: Mutex<CalloutRegistry>,
    /// The picker overlay currently shown, if any.
    pub picker: Mutex<Option<PickerSession>>,
    editor: Arc<dyn EditorHandle>,
}

/// Host services handed to the plugin at load time.
pub struct HostServices {
    pub data: Arc<dyn PluginDataStore>,
    pub notifier: Arc<dyn Notifier>,
    pub editor: Arc<dyn EditorHandle>,
}

impl PluginState {
    /// Loads the configuration and registers the picker's entry points.
    pub fn on_load(
        catalog: Catalog,
        host: HostServices,
        registrar: &dyn CommandRegistrar,
        commands: &CommandsConfig,
    ) -> Arc<Self> {
        info!("Loading Callout Picker");
        let registry =
            CalloutRegistry::load(catalog, ConfigurationStore::new(host.data), host.notifier);

        registrar.register_command(CommandSpec {
            id: commands.command_id.clone(),
            name: commands.command_name.clone(),
        });
        registrar.register_ribbon_icon(RibbonSpec {
            icon: commands.ribbon_icon.clone(),
            title: commands.ribbon_title.clone(),
        });
        registrar.register_settings_tab(SETTINGS_HEADING);

        Arc::new(Self {
            registry: Mutex::new(registry),
            picker: Mutex::new(None),
            editor: host.editor,
        })
    }

    /// Tears down any open picker.
    pub async fn on_unload(&self) {
        if let Some(mut session) = self.picker.lock().await.take() {
            session.cancel();
        }
        info!("Unloading Callout Picker");
    }
}

// ── Data Transfer Objects (Presentation layer) ────────────────────────────────

/// One row of the picker list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalloutDto {
    pub identifier: String,
    pub icon: Option<String>,
}

impl From<&CalloutType> for CalloutDto {
    fn from(c: &CalloutType) -> Self {
        Self {
            identifier: c.identifier.clone(),
            icon: c.icon.clone(),
        }
    }
}

/// One toggle row of the settings tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDto {
    pub identifier: String,
    pub label: String,
    pub icon: Option<String>,
    pub enabled: bool,
}

impl From<ToggleSetting> for ToggleDto {
    fn from(t: ToggleSetting) -> Self {
        Self {
            identifier: t.identifier,
            label: t.label,
            icon: t.icon,
            enabled: t.enabled,
        }
    }
}

/// The whole settings tab.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsDto {
    pub heading: String,
    pub toggles: Vec<ToggleDto>,
}

/// Unified response wrapper used by bridge commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

fn to_dtos(callouts: &[CalloutType]) -> Vec<CalloutDto> {
    callouts.iter().map(CalloutDto::from).collect()
}

// ── Bridge commands ───────────────────────────────────────────────────────────

/// Opens a new picker session and returns the unfiltered suggestions.
///
/// A session that is still open is dismissed first.
pub async fn open_picker(state: Arc<PluginState>) -> CommandResult<Vec<CalloutDto>> {
    let mut picker = state.picker.lock().await;
    if let Some(mut previous) = picker.take() {
        previous.cancel();
    }
    let registry = state.registry.lock().await;
    let session = PickerSession::open(&registry);
    let dtos = to_dtos(session.suggestions());
    *picker = Some(session);
    CommandResult::ok(dtos)
}

/// Sets the picker query and returns the matching suggestions.
///
/// An empty list is a successful "no results" response.
pub async fn update_query(state: Arc<PluginState>, query: String) -> CommandResult<Vec<CalloutDto>> {
    let mut picker = state.picker.lock().await;
    let Some(session) = picker.as_mut() else {
        return CommandResult::err("picker is not open");
    };
    let registry = state.registry.lock().await;
    match session.update_query(&registry, &query) {
        Ok(found) => CommandResult::ok(to_dtos(found)),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Inserts the suggestion at `index` and closes the picker.
pub async fn choose_suggestion(state: Arc<PluginState>, index: usize) -> CommandResult<CalloutDto> {
    let mut picker = state.picker.lock().await;
    let result = {
        let Some(session) = picker.as_mut() else {
            return CommandResult::err("picker is not open");
        };
        let registry = state.registry.lock().await;
        session.commit(&registry, index, state.editor.as_ref())
    };
    match result {
        Ok(chosen) => {
            *picker = None;
            CommandResult::ok(CalloutDto::from(&chosen))
        }
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Closes the picker without inserting anything.
pub async fn dismiss_picker(state: Arc<PluginState>) -> CommandResult<()> {
    if let Some(mut session) = state.picker.lock().await.take() {
        session.cancel();
    }
    CommandResult::ok(())
}

/// Returns the settings tab: heading plus one toggle per callout type.
pub async fn get_settings(state: Arc<PluginState>) -> CommandResult<SettingsDto> {
    let registry = state.registry.lock().await;
    CommandResult::ok(SettingsDto {
        heading: SETTINGS_HEADING.to_string(),
        toggles: toggles(&registry).into_iter().map(ToggleDto::from).collect(),
    })
}

/// Handler behind every settings toggle: updates and persists one flag.
pub async fn set_callout_enabled(
    state: Arc<PluginState>,
    identifier: String,
    enabled: bool,
) -> CommandResult<()> {
    let mut registry = state.registry.lock().await;
    match apply_toggle(&mut registry, &identifier, enabled) {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::host::log::LogCommandRegistrar;
    use crate::infrastructure::host::mock::{RecordingEditor, RecordingNotifier};
    use crate::infrastructure::storage::plugin_data::MemoryPluginData;

    struct Fixture {
        state: Arc<PluginState>,
        data: Arc<MemoryPluginData>,
        notifier: Arc<RecordingNotifier>,
        editor: Arc<RecordingEditor>,
        registrar: LogCommandRegistrar,
    }

    /// Creates an isolated plugin instance backed by in-memory plugin data.
    fn make_fixture(data: MemoryPluginData) -> Fixture {
        let data = Arc::new(data);
        let notifier = Arc::new(RecordingNotifier::default());
        let editor = Arc::new(RecordingEditor::default());
        let registrar = LogCommandRegistrar::new();
        let state = PluginState::on_load(
            Catalog::builtin(),
            HostServices {
                data: data.clone(),
                notifier: notifier.clone(),
                editor: editor.clone(),
            },
            &registrar,
            &CommandsConfig::default(),
        );
        Fixture {
            state,
            data,
            notifier,
            editor,
            registrar,
        }
    }

    #[tokio::test]
    async fn test_on_load_registers_command_ribbon_and_settings_tab() {
        let fx = make_fixture(MemoryPluginData::new());

        let commands = fx.registrar.commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].id, "insert-callout");
        assert_eq!(fx.registrar.ribbon_icons()[0].icon, "dice");
        assert_eq!(fx.registrar.settings_tabs(), vec![SETTINGS_HEADING]);
    }

    #[tokio::test]
    async fn test_open_picker_lists_full_catalog() {
        let fx = make_fixture(MemoryPluginData::new());

        let result = open_picker(fx.state).await;

        assert!(result.success);
        assert_eq!(result.data.unwrap().len(), 27);
    }

    #[tokio::test]
    async fn test_update_query_requires_open_picker() {
        let fx = make_fixture(MemoryPluginData::new());

        let result = update_query(fx.state, "tip".to_string()).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("picker is not open"));
    }

    #[tokio::test]
    async fn test_query_then_choose_inserts_and_closes() {
        // Arrange
        let fx = make_fixture(MemoryPluginData::new());
        open_picker(fx.state.clone()).await;
        let found = update_query(fx.state.clone(), "TIP".to_string()).await;
        assert_eq!(found.data.unwrap()[0].identifier, "tip");

        // Act
        let chosen = choose_suggestion(fx.state.clone(), 0).await;

        // Assert
        assert!(chosen.success, "error: {:?}", chosen.error);
        assert_eq!(*fx.notifier.messages.lock().unwrap(), vec!["Selected tip"]);
        assert_eq!(*fx.editor.insertions.lock().unwrap(), vec!["> [!tip]\n> "]);
        assert!(fx.state.picker.lock().await.is_none());
    }

    #[tokio::test]
    async fn test_choose_out_of_range_keeps_picker_open() {
        let fx = make_fixture(MemoryPluginData::new());
        open_picker(fx.state.clone()).await;
        update_query(fx.state.clone(), "bug".to_string()).await;

        let result = choose_suggestion(fx.state.clone(), 5).await;

        assert!(!result.success);
        assert!(fx.state.picker.lock().await.is_some());
        assert!(fx.editor.insertions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dismiss_picker_has_no_side_effects() {
        let fx = make_fixture(MemoryPluginData::new());
        open_picker(fx.state.clone()).await;

        let result = dismiss_picker(fx.state.clone()).await;

        assert!(result.success);
        assert!(fx.state.picker.lock().await.is_none());
        assert!(fx.notifier.messages.lock().unwrap().is_empty());
        assert!(fx.data.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_callout_enabled_persists_and_filters() {
        // Arrange
        let fx = make_fixture(MemoryPluginData::new());

        // Act
        let result = set_callout_enabled(fx.state.clone(), "warning".to_string(), false).await;

        // Assert
        assert!(result.success);
        let blob = fx.data.blob().expect("configuration must be persisted");
        let persisted: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(persisted["warning"], serde_json::json!(false));
        assert_eq!(persisted["note"], serde_json::json!(true));

        open_picker(fx.state.clone()).await;
        let found = update_query(fx.state.clone(), "warn".to_string()).await;
        assert!(found.success);
        assert!(found.data.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_callout_enabled_unknown_identifier_fails() {
        let fx = make_fixture(MemoryPluginData::new());

        let result = set_callout_enabled(fx.state, "notes".to_string(), false).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("unknown callout type: notes"));
        assert!(fx.data.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_settings_reflects_persisted_flags() {
        let fx = make_fixture(MemoryPluginData::with_blob(r#"{ "cite": false }"#));

        let settings = get_settings(fx.state).await.data.unwrap();

        assert_eq!(settings.heading, SETTINGS_HEADING);
        assert_eq!(settings.toggles.len(), 27);
        let cite = settings.toggles.iter().find(|t| t.identifier == "cite").unwrap();
        assert!(!cite.enabled);
    }

    #[tokio::test]
    async fn test_on_unload_closes_open_picker() {
        let fx = make_fixture(MemoryPluginData::new());
        open_picker(fx.state.clone()).await;

        fx.state.on_unload().await;

        assert!(fx.state.picker.lock().await.is_none());
    }

    #[test]
    fn test_command_result_ok_sets_success_true() {
        let r: CommandResult<i32> = CommandResult::ok(42);
        assert!(r.success);
        assert_eq!(r.data.unwrap(), 42);
        assert!(r.error.is_none());
    }

    #[test]
    fn test_command_result_err_sets_success_false() {
        let r: CommandResult<i32> = CommandResult::err("something went wrong");
        assert!(!r.success);
        assert!(r.data.is_none());
        assert_eq!(r.error.unwrap(), "something went wrong");
    }
}

//! `tracing`-backed host adapters for the headless harness.
//!
//! Without a real host UI, notifications and registrations are written to the
//! log.  The registrar also remembers what was registered so the harness can
//! list the available entry points.

use std::sync::Mutex;

use tracing::info;

use crate::application::ports::{CommandRegistrar, CommandSpec, Notifier, RibbonSpec};

/// Logs every notification at `info`.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "callout_picker::notice", "{message}");
    }
}

/// Logs and remembers every registration.
#[derive(Debug, Default)]
pub struct LogCommandRegistrar {
    commands: Mutex<Vec<CommandSpec>>,
    ribbon_icons: Mutex<Vec<RibbonSpec>>,
    settings_tabs: Mutex<Vec<String>>,
}

impl LogCommandRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.lock().expect("lock poisoned").clone()
    }

    pub fn ribbon_icons(&self) -> Vec<RibbonSpec> {
        self.ribbon_icons.lock().expect("lock poisoned").clone()
    }

    pub fn settings_tabs(&self) -> Vec<String> {
        self.settings_tabs.lock().expect("lock poisoned").clone()
    }
}

impl CommandRegistrar for LogCommandRegistrar {
    fn register_command(&self, spec: CommandSpec) {
        info!(id = %spec.id, name = %spec.name, "command registered");
        self.commands.lock().expect("lock poisoned").push(spec);
    }

    fn register_ribbon_icon(&self, spec: RibbonSpec) {
        info!(icon = %spec.icon, title = %spec.title, "ribbon icon registered");
        self.ribbon_icons.lock().expect("lock poisoned").push(spec);
    }

    fn register_settings_tab(&self, heading: &str) {
        info!(heading, "settings tab registered");
        self.settings_tabs
            .lock()
            .expect("lock poisoned")
            .push(heading.to_string());
    }
}

//! Settings panel model: one visibility toggle per callout type.
//!
//! The panel is generated from the catalog, so adding a callout type to the
//! catalog adds its toggle with no further wiring.  Every toggle shares the
//! same handler, [`apply_toggle`], which goes through
//! [`CalloutRegistry::set_enabled`] and therefore persists immediately.

use super::callout_registry::{CalloutRegistry, RegistryError};

/// Heading shown above the toggles.
pub const SETTINGS_HEADING: &str = "Select which callouts are shown.";

/// One row of the settings panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSetting {
    pub identifier: String,
    pub label: String,
    pub icon: Option<String>,
    pub enabled: bool,
}

/// Builds the toggles for every catalog entry, in catalog order.
pub fn toggles(registry: &CalloutRegistry) -> Vec<ToggleSetting> {
    registry
        .catalog()
        .iter()
        .map(|callout| ToggleSetting {
            identifier: callout.identifier.clone(),
            label: callout.identifier.clone(),
            icon: callout.icon.clone(),
            enabled: registry.is_enabled(&callout.identifier),
        })
        .collect()
}

/// Change handler shared by every toggle.
///
/// # Errors
///
/// Returns [`RegistryError::UnknownCallout`] for identifiers outside the
/// catalog.
pub fn apply_toggle(
    registry: &mut CalloutRegistry,
    identifier: &str,
    enabled: bool,
) -> Result<(), RegistryError> {
    registry.set_enabled(identifier, enabled)
}

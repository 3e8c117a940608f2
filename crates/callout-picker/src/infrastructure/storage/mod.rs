//! Storage infrastructure.
//!
//! - `config` – the harness's own TOML settings (log level, data directory,
//!   command and ribbon registration).
//! - `plugin_data` – the [`PluginDataStore`] adapters holding the callout
//!   enabled flags.
//!
//! [`PluginDataStore`]: crate::application::ports::PluginDataStore

pub mod config;
pub mod plugin_data;

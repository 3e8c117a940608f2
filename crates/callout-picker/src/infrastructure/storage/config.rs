//! TOML-based configuration for the headless host harness.
//!
//! The harness stands in for the host application when running the picker
//! from a terminal.  Its settings live in the platform config directory:
//! - Windows:  `%APPDATA%\CalloutPicker\config.toml`
//! - Linux:    `~/.config/callout-picker/config.toml`
//! - macOS:    `~/Library/Application Support/CalloutPicker/config.toml`
//!
//! ```toml
//! [plugin]
//! log_level = "debug"
//! data_dir = "/tmp/callout-picker"
//!
//! [commands]
//! command_id = "insert-callout"
//! ribbon_icon = "dice"
//! ```
//!
//! Every field has a default, so a missing file, a missing section, or a
//! missing key all resolve to the built-in values.  The callout enabled flags
//! are NOT stored here; they belong to the plugin data blob
//! (see `storage::plugin_data`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for harness configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level harness configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HarnessConfig {
    #[serde(default)]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub commands: CommandsConfig,
}

/// Logging and plugin data location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory holding `data.json`.  Defaults to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// How the picker is exposed in the host UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_command_id")]
    pub command_id: String,
    #[serde(default = "default_command_name")]
    pub command_name: String,
    #[serde(default = "default_ribbon_icon")]
    pub ribbon_icon: String,
    #[serde(default = "default_ribbon_title")]
    pub ribbon_title: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_command_id() -> String {
    "insert-callout".to_string()
}
fn default_command_name() -> String {
    "Insert a specific callout".to_string()
}
fn default_ribbon_icon() -> String {
    "dice".to_string()
}
fn default_ribbon_title() -> String {
    "Insert callout".to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: None,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            command_id: default_command_id(),
            command_name: default_command_name(),
            ribbon_icon: default_ribbon_icon(),
            ribbon_title: default_ribbon_title(),
        }
    }
}

impl HarnessConfig {
    /// Directory holding the plugin data blob.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPlatformConfigDir`] when no `data_dir` is set
    /// and the platform directory cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.plugin.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => config_dir(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the harness files.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the default path of the harness config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`HarnessConfig`] from `path`, returning the defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HarnessConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(path: &Path, config: &HarnessConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads [`HarnessConfig`] from `path`, writing the defaults there first if
/// the file does not exist yet.
///
/// # Errors
///
/// Same as [`load_config`] and [`save_config`].
pub fn load_or_init_config(path: &Path) -> Result<HarnessConfig, ConfigError> {
    if path.exists() {
        return load_config(path);
    }
    let config = HarnessConfig::default();
    save_config(path, &config)?;
    Ok(config)
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CalloutPicker"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("callout-picker"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CalloutPicker")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

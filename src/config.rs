//! Configuration management for termdeck.
//!
//! The configuration file is located at `~/.termdeck/config.toml`:
//!
//! ```toml
//! # Log filter used when RUST_LOG is not set
//! log_level = "info"
//!
//! [workspace]
//! # Tabs opened at startup
//! initial_tabs = 1
//! # Close the window when the last tab closes
//! close_window_on_empty = true
//!
//! [keybindings]
//! # action name = accelerator
//! tab_new = "CmdOrCtrl+Shift+T"
//! pane_close = "CmdOrCtrl+Shift+W"
//! ```
//!
//! Every field is optional. Keybinding overrides are validated together with
//! the built-in table when the action registry is built.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::action::{ActionRegistry, RegistryError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid keybindings: {0}")]
    Keybindings(#[from] RegistryError),

    #[error("could not determine home directory")]
    NoHome,
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when RUST_LOG is not set
    pub log_level: String,
    /// Workspace behavior
    pub workspace: WorkspaceConfig,
    /// Accelerator overrides, keyed by action name
    pub keybindings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            workspace: WorkspaceConfig::default(),
            keybindings: BTreeMap::new(),
        }
    }
}

/// Workspace configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub initial_tabs: usize,
    pub close_window_on_empty: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            initial_tabs: 1,
            close_window_on_empty: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path().ok_or(ConfigError::NoHome)?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Build the action registry: built-in table plus `[keybindings]`
    pub fn registry(&self) -> Result<ActionRegistry, ConfigError> {
        Ok(ActionRegistry::with_overrides(&self.keybindings)?)
    }

    /// Spell out every binding of `registry` under `[keybindings]`
    pub fn with_explicit_keybindings(mut self, registry: &ActionRegistry) -> Self {
        self.keybindings = registry
            .iter()
            .map(|(action, accel)| (action.name().to_string(), accel.to_string()))
            .collect();
        self
    }

    /// `~/.termdeck`
    pub fn data_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".termdeck"))
    }

    /// `~/.termdeck/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        Self::data_dir().map(|dir| dir.join("config.toml"))
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [workspace]
            close_window_on_empty = false

            [keybindings]
            tab_new = "CmdOrCtrl+Shift+T"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "info");
        assert_eq!(config.workspace.initial_tabs, 1);
        assert!(!config.workspace.close_window_on_empty);

        let registry = config.registry().unwrap();
        assert_eq!(registry.accelerator_for(Action::TabNew).to_string(), "CmdOrCtrl+Shift+T");
    }

    #[test]
    fn test_conflicting_keybindings_are_rejected() {
        let config = Config::parse(
            r#"
            [keybindings]
            tab_close = "CmdOrCtrl+D"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.registry(),
            Err(ConfigError::Keybindings(RegistryError::Conflict { .. }))
        ));
    }

    #[test]
    fn test_malformed_config() {
        assert!(Config::parse("workspace = 3").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("termdeck-config-{}", std::process::id()));
        let path = dir.join("config.toml");

        let mut config = Config::default();
        config.workspace.initial_tabs = 3;
        config.keybindings.insert("pane_next".into(), "F6".into());
        config.save(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_explicit_keybindings_round_trip() {
        let mut config = Config::default();
        config.keybindings.insert("pane_close".into(), "CmdOrCtrl+Shift+W".into());
        let registry = config.registry().unwrap();

        let explicit = config.with_explicit_keybindings(&registry);
        assert_eq!(explicit.keybindings.len(), Action::COUNT);
        assert_eq!(explicit.keybindings["tab_new"], "CmdOrCtrl+T");
        assert_eq!(explicit.keybindings["pane_close"], "CmdOrCtrl+Shift+W");

        let reparsed = Config::parse(&toml::to_string_pretty(&explicit).unwrap()).unwrap();
        let rebuilt = reparsed.registry().unwrap();
        for action in Action::ALL {
            assert_eq!(rebuilt.accelerator_for(action), registry.accelerator_for(action));
        }
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let path = Path::new("/nonexistent/termdeck/config.toml");
        assert!(matches!(Config::load_from(path), Err(ConfigError::Read { .. })));
    }
}

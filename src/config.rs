//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeselect/treeselect.toml`
//! 3. Local config: `<project_dir>/.treeselect.toml`
//! 4. Environment variables: `TREESELECT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree_file: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub delimiter: Option<String>,
    pub include_keys: Option<bool>,
    pub show_ids: Option<bool>,
}

/// Unified configuration for treeselect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Tree definition file (TOML)
    pub tree_file: Option<PathBuf>,
    /// Where the open session is persisted
    pub state_file: PathBuf,
    /// CSV delimiter for template export
    pub delimiter: String,
    /// Add a row of field keys below the label row on export
    pub include_keys: bool,
    /// Show node ids next to labels
    pub show_ids: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree_file: None,
            state_file: default_state_file(),
            delimiter: ",".into(),
            include_keys: false,
            show_ids: false,
        }
    }
}

/// Default session file in the XDG data directory (~/.treeselect as fallback).
fn default_state_file() -> PathBuf {
    ProjectDirs::from("", "", "treeselect")
        .map(|dirs| dirs.data_dir().join("session.toml"))
        .unwrap_or_else(|| PathBuf::from("~/.treeselect/session.toml"))
}

/// Get the XDG config directory for treeselect.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeselect").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeselect.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".treeselect.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(tree_file) = &self.tree_file {
            self.tree_file = Some(PathBuf::from(expand_env_vars(
                tree_file.to_string_lossy().as_ref(),
            )));
        }
        let expanded = expand_env_vars(self.state_file.to_string_lossy().as_ref());
        self.state_file = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    ///
    /// Relative tree paths in a file are resolved against that file's directory.
    fn merge_with(&self, overlay: &RawSettings, origin: Option<&Path>) -> Self {
        let resolve = |p: &PathBuf| match origin {
            Some(dir) if p.is_relative() && !p.to_string_lossy().starts_with(['~', '$']) => {
                dir.join(p)
            }
            _ => p.clone(),
        };
        Self {
            tree_file: overlay
                .tree_file
                .as_ref()
                .map(resolve)
                .or_else(|| self.tree_file.clone()),
            state_file: overlay
                .state_file
                .as_ref()
                .map(resolve)
                .unwrap_or_else(|| self.state_file.clone()),
            delimiter: overlay
                .delimiter
                .clone()
                .unwrap_or_else(|| self.delimiter.clone()),
            include_keys: overlay.include_keys.unwrap_or(self.include_keys),
            show_ids: overlay.show_ids.unwrap_or(self.show_ids),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.treeselect.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("local config: {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(dir));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply TREESELECT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let builder = Config::builder().add_source(
            Environment::with_prefix("TREESELECT")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("tree_file") {
            settings.tree_file = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_string("state_file") {
            settings.state_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("delimiter") {
            settings.delimiter = val;
        }
        if let Ok(val) = config.get_bool("include_keys") {
            settings.include_keys = val;
        }
        if let Ok(val) = config.get_bool("show_ids") {
            settings.show_ids = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeselect configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeselect/treeselect.toml
#   Local:  <project_dir>/.treeselect.toml
#   Env:    TREESELECT_* environment variables (explicit overrides)
#
# Relative paths in a config file are resolved against that file's directory.

# Tree definition file
# tree_file = "fields.toml"

# Session state file (selection and expansion between invocations)
# state_file = "~/.local/share/treeselect/session.toml"

# CSV delimiter for `export`
# delimiter = ","

# Add a second row with field keys on export
# include_keys = false

# Show node ids in `show`
# show_ids = false
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/exprtree/exprtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `EXPRTREE_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Precision;

/// Default name of the menu banner file, looked up in the working directory.
pub const DEFAULT_MENU_FILE: &str = "Menu.txt";

/// Unified configuration for exprtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Banner printed when the interactive menu starts (default: Menu.txt)
    pub menu_file: PathBuf,
    /// Floating-point precision for evaluation and display (default: single)
    pub precision: Precision,
    /// Print the tree shape after traversals (default: true)
    pub show_tree: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            menu_file: PathBuf::from(DEFAULT_MENU_FILE),
            precision: Precision::Single,
            show_tree: true,
        }
    }
}

/// Raw settings for layered merging; `None` means "not specified, inherit".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSettings {
    pub menu_file: Option<PathBuf>,
    pub precision: Option<Precision>,
    pub show_tree: Option<bool>,
}

/// Get the XDG config directory for exprtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "exprtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("exprtree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; leaves the input untouched on lookup failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
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

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.menu_file.to_string_lossy().as_ref());
        self.menu_file = PathBuf::from(expanded);
    }

    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            menu_file: overlay
                .menu_file
                .clone()
                .unwrap_or_else(|| self.menu_file.clone()),
            precision: overlay.precision.unwrap_or(self.precision),
            show_tree: overlay.show_tree.unwrap_or(self.show_tree),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            debug!("loading config: {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        Ok(current)
    }

    /// Apply EXPRTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(Environment::with_prefix("EXPRTREE"));

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get_string("menu_file") {
            settings.menu_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("precision") {
            settings.precision = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("EXPRTREE_PRECISION: {e}"),
            })?;
        }
        if let Ok(val) = config.get_bool("show_tree") {
            settings.show_tree = val;
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
        r#"# exprtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/exprtree/exprtree.toml
#   File:   exprtree --config <FILE>
#   Env:    EXPRTREE_* environment variables (e.g. EXPRTREE_PRECISION=double)

# Banner shown when the interactive menu starts; a built-in menu is used if missing
# menu_file = "Menu.txt"

# Floating-point precision: "single" (IEEE-754 binary32) or "double"
# precision = "single"

# Print the tree shape together with the traversals
# show_tree = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

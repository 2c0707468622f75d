//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/projtree/projtree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `PROJTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::RowNumbering;

/// Unified configuration for projtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Prefix of generated row labels (default: "Row")
    pub label_prefix: String,
    /// Number carried by the first generated row (default: 0)
    pub first_row_number: u32,
    /// Expand the parent row when a child is added to it
    pub expand_on_add: bool,
    /// Prefix rows with their visible position in `list` output
    pub show_positions: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            label_prefix: "Row".into(),
            first_row_number: 0,
            expand_on_add: true,
            show_positions: true,
        }
    }
}

/// Get the XDG config directory for projtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "projtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("projtree.toml"))
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), explicit)
    }

    /// Layered load with the global config location supplied by the caller.
    ///
    /// A missing global file is skipped, a missing explicit file is an error.
    pub fn load_layers(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("label_prefix", defaults.label_prefix.clone())
            .map_err(config_err)?
            .set_default("first_row_number", i64::from(defaults.first_row_number))
            .map_err(config_err)?
            .set_default("expand_on_add", defaults.expand_on_add)
            .map_err(config_err)?
            .set_default("show_positions", defaults.show_positions)
            .map_err(config_err)?;

        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                builder = builder.add_source(File::from(global_path.to_path_buf()).required(false));
            }
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("PROJTREE")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Row label generator configured by these settings.
    pub fn row_numbering(&self) -> RowNumbering {
        RowNumbering::new(self.label_prefix.clone(), self.first_row_number)
    }

    /// Effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

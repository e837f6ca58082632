//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Settings file: explicit `--config` path, else `$XDG_CONFIG_HOME/treeize/treeize.toml`
//! 3. Environment variables: `TREEIZE_*` prefix
//!
//! Command line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::{OrphanPolicy, TreeBuilder, TreeKind};

/// Effective settings for building and rendering hierarchies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Build a forest (many top nodes) instead of a single-rooted tree
    pub forest: bool,
    /// Orphan handling; unset means discard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orphan_policy: Option<OrphanPolicy>,
    /// Order siblings by their `order` field
    pub sorted: bool,
    /// Indent repeated once per layer
    pub prefix: String,
    /// Replaces the first indent repetition when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_prefix: Option<String>,
    /// Separator used when printing node paths
    pub path_separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forest: false,
            orphan_policy: None,
            sorted: false,
            prefix: "--".into(),
            first_prefix: Some("+-".into()),
            path_separator: "/".into(),
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub forest: Option<bool>,
    pub orphan_policy: Option<OrphanPolicy>,
    pub sorted: Option<bool>,
    pub prefix: Option<String>,
    pub first_prefix: Option<String>,
    pub path_separator: Option<String>,
}

/// Get the XDG config directory for treeize.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeize").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeize.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            forest: overlay.forest.unwrap_or(self.forest),
            orphan_policy: overlay.orphan_policy.or(self.orphan_policy),
            sorted: overlay.sorted.unwrap_or(self.sorted),
            prefix: overlay.prefix.clone().unwrap_or_else(|| self.prefix.clone()),
            // empty string switches the first prefix off
            first_prefix: match &overlay.first_prefix {
                Some(p) if p.is_empty() => None,
                Some(p) => Some(p.clone()),
                None => self.first_prefix.clone(),
            },
            path_separator: overlay
                .path_separator
                .clone()
                .unwrap_or_else(|| self.path_separator.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// An explicit `config_file` must exist; the global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        let file = match config_file {
            Some(path) if !path.exists() => {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                })
            }
            Some(path) => Some(path.to_path_buf()),
            None => global_config_path().filter(|p| p.exists()),
        };
        if let Some(path) = file {
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply TREEIZE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEIZE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("forest") {
            settings.forest = val;
        }
        if let Ok(val) = config.get_string("orphan_policy") {
            let policy = val
                .parse::<OrphanPolicy>()
                .map_err(|message| ApplicationError::Config { message })?;
            settings.orphan_policy = Some(policy);
        }
        if let Ok(val) = config.get_bool("sorted") {
            settings.sorted = val;
        }
        if let Ok(val) = config.get_string("prefix") {
            settings.prefix = val;
        }
        if let Ok(val) = config.get_string("first_prefix") {
            settings.first_prefix = Some(val).filter(|p| !p.is_empty());
        }
        if let Ok(val) = config.get_string("path_separator") {
            settings.path_separator = val;
        }

        Ok(settings)
    }

    pub fn kind(&self) -> TreeKind {
        if self.forest {
            TreeKind::Forest
        } else {
            TreeKind::Tree
        }
    }

    /// Builder configured with this kind and orphan policy.
    pub fn builder(&self) -> TreeBuilder {
        TreeBuilder::new(self.kind()).orphan_policy(self.orphan_policy)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

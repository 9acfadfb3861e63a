//! Configuration management for trajview.
//!
//! Settings are read from, in increasing precedence:
//! 1. built-in defaults
//! 2. the user config file (`<config dir>/trajview/config.toml`, or `--config`)
//! 3. `.trajview.toml` in the current directory
//!
//! Command-line flags override all of these. Layers are merged key by key,
//! so a project file only needs the settings it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ViewerError};
use crate::export::{ExportFormat, ExportOptions};
use crate::model::Outcome;
use crate::util::atomic_write;

/// Project-specific configuration filename.
pub const PROJECT_CONFIG_FILENAME: &str = ".trajview.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Trajectory store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Default export settings.
    #[serde(default)]
    pub export: ExportConfig,
    /// Terminal display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from the default user location.
    pub fn load() -> Result<Self> {
        let path = default_config_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load the user config (or `explicit`) with project overrides from
    /// `project_dir`.
    ///
    /// A missing user config falls back to defaults; an explicit path that
    /// does not exist is an error.
    pub fn load_layered(explicit: Option<&Path>, project_dir: &Path) -> Result<Self> {
        let mut merged = toml::Table::new();

        let user_path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ViewerError::ConfigError {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => default_config_path().ok().filter(|p| p.exists()),
        };

        for path in user_path
            .into_iter()
            .chain(Some(project_dir.join(PROJECT_CONFIG_FILENAME)).filter(|p| p.exists()))
        {
            debug!(path = %path.display(), "Applying config layer");
            merge_tables(&mut merged, read_table(&path)?);
        }

        toml::Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ViewerError::InvalidConfig {
                message: e.to_string(),
            })
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewerError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| ViewerError::InvalidConfig {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Save configuration to a specific path atomically.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        atomic_write(path, content.as_bytes())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ViewerError::InvalidConfig {
            message: format!("Failed to serialize config: {e}"),
        })
    }

    /// Export options implied by the `[export]` section.
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            include_reasoning: self.export.include_reasoning,
            include_raw_segments: self.export.include_raw_segments,
            show_diff: self.export.show_diff,
            truncate_at: self.export.truncate_at,
            dark_theme: self.display.theme == "dark",
            collapse_reasoning: self.display.collapse_reasoning,
            ..ExportOptions::default()
        }
    }

    /// Default export format, validated.
    pub fn export_format(&self) -> Result<ExportFormat> {
        ExportFormat::from_str(&self.export.format).ok_or_else(|| ViewerError::InvalidConfig {
            message: format!("unknown export format '{}'", self.export.format),
        })
    }
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the `traj<N>` folders.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Outcome shown first.
    #[serde(default)]
    pub default_outcome: Outcome,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            default_outcome: Outcome::Success,
        }
    }
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Default format for `render` and `demo`.
    #[serde(default = "default_format")]
    pub format: String,
    /// Include reasoning blocks.
    #[serde(default = "default_true")]
    pub include_reasoning: bool,
    /// Include untagged text inside function bodies.
    #[serde(default = "default_true")]
    pub include_raw_segments: bool,
    /// Append a diff under edit pairs.
    #[serde(default)]
    pub show_diff: bool,
    /// Truncate long text at this many characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncate_at: Option<usize>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            include_reasoning: true,
            include_raw_segments: true,
            show_diff: false,
            truncate_at: None,
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Theme name (`dark` or `light`).
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Start with reasoning collapsed in the terminal browser.
    #[serde(default)]
    pub collapse_reasoning: bool,
    /// Use Unicode box drawing and symbols.
    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            collapse_reasoning: false,
            unicode: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_root() -> PathBuf {
    PathBuf::from("./data/trajs")
}

fn default_format() -> String {
    "markdown".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

fn read_table(path: &Path) -> Result<toml::Table> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ViewerError::io(format!("Failed to read config file: {}", path.display()), e)
    })?;
    content.parse::<toml::Table>().map_err(|e| ViewerError::InvalidConfig {
        message: format!("{}: {e}", path.display()),
    })
}

/// Deep-merge `overlay` into `base`; overlay values win.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match value {
            toml::Value::Table(incoming) => {
                if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                    merge_tables(existing, incoming);
                    continue;
                }
                base.insert(key, toml::Value::Table(incoming));
            }
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Get the default configuration path.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ViewerError::unsupported("config directory discovery"))?;
    Ok(config_dir.join("trajview").join("config.toml"))
}

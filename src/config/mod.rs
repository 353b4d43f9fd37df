//! Configuration: YAML config file loading with automatic discovery, plus
//! persisted TUI preferences.
//!
//! Place a `.stockdeck.yaml` in your project root or `~/.config/stockdeck/`:
//!
//! ```yaml
//! catalog:
//!   path: ~/catalogs/asx.yaml
//! tui:
//!   theme: light
//!   mouse_enabled: false
//! ```

use crate::error::{Result, StockdeckError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".stockdeck.yaml",
    ".stockdeck.yml",
    "stockdeck.yaml",
    "stockdeck.yml",
];

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog source configuration
    pub catalog: CatalogConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

/// Where the industry catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a YAML catalog file; the built-in ASX catalog when unset
    pub path: Option<PathBuf>,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
        }
    }
}

impl AppConfig {
    /// Load from an explicit or discovered config file, or defaults when no
    /// file exists anywhere.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        match discover_config_file(explicit) {
            Some(path) => {
                let config = Self::from_path(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    /// Load from a specific YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StockdeckError::io(path, e))?;
        serde_yaml::from_str(&content).map_err(|e| {
            StockdeckError::Config(format!("{}: {e}", path.display()))
        })
    }
}

/// Discover a config file by searching standard locations.
///
/// Search order: explicit path, current directory, git repository root,
/// user config directory (`~/.config/stockdeck/`), home directory.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(git_root) = find_git_root() {
        if let Some(path) = find_config_in_dir(&git_root) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("stockdeck")) {
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_config_in_dir(&home) {
            return Some(path);
        }
    }

    None
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

/// TUI preferences that persist across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiPreferences {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stockdeck").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

//! Configuration module for Data Charts
//!
//! This module handles everything the app keeps on disk apart from the
//! session snapshot itself:
//! - The application data directory
//! - User preferences (theme, sidebar, edit debounce, window size)
//! - The log directory
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.data-charts/`
//! - **macOS**: `~/Library/Application Support/dev.data-charts/`
//! - **Windows**: `%APPDATA%\dev.data-charts\`
//!
//! # Files
//!
//! - `preferences.json` - [`Preferences`]
//! - `data-charts_config.json` - Session snapshot (see [`crate::store`])
//! - `logs/` - Daily rolling log files

use crate::error::{DataChartsError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for data directories
pub const APP_ID: &str = "dev.data-charts";

/// Preferences filename
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Log directory name inside the app data directory
pub const LOGS_DIR: &str = "logs";

/// Default quiet period before a cell edit is committed
pub const DEFAULT_EDIT_DEBOUNCE_MS: u64 = 100;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        DataChartsError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            DataChartsError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the log directory path
pub fn logs_dir() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(LOGS_DIR))
}

/// Get the path to the preferences file
pub fn preferences_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(PREFERENCES_FILE))
}

// ==================== Preferences ====================

/// User preferences that are not part of the chart session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Format version
    #[serde(default = "default_preferences_version")]
    pub version: u32,

    /// Enable dark mode
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Show the data sidebar
    #[serde(default = "default_true")]
    pub sidebar_open: bool,

    /// Quiet period before a cell edit reaches the store
    #[serde(default = "default_edit_debounce_ms")]
    pub edit_debounce_ms: u64,

    /// Last window size
    #[serde(default)]
    pub window_size: Option<[f32; 2]>,
}

fn default_preferences_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_edit_debounce_ms() -> u64 {
    DEFAULT_EDIT_DEBOUNCE_MS
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: 1,
            dark_mode: true,
            sidebar_open: true,
            edit_debounce_ms: DEFAULT_EDIT_DEBOUNCE_MS,
            window_size: None,
        }
    }
}

impl Preferences {
    /// Load preferences from `path`; a missing file yields defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DataChartsError::Config(format!("Failed to read preferences: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| DataChartsError::Config(format!("Failed to parse preferences: {}", e)))
    }

    /// Load preferences from the default location
    pub fn load() -> Result<Self> {
        let path = preferences_path().ok_or_else(|| {
            DataChartsError::Config("Could not determine preferences path".to_string())
        })?;
        Self::load_from(path)
    }

    /// Load preferences, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load preferences, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save preferences to `path`, creating the parent directory
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DataChartsError::Config(format!("Failed to create preferences directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| {
            DataChartsError::Config(format!("Failed to serialize preferences: {}", e))
        })?;

        std::fs::write(path, content)
            .map_err(|e| DataChartsError::Config(format!("Failed to write preferences: {}", e)))
    }

    /// Save preferences to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(PREFERENCES_FILE))
    }

    /// Edit debounce as a [`std::time::Duration`]
    pub fn edit_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.edit_debounce_ms)
    }
}

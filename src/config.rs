//! Configuration persistence for toolbar settings

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::draw_toolbar::KeyEventKey;

/// Toolbar configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapmarkConfig {
    /// Shortest selection side (physical pixels) that allows a scrolling screenshot
    #[serde(default = "default_min_scroll_screenshot_side")]
    pub min_scroll_screenshot_side: i32,
    /// Gap between the selection and the size readout label
    #[serde(default = "default_label_margin")]
    pub label_margin: f64,
    /// Gap between the selection and the toolbar
    #[serde(default = "default_toolbar_margin")]
    pub toolbar_margin: f64,
    /// Key chord per toolbar button, e.g. `"ctrl+z"`
    #[serde(default = "default_hotkeys")]
    pub hotkeys: BTreeMap<KeyEventKey, String>,
}

fn default_min_scroll_screenshot_side() -> i32 {
    300
}

fn default_label_margin() -> f64 {
    4.0
}

fn default_toolbar_margin() -> f64 {
    8.0
}

fn default_hotkeys() -> BTreeMap<KeyEventKey, String> {
    KeyEventKey::ALL
        .iter()
        .map(|key| (*key, key.default_chord().to_string()))
        .collect()
}

impl Default for SnapmarkConfig {
    fn default() -> Self {
        Self {
            min_scroll_screenshot_side: default_min_scroll_screenshot_side(),
            label_margin: default_label_margin(),
            toolbar_margin: default_toolbar_margin(),
            hotkeys: default_hotkeys(),
        }
    }
}

impl SnapmarkConfig {
    /// Application directory name under the user config dir
    pub const ID: &'static str = "snapmark";

    /// Default location of the config file
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().context("No user config directory available")?;
        Ok(dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(path) => path,
            Err(err) => {
                log::warn!("Could not locate config file, using defaults: {:?}", err);
                return Self::default();
            }
        };

        match Self::load_from(&path) {
            Ok(Some(config)) => config,
            Ok(None) => Self::default(),
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file, `None` if it does not exist
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: SnapmarkConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        // Buttons added after the file was written keep their default chord
        for key in KeyEventKey::ALL {
            config
                .hotkeys
                .entry(key)
                .or_insert_with(|| key.default_chord().to_string());
        }

        Ok(Some(config))
    }

    /// Save configuration to disk
    pub fn save(&self) {
        let result = Self::config_path().and_then(|path| self.save_to(&path));
        if let Err(err) = result {
            log::error!("Failed to save config: {:?}", err);
        }
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Chord bound to a toolbar button
    pub fn hotkey(&self, key: KeyEventKey) -> &str {
        self.hotkeys
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_chord())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SnapmarkConfig::default();
        assert_eq!(config.min_scroll_screenshot_side, 300);
        assert_eq!(config.hotkeys.len(), KeyEventKey::ALL.len());
        assert_eq!(config.hotkey(KeyEventKey::Undo), "ctrl+z");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = SnapmarkConfig::load_from(&dir.path().join("absent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = SnapmarkConfig::default();
        config.min_scroll_screenshot_side = 420;
        config
            .hotkeys
            .insert(KeyEventKey::RectTool, "shift+r".to_string());
        config.save_to(&path).unwrap();

        let loaded = SnapmarkConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "hotkeys": { "PenTool": "shift+p" } }"#).unwrap();

        let loaded = SnapmarkConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.min_scroll_screenshot_side, 300);
        assert_eq!(loaded.hotkey(KeyEventKey::PenTool), "shift+p");
        assert_eq!(loaded.hotkey(KeyEventKey::Redo), "ctrl+y");
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(SnapmarkConfig::load_from(&path).is_err());
    }
}

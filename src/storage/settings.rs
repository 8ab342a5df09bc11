//! Settings storage
//!
//! Manages persistence of user preferences and application settings.

use crate::inference::DEFAULT_MODEL;
use crate::prompt::DEFAULT_SNAPSHOT_ROWS;
use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Model identifier sent to the inference API
    pub model: String,
    /// Temperature parameter for completions (0.0 - 2.0)
    pub temperature: f32,
    /// Maximum number of tokens in a completion
    pub max_tokens: u32,
    /// Rows of the dataset rendered into the prompt snapshot
    pub snapshot_rows: usize,
    /// UI theme: "dark" or "light"
    pub theme: String,
    /// Font size: "small", "medium", or "large"
    pub font_size: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.2,
            max_tokens: 1024,
            snapshot_rows: DEFAULT_SNAPSHOT_ROWS,
            theme: "dark".to_string(),
            font_size: "medium".to_string(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all parameters are within acceptable ranges
    pub fn validate(&mut self) {
        // Clamp temperature between 0.0 and 2.0
        self.temperature = self.temperature.clamp(0.0, 2.0);

        if self.model.trim().is_empty() {
            self.model = DEFAULT_MODEL.to_string();
        }

        if self.max_tokens == 0 {
            self.max_tokens = 1024;
        }

        // A snapshot always carries at least one row, at most 200
        self.snapshot_rows = self.snapshot_rows.clamp(1, 200);

        // Validate theme
        if self.theme != "dark" && self.theme != "light" {
            self.theme = "dark".to_string();
        }

        // Validate font size
        if !["small", "medium", "large"].contains(&self.font_size.as_str()) {
            self.font_size = "medium".to_string();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_internal() -> Result<AppSettings, StorageError> {
    let path = get_settings_path()?;

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;

    // Validate loaded settings
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;

    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.temperature, 0.2);
        assert_eq!(settings.max_tokens, 1024);
        assert_eq!(settings.snapshot_rows, 10);
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.font_size, "medium");
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AppSettings::default();

        // Test temperature clamping
        settings.temperature = 5.0;
        settings.validate();
        assert_eq!(settings.temperature, 2.0);

        settings.temperature = -1.0;
        settings.validate();
        assert_eq!(settings.temperature, 0.0);

        // Blank model falls back to the default
        settings.model = "  ".to_string();
        settings.validate();
        assert_eq!(settings.model, DEFAULT_MODEL);

        // Snapshot rows are clamped into 1..=200
        settings.snapshot_rows = 0;
        settings.validate();
        assert_eq!(settings.snapshot_rows, 1);

        settings.snapshot_rows = 10_000;
        settings.validate();
        assert_eq!(settings.snapshot_rows, 200);

        // Test invalid theme
        settings.theme = "invalid".to_string();
        settings.validate();
        assert_eq!(settings.theme, "dark");

        // Test invalid font size
        settings.font_size = "huge".to_string();
        settings.validate();
        assert_eq!(settings.font_size, "medium");
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings::default();

        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: AppSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings.model, deserialized.model);
        assert_eq!(settings.temperature, deserialized.temperature);
        assert_eq!(settings.snapshot_rows, deserialized.snapshot_rows);
        assert_eq!(settings.theme, deserialized.theme);
    }

    #[test]
    fn test_settings_persistence() {
        // Test that settings survive a save/load cycle through real files
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.snapshot_rows = 25;

        let json = serde_json::to_string_pretty(&settings).unwrap();
        fs::write(&path, json).unwrap();

        let loaded_json = fs::read_to_string(&path).unwrap();
        let mut loaded: AppSettings = serde_json::from_str(&loaded_json).unwrap();
        loaded.validate();

        assert_eq!(loaded.snapshot_rows, 25);
        assert_eq!(loaded.model, settings.model);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

use super::migration;
use super::Settings;

impl Settings {
    /// Get the default settings file path.
    pub fn default_path() -> PathBuf {
        Self::forge_home().join("settings.json")
    }

    /// Load settings from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let raw_value: serde_json::Value = serde_json::from_str(&content)?;
        let migrated = migration::migrate_on_load(raw_value);
        let settings: Settings = serde_json::from_value(migrated)?;
        Ok(settings)
    }

    /// Save settings to a specific path, merging with existing file content
    /// to preserve keys owned by other parts of the desktop app.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let new_value = serde_json::to_value(self)?;

        let merged = if path.exists() {
            let existing_content = std::fs::read_to_string(path)?;
            match serde_json::from_str::<serde_json::Value>(&existing_content) {
                Ok(existing_value) => migration::deep_merge(existing_value, new_value),
                Err(_) => new_value, // Corrupt file, overwrite entirely.
            }
        } else {
            new_value
        };

        let content = serde_json::to_string_pretty(&merged)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Return a copy with one key replaced, addressed by its store name
    /// (e.g. `aiModel`, `refreshInterval`).
    ///
    /// String-typed keys take the raw text verbatim; other keys parse it as JSON
    /// so numbers stay numbers.
    pub fn with_value(&self, key: &str, raw: &str) -> Result<Self> {
        let mut value = serde_json::to_value(self)?;
        let object = value
            .as_object_mut()
            .ok_or_else(|| ForgeError::Config("settings are not a JSON object".to_string()))?;

        if !object.contains_key(key) && !Self::optional_keys().contains(&key) {
            return Err(ForgeError::InvalidInput(format!(
                "unknown settings key '{}'",
                key
            )));
        }

        let string_typed = Self::optional_keys().contains(&key)
            || matches!(object.get(key), Some(serde_json::Value::String(_)));
        let parsed = if string_typed {
            serde_json::Value::String(raw.to_string())
        } else {
            serde_json::from_str::<serde_json::Value>(raw)
                .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
        };
        object.insert(key.to_string(), parsed);

        let updated: Settings = serde_json::from_value(value).map_err(|e| {
            ForgeError::InvalidInput(format!("invalid value for '{}': {}", key, e))
        })?;
        updated.validate()?;
        Ok(updated)
    }

    /// Keys that are omitted from the serialized form while unset.
    fn optional_keys() -> &'static [&'static str] {
        &["aiBaseUrl"]
    }

    /// Get the forge home directory (~/.forge or $FORGE_HOME).
    pub fn forge_home() -> PathBuf {
        if let Ok(home) = std::env::var("FORGE_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".forge")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_value_string() {
        let updated = Settings::default().with_value("aiModel", "gpt-4o").unwrap();
        assert_eq!(updated.ai_model, "gpt-4o");
    }

    #[test]
    fn test_with_value_number() {
        let updated = Settings::default()
            .with_value("refreshInterval", "5000")
            .unwrap();
        assert_eq!(updated.refresh_interval_ms, 5000);
    }

    #[test]
    fn test_with_value_numeric_text_for_string_key() {
        let updated = Settings::default().with_value("aiApiKey", "12345").unwrap();
        assert_eq!(updated.ai_api_key, "12345");
    }

    #[test]
    fn test_with_value_optional_key() {
        let updated = Settings::default()
            .with_value("aiBaseUrl", "http://localhost:9000/v1/chat/completions")
            .unwrap();
        assert_eq!(
            updated.ai_base_url.as_deref(),
            Some("http://localhost:9000/v1/chat/completions")
        );
    }

    #[test]
    fn test_with_value_unknown_key() {
        let err = Settings::default().with_value("colour", "red").unwrap_err();
        assert!(err.to_string().contains("unknown settings key"));
    }

    #[test]
    fn test_with_value_wrong_type() {
        let err = Settings::default()
            .with_value("refreshInterval", "fast")
            .unwrap_err();
        assert!(err.to_string().contains("refreshInterval"));
    }

    #[test]
    fn test_with_value_runs_validation() {
        let err = Settings::default()
            .with_value("refreshInterval", "10")
            .unwrap_err();
        assert!(matches!(err, ForgeError::Config(_)));
    }
}

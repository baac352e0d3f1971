// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for Forge
//!
//! Handles loading and saving settings from ~/.forge/settings.json. Keys are
//! camelCase so the file stays interchangeable with the desktop settings store.

use serde::{Deserialize, Serialize};

mod io;
mod migration;
mod validation;

pub use validation::Credential;

/// Main settings structure, stored in ~/.forge/settings.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// UI theme
    #[serde(default = "default_theme")]
    pub theme: String,

    /// UI language
    #[serde(default = "default_language")]
    pub language: String,

    /// Performance profile shown in the dashboard
    #[serde(default = "default_performance_mode")]
    pub performance_mode: String,

    /// Chat provider name ("openai" or "openrouter")
    #[serde(default = "default_ai_provider")]
    pub ai_provider: String,

    /// API key entered by the user; empty means not set
    #[serde(default)]
    pub ai_api_key: String,

    /// Environment variable consulted when no key is stored
    #[serde(default = "default_ai_api_key_env")]
    pub ai_api_key_env: String,

    /// Default chat model
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// Base URL override for the provider endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_base_url: Option<String>,

    /// Telemetry poll period in milliseconds
    #[serde(rename = "refreshInterval", default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,

    /// Upper bound for a single chat request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            language: default_language(),
            performance_mode: default_performance_mode(),
            ai_provider: default_ai_provider(),
            ai_api_key: String::new(),
            ai_api_key_env: default_ai_api_key_env(),
            ai_model: default_ai_model(),
            ai_base_url: None,
            refresh_interval_ms: default_refresh_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Model used when neither the caller nor the settings name one.
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

fn default_theme() -> String {
    "dark".to_string()
}

fn default_language() -> String {
    "ar".to_string()
}

fn default_performance_mode() -> String {
    "balanced".to_string()
}

fn default_ai_provider() -> String {
    "openai".to_string()
}

fn default_ai_api_key_env() -> String {
    "FORGE_AI_API_KEY".to_string()
}

fn default_ai_model() -> String {
    DEFAULT_AI_MODEL.to_string()
}

fn default_refresh_interval_ms() -> u64 {
    2000
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.theme, "dark");
        assert_eq!(settings.language, "ar");
        assert_eq!(settings.performance_mode, "balanced");
        assert_eq!(settings.ai_provider, "openai");
        assert!(settings.ai_api_key.is_empty());
        assert_eq!(settings.ai_model, "gpt-4o-mini");
        assert_eq!(settings.refresh_interval_ms, 2000);
        assert_eq!(settings.request_timeout_secs, 30);
    }

    #[test]
    fn test_settings_serializes_store_key_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["aiProvider"], "openai");
        assert_eq!(json["refreshInterval"], 2000);
        assert_eq!(json["performanceMode"], "balanced");
        assert!(json.get("aiBaseUrl").is_none());
    }

    #[test]
    fn test_settings_deserialize_partial() {
        let settings: Settings =
            serde_json::from_str(r#"{"aiModel": "gpt-4o", "refreshInterval": 5000}"#).unwrap();
        assert_eq!(settings.ai_model, "gpt-4o");
        assert_eq!(settings.refresh_interval_ms, 5000);
        assert_eq!(settings.theme, "dark");
    }

    #[test]
    fn test_settings_load_from_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_settings_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings {
            ai_model: "gpt-4o".to_string(),
            refresh_interval_ms: 1000,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.ai_model, "gpt-4o");
        assert_eq!(loaded.refresh_interval_ms, 1000);
    }

    #[test]
    fn test_settings_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("settings.json");

        Settings::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_settings_save_preserves_unknown_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"windowBounds": {"width": 1400}, "theme": "light"}"#).unwrap();

        let settings = Settings {
            theme: "dark".to_string(),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["windowBounds"]["width"], 1400);
        assert_eq!(raw["theme"], "dark");
    }

    #[test]
    fn test_settings_load_migrates_legacy_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"api_key": "sk-legacy", "default_ai_model": "gpt-4o", "auto_refresh_interval": 5000}"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.ai_api_key, "sk-legacy");
        assert_eq!(settings.ai_model, "gpt-4o");
        assert_eq!(settings.refresh_interval_ms, 5000);
    }

    #[test]
    fn test_settings_load_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Settings::load_from(&path).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings commands

use std::path::Path;

use crate::cli::args::{OutputFormat, SettingsArgs, SettingsCommands};
use crate::config::Settings;
use crate::error::Result;

use super::print_json;

/// Execute the settings command against the file at `path`
pub fn execute(args: &SettingsArgs, path: &Path, format: OutputFormat) -> Result<()> {
    match args.command.as_ref().unwrap_or(&SettingsCommands::Show) {
        SettingsCommands::Show => {
            let settings = Settings::load_from(path)?;
            let view = masked_view(&settings)?;
            if format == OutputFormat::Json {
                return print_json(&view);
            }
            println!("\n=== Settings ({}) ===\n", path.display());
            if let Some(object) = view.as_object() {
                for (key, value) in object {
                    println!("{:<20} {}", key, display_value(value));
                }
            }
            if let Err(e) = settings.validate() {
                println!("\nWarning: {} (the service clamps out-of-range values)", e);
            }
            let credential = settings.resolve_credential();
            println!(
                "\nAPI key: {}",
                if credential.is_configured() {
                    "configured"
                } else {
                    "not configured"
                }
            );
            Ok(())
        }
        SettingsCommands::Set { key, value } => {
            let settings = Settings::load_from(path)?.with_value(key, value)?;
            settings.save_to(path)?;
            tracing::debug!(target: "forge.config", key = %key, "settings value updated");
            if format == OutputFormat::Json {
                return print_json(&masked_view(&settings)?);
            }
            println!("Set {} in {}", key, path.display());
            Ok(())
        }
        SettingsCommands::Path => {
            if format == OutputFormat::Json {
                return print_json(&serde_json::json!({ "path": path }));
            }
            println!("{}", path.display());
            Ok(())
        }
    }
}

/// Settings as JSON with the API key masked.
pub fn masked_view(settings: &Settings) -> Result<serde_json::Value> {
    let mut view = serde_json::to_value(settings)?;
    if let Some(object) = view.as_object_mut() {
        let masked = settings.masked_api_key().unwrap_or_default();
        object.insert("aiApiKey".to_string(), serde_json::Value::String(masked));
    }
    Ok(view)
}

fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if s.is_empty() => "(not set)".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_masked_view_hides_key() {
        let settings = Settings {
            ai_api_key: "sk-live-abcdef9876".to_string(),
            ..Settings::default()
        };
        let view = masked_view(&settings).unwrap();
        assert_eq!(view["aiApiKey"], "****9876");
        assert!(!view.to_string().contains("abcdef"));
        assert_eq!(view["refreshInterval"], 2000);
    }

    #[test]
    fn test_set_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let args = SettingsArgs {
            command: Some(SettingsCommands::Set {
                key: "refreshInterval".to_string(),
                value: "1000".to_string(),
            }),
        };

        execute(&args, &path, OutputFormat::Json).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded.refresh_interval_ms, 1000);
    }

    #[test]
    fn test_set_rejects_invalid_value() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let args = SettingsArgs {
            command: Some(SettingsCommands::Set {
                key: "refreshInterval".to_string(),
                value: "10".to_string(),
            }),
        };

        assert!(execute(&args, &path, OutputFormat::Text).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&serde_json::json!("")), "(not set)");
        assert_eq!(display_value(&serde_json::json!("dark")), "dark");
        assert_eq!(display_value(&serde_json::json!(30)), "30");
    }
}

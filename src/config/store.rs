// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Read-only settings collaborators consumed by the service.

use std::path::PathBuf;

use super::Settings;

/// Source of the current settings. The service never writes through it.
pub trait SettingsStore: Send + Sync {
    /// Current settings snapshot.
    fn snapshot(&self) -> Settings;
}

impl SettingsStore for Settings {
    fn snapshot(&self) -> Settings {
        self.clone()
    }
}

/// Settings backed by a JSON file, re-read on every snapshot so edits made by
/// the settings view are picked up without restarting the service.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default `~/.forge/settings.json` location.
    pub fn default_location() -> Self {
        Self::new(Settings::default_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn snapshot(&self) -> Settings {
        match Settings::load_from(&self.path) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    tracing::warn!(
                        target: "forge.config",
                        path = %self.path.display(),
                        error = %e,
                        "settings out of range, clamping"
                    );
                    settings.clamped()
                }
            },
            Err(e) => {
                tracing::warn!(
                    target: "forge.config",
                    path = %self.path.display(),
                    error = %e,
                    "failed to read settings, using defaults"
                );
                Settings::default()
            }
        }
    }
}

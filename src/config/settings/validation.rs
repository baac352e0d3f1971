// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use std::fmt;
use std::time::Duration;

use crate::error::{ForgeError, Result};
use crate::llm::providers::SUPPORTED_PROVIDERS;

use super::{Settings, DEFAULT_AI_MODEL};

/// Accepted telemetry poll periods, in milliseconds.
const REFRESH_INTERVAL_RANGE: std::ops::RangeInclusive<u64> = 250..=60_000;

/// Accepted chat request timeouts, in seconds.
const REQUEST_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=300;

/// API credential resolved from settings.
///
/// There is no shared built-in key: an empty store and an unset
/// environment variable resolve to `Unconfigured`.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Configured(String),
    Unconfigured,
}

impl Credential {
    pub fn is_configured(&self) -> bool {
        matches!(self, Credential::Configured(_))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Configured(key) => write!(f, "Configured({})", mask_key(key)),
            Credential::Unconfigured => write!(f, "Unconfigured"),
        }
    }
}

impl Settings {
    /// Resolve the chat API key. Priority: stored key > environment variable.
    pub fn resolve_credential(&self) -> Credential {
        let stored = self.ai_api_key.trim();
        if !stored.is_empty() {
            return Credential::Configured(stored.to_string());
        }

        match std::env::var(&self.ai_api_key_env) {
            Ok(key) if !key.trim().is_empty() => Credential::Configured(key.trim().to_string()),
            _ => Credential::Unconfigured,
        }
    }

    /// Resolve the model for one request: override > configured > default.
    pub fn resolve_model(&self, model_override: Option<&str>) -> String {
        model_override
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .or_else(|| Some(self.ai_model.trim()).filter(|m| !m.is_empty()))
            .unwrap_or(DEFAULT_AI_MODEL)
            .to_string()
    }

    /// Stored API key in display form (`****` plus the last four characters).
    pub fn masked_api_key(&self) -> Option<String> {
        if self.ai_api_key.is_empty() {
            None
        } else {
            Some(mask_key(&self.ai_api_key))
        }
    }

    /// Telemetry poll period.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    /// Bound applied to each chat request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Check value ranges and provider name.
    pub fn validate(&self) -> Result<()> {
        if !REFRESH_INTERVAL_RANGE.contains(&self.refresh_interval_ms) {
            return Err(ForgeError::Config(format!(
                "refreshInterval must be between {} and {} ms, got {}",
                REFRESH_INTERVAL_RANGE.start(),
                REFRESH_INTERVAL_RANGE.end(),
                self.refresh_interval_ms
            )));
        }

        if !REQUEST_TIMEOUT_RANGE.contains(&self.request_timeout_secs) {
            return Err(ForgeError::Config(format!(
                "requestTimeoutSecs must be between {} and {} s, got {}",
                REQUEST_TIMEOUT_RANGE.start(),
                REQUEST_TIMEOUT_RANGE.end(),
                self.request_timeout_secs
            )));
        }

        if !SUPPORTED_PROVIDERS.contains(&self.ai_provider.as_str()) {
            return Err(ForgeError::Config(format!(
                "aiProvider must be one of {}, got '{}'",
                SUPPORTED_PROVIDERS.join(", "),
                self.ai_provider
            )));
        }

        Ok(())
    }

    /// Copy with the poll period and request timeout pulled into their
    /// accepted ranges. Other fields are kept as they are.
    pub fn clamped(mut self) -> Self {
        self.refresh_interval_ms = self
            .refresh_interval_ms
            .clamp(*REFRESH_INTERVAL_RANGE.start(), *REFRESH_INTERVAL_RANGE.end());
        self.request_timeout_secs = self
            .request_timeout_secs
            .clamp(*REQUEST_TIMEOUT_RANGE.start(), *REQUEST_TIMEOUT_RANGE.end());
        self
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 4 {
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_prefers_stored_key() {
        let settings = Settings {
            ai_api_key: "sk-stored".to_string(),
            ai_api_key_env: "FORGE_TEST_KEY_STORED_PRIORITY".to_string(),
            ..Settings::default()
        };
        std::env::set_var("FORGE_TEST_KEY_STORED_PRIORITY", "sk-env");
        assert_eq!(
            settings.resolve_credential(),
            Credential::Configured("sk-stored".to_string())
        );
        std::env::remove_var("FORGE_TEST_KEY_STORED_PRIORITY");
    }

    #[test]
    fn test_resolve_credential_env_fallback() {
        let settings = Settings {
            ai_api_key_env: "FORGE_TEST_KEY_ENV_FALLBACK".to_string(),
            ..Settings::default()
        };
        std::env::set_var("FORGE_TEST_KEY_ENV_FALLBACK", "sk-env");
        assert_eq!(
            settings.resolve_credential(),
            Credential::Configured("sk-env".to_string())
        );
        std::env::remove_var("FORGE_TEST_KEY_ENV_FALLBACK");
    }

    #[test]
    fn test_resolve_credential_unconfigured() {
        let settings = Settings {
            ai_api_key: "   ".to_string(),
            ai_api_key_env: "FORGE_TEST_KEY_NEVER_SET".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.resolve_credential(), Credential::Unconfigured);
        assert!(!settings.resolve_credential().is_configured());
    }

    #[test]
    fn test_credential_debug_is_masked() {
        let debug = format!("{:?}", Credential::Configured("sk-secret-1234".to_string()));
        assert_eq!(debug, "Configured(****1234)");
    }

    #[test]
    fn test_resolve_model() {
        let settings = Settings {
            ai_model: "gpt-4o".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.resolve_model(Some("o1-mini")), "o1-mini");
        assert_eq!(settings.resolve_model(Some("  ")), "gpt-4o");
        assert_eq!(settings.resolve_model(None), "gpt-4o");

        let unset = Settings {
            ai_model: String::new(),
            ..Settings::default()
        };
        assert_eq!(unset.resolve_model(None), DEFAULT_AI_MODEL);
    }

    #[test]
    fn test_masked_api_key() {
        let mut settings = Settings::default();
        assert_eq!(settings.masked_api_key(), None);

        settings.ai_api_key = "sk-abcdef123456".to_string();
        assert_eq!(settings.masked_api_key(), Some("****3456".to_string()));

        settings.ai_api_key = "abcd".to_string();
        assert_eq!(settings.masked_api_key(), Some("****".to_string()));
    }

    #[test]
    fn test_validate_defaults_ok() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let fast = Settings {
            refresh_interval_ms: 100,
            ..Settings::default()
        };
        assert!(fast.validate().is_err());

        let no_timeout = Settings {
            request_timeout_secs: 0,
            ..Settings::default()
        };
        assert!(no_timeout.validate().is_err());

        let unknown = Settings {
            ai_provider: "gemini".to_string(),
            ..Settings::default()
        };
        let err = unknown.validate().unwrap_err();
        assert!(err.to_string().contains("gemini"));
    }

    #[test]
    fn test_durations() {
        let settings = Settings::default();
        assert_eq!(settings.refresh_interval(), Duration::from_millis(2000));
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Provider factory for creating chat providers from settings

use std::sync::Arc;

use crate::config::{Credential, Settings};
use crate::error::{ApiError, Result};
use crate::llm::provider::ChatProvider;
use crate::llm::providers::{OpenAiCompatibleProvider, SUPPORTED_PROVIDERS};

/// Factory for creating chat providers
pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider named by `settings.ai_provider`
    ///
    /// # Arguments
    /// * `settings` - Snapshot carrying provider name, base URL, and timeout
    /// * `credential` - Resolved API credential; `Unconfigured` is an error
    pub fn create(settings: &Settings, credential: &Credential) -> Result<Arc<dyn ChatProvider>> {
        let api_key = match credential {
            Credential::Configured(key) => key.clone(),
            Credential::Unconfigured => return Err(ApiError::MissingCredential.into()),
        };

        let provider = OpenAiCompatibleProvider::new(
            &settings.ai_provider,
            api_key,
            settings.request_timeout(),
        )?;

        let provider = match settings.ai_base_url.as_deref().map(str::trim) {
            Some(base_url) if !base_url.is_empty() => provider.with_base_url(base_url),
            _ => provider,
        };

        Ok(Arc::new(provider))
    }

    /// Check if the configured provider has a usable credential
    pub fn is_configured(settings: &Settings) -> bool {
        Self::is_supported(&settings.ai_provider) && settings.resolve_credential().is_configured()
    }

    pub fn is_supported(provider_name: &str) -> bool {
        SUPPORTED_PROVIDERS.contains(&provider_name)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForgeError;

    fn configured() -> Credential {
        Credential::Configured("sk-test".to_string())
    }

    #[test]
    fn test_create_openai() {
        let provider = ProviderFactory::create(&Settings::default(), &configured()).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_openrouter() {
        let settings = Settings {
            ai_provider: "openrouter".to_string(),
            ..Settings::default()
        };
        let provider = ProviderFactory::create(&settings, &configured()).unwrap();
        assert_eq!(provider.name(), "openrouter");
    }

    #[test]
    fn test_create_without_credential() {
        let result = ProviderFactory::create(&Settings::default(), &Credential::Unconfigured);
        assert!(matches!(
            result.err(),
            Some(ForgeError::Api(ApiError::MissingCredential))
        ));
    }

    #[test]
    fn test_create_unsupported_provider() {
        let settings = Settings {
            ai_provider: "anthropic".to_string(),
            ..Settings::default()
        };
        let result = ProviderFactory::create(&settings, &configured());
        assert!(matches!(
            result.err(),
            Some(ForgeError::Api(ApiError::UnsupportedProvider(_)))
        ));
    }

    #[test]
    fn test_is_configured() {
        let mut settings = Settings {
            ai_api_key_env: "FORGE_TEST_FACTORY_KEY_UNSET".to_string(),
            ..Settings::default()
        };
        assert!(!ProviderFactory::is_configured(&settings));

        settings.ai_api_key = "sk-test".to_string();
        assert!(ProviderFactory::is_configured(&settings));

        settings.ai_provider = "gemini".to_string();
        assert!(!ProviderFactory::is_configured(&settings));
    }

    #[test]
    fn test_supported_providers() {
        assert!(ProviderFactory::is_supported("openrouter"));
        assert!(!ProviderFactory::is_supported("ollama"));
    }
}

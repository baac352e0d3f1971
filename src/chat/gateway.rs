// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat gateway: one provider request per message, canned reply on failure.
//!
//! `send` never fails. Any problem on the way to a completion (no credential,
//! unknown provider, HTTP status, transport, timeout, undecodable payload)
//! turns into a canned reply with `is_real = false` and the error text
//! attached. There is no retry.

use std::sync::Arc;

use crate::config::{Credential, Settings, SettingsStore};
use crate::error::{ApiError, Result};
use crate::llm::{ChatProvider, ChatRequest, Message, ProviderFactory};
use crate::random::RandomSource;

use super::fallback::{pick_reply, FALLBACK_MODEL};
use super::presets::{find_preset, ChatPreset, PRESETS};
use super::session::ChatExchange;

pub const SYSTEM_PROMPT: &str = "You are an AI assistant specialized in GPU performance, NVIDIA technologies, and AI inference optimization.";

pub const MAX_TOKENS: u32 = 1024;
pub const TEMPERATURE: f32 = 0.7;

/// Reply text for a well-formed completion without content.
pub const NO_RESPONSE: &str = "No response";

enum ProviderSource {
    /// Build from each settings snapshot
    Settings,
    /// Always use this provider
    Fixed(Arc<dyn ChatProvider>),
}

pub struct ChatGateway {
    settings: Arc<dyn SettingsStore>,
    source: ProviderSource,
    random: Arc<dyn RandomSource>,
}

impl ChatGateway {
    pub fn new(settings: Arc<dyn SettingsStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            settings,
            source: ProviderSource::Settings,
            random,
        }
    }

    /// Bypass the provider factory. Credential resolution still applies.
    pub fn with_provider(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.source = ProviderSource::Fixed(provider);
        self
    }

    pub fn presets() -> &'static [ChatPreset] {
        PRESETS
    }

    /// Send `message`, returning the provider's reply or a canned one.
    pub async fn send(&self, message: &str, model_override: Option<&str>) -> ChatExchange {
        let settings = self.settings.snapshot();
        let model = settings.resolve_model(model_override);

        match self.request(&settings, message, &model).await {
            Ok(content) => {
                tracing::debug!(
                    target: "forge.chat",
                    provider = %settings.ai_provider,
                    model = %model,
                    has_content = content.is_some(),
                    "chat exchange completed"
                );
                ChatExchange {
                    message: message.to_string(),
                    reply: content.unwrap_or_else(|| NO_RESPONSE.to_string()),
                    model,
                    is_real: true,
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    target: "forge.chat",
                    provider = %settings.ai_provider,
                    model = %model,
                    error = %e,
                    "chat request failed, using canned reply"
                );
                ChatExchange {
                    message: message.to_string(),
                    reply: pick_reply(self.random.as_ref()).to_string(),
                    model: FALLBACK_MODEL.to_string(),
                    is_real: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Send the prompt of preset `preset_id` in the configured language.
    pub async fn send_preset(
        &self,
        preset_id: &str,
        model_override: Option<&str>,
    ) -> Result<ChatExchange> {
        let preset = find_preset(preset_id)?;
        let language = self.settings.snapshot().language;
        Ok(self.send(preset.prompt(&language), model_override).await)
    }

    async fn request(
        &self,
        settings: &Settings,
        message: &str,
        model: &str,
    ) -> Result<Option<String>> {
        let credential = settings.resolve_credential();
        if let Credential::Unconfigured = credential {
            return Err(ApiError::MissingCredential.into());
        }

        let provider = match &self.source {
            ProviderSource::Fixed(provider) => Arc::clone(provider),
            ProviderSource::Settings => ProviderFactory::create(settings, &credential)?,
        };

        let request = ChatRequest::new(model)
            .with_system(SYSTEM_PROMPT)
            .with_message(Message::user(message))
            .with_max_tokens(MAX_TOKENS)
            .with_temperature(TEMPERATURE);

        let completion = tokio::time::timeout(settings.request_timeout(), provider.complete(request))
            .await
            .map_err(|_| ApiError::Timeout)??;

        Ok(completion.content.filter(|text| !text.is_empty()))
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! OpenAI-compatible chat-completion provider
//!
//! Speaks the `/chat/completions` protocol shared by OpenAI and OpenRouter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ForgeError, Result};
use crate::llm::provider::{ChatCompletion, ChatProvider, ChatRequest};

use super::common::{error_message, parse_retry_after_seconds, server_error};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Retry-After fallback when a 429 carries no header
const DEFAULT_RATE_LIMIT_SECS: u32 = 60;

/// Default endpoint for a supported provider name.
pub fn default_endpoint(provider: &str) -> Option<&'static str> {
    match provider {
        "openai" => Some(OPENAI_API_URL),
        "openrouter" => Some(OPENROUTER_API_URL),
        _ => None,
    }
}

/// Provider for any OpenAI-style chat-completion endpoint
pub struct OpenAiCompatibleProvider {
    client: Client,
    name: String,
    api_key: String,
    base_url: String,
    site_name: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// Create a provider for `provider` ("openai" or "openrouter").
    pub fn new(provider: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = default_endpoint(provider)
            .ok_or_else(|| ApiError::UnsupportedProvider(provider.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            name: provider.to_string(),
            api_key: api_key.into(),
            base_url: base_url.to_string(),
            // OpenRouter attributes traffic by X-Title
            site_name: (provider == "openrouter").then(|| "Forge".to_string()),
        })
    }

    /// Point at a custom endpoint (proxies, gateways, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Build the request body
    fn build_request(&self, request: &ChatRequest) -> ApiRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ApiMessage {
                role: "system".to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| ApiMessage {
            role: m.role.as_str().to_string(),
            content: m.content.clone(),
        }));

        ApiRequest {
            model: request.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Parse an error response
    fn parse_error(
        &self,
        status: u16,
        retry_after: Option<u64>,
        body: &str,
        model: &str,
    ) -> ForgeError {
        match status {
            401 | 403 => ForgeError::Api(ApiError::AuthenticationFailed),
            429 => ForgeError::Api(ApiError::RateLimited(
                retry_after
                    .map(|s| s.min(u32::MAX as u64) as u32)
                    .unwrap_or(DEFAULT_RATE_LIMIT_SECS),
            )),
            404 => ForgeError::Api(ApiError::ModelNotFound(model.to_string())),
            _ => server_error(status, error_message(body)),
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion> {
        let body = self.build_request(&request);

        let mut req = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Content-Type", "application/json");

        if let Some(ref site_name) = self.site_name {
            req = req.header("X-Title", site_name);
        }

        let response = req
            .json(&body)
            .send()
            .await
            .map_err(ForgeError::from_transport)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let retry_after = parse_retry_after_seconds(response.headers());
            let body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status, retry_after, &body, &request.model));
        }

        let text = response.text().await.map_err(ForgeError::from_transport)?;
        let api_response: ApiResponse = serde_json::from_str(&text)
            .map_err(|e| ApiError::InvalidResponse(format!("undecodable completion: {}", e)))?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty());

        Ok(ChatCompletion {
            model: api_response.model.unwrap_or(request.model),
            content,
        })
    }
}

// OpenAI chat-completion wire types

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

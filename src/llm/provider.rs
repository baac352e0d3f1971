// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat provider trait and request/response types
//!
//! Defines the seam between the chat gateway and HTTP backends.

use async_trait::async_trait;

use crate::error::Result;
use crate::llm::message::Message;

/// Main trait for chat-completion providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "openrouter")
    fn name(&self) -> &str;

    /// Single non-streaming completion
    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion>;
}

/// Request for completion
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model to use
    pub model: String,

    /// System prompt, sent ahead of `messages`
    pub system: Option<String>,

    /// Messages in the conversation
    pub messages: Vec<Message>,

    /// Maximum tokens in response
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages: Vec::new(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Response from a completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCompletion {
    /// Model reported by the provider
    pub model: String,

    /// First choice's text; `None` when the payload carried no content
    pub content: Option<String>,
}

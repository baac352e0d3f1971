// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock chat provider for testing
//!
//! Scripted implementation of the ChatProvider trait for gateway tests that
//! must not make real API calls.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{ApiError, ForgeError, Result};
use crate::llm::provider::{ChatCompletion, ChatProvider, ChatRequest};

/// A scripted mock chat provider
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Configured responses
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Call counter
    call_count: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<ChatRequest>>>,
    /// Artificial latency per call
    delay: Option<Duration>,
}

/// A pre-configured outcome for one call
#[derive(Clone, Debug, PartialEq)]
pub enum MockResponse {
    /// Completion carrying this text
    Content(String),
    /// Well-formed completion with no content
    Empty,
    /// Provider failure
    Failure(MockFailure),
}

/// Failure kinds the mock can raise
#[derive(Clone, Debug, PartialEq)]
pub enum MockFailure {
    Authentication,
    RateLimited(u32),
    Server { status: u16, message: String },
    Network(String),
    Timeout,
    InvalidResponse(String),
}

impl MockFailure {
    fn to_error(&self) -> ForgeError {
        let api = match self {
            MockFailure::Authentication => ApiError::AuthenticationFailed,
            MockFailure::RateLimited(secs) => ApiError::RateLimited(*secs),
            MockFailure::Server { status, message } => ApiError::ServerError {
                status: *status,
                message: message.clone(),
            },
            MockFailure::Network(message) => ApiError::Network(message.clone()),
            MockFailure::Timeout => ApiError::Timeout,
            MockFailure::InvalidResponse(message) => ApiError::InvalidResponse(message.clone()),
        };
        ForgeError::Api(api)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider answering "Mock response"
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            responses: Arc::new(Mutex::new(vec![MockResponse::Content(
                "Mock response".to_string(),
            )])),
            call_count: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
            delay: None,
        }
    }

    /// Create a mock provider with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        let mut provider = Self::new();
        provider.name = name.into();
        provider
    }

    /// Set the text response
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.with_outcomes(vec![MockResponse::Content(text.into())])
    }

    /// Answer every call with a well-formed empty completion
    pub fn with_empty_response(self) -> Self {
        self.with_outcomes(vec![MockResponse::Empty])
    }

    /// Fail every call
    pub fn with_failure(self, failure: MockFailure) -> Self {
        self.with_outcomes(vec![MockResponse::Failure(failure)])
    }

    /// Queue multiple outcomes (returned in order, the last one repeats)
    pub fn with_outcomes(self, outcomes: Vec<MockResponse>) -> Self {
        {
            let mut responses = lock_recovering(&self.responses);
            responses.clear();
            responses.extend(outcomes);
        }
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the number of times complete() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        lock_recovering(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<ChatRequest> {
        lock_recovering(&self.recorded_requests).last().cloned()
    }

    /// Reset call count and recorded requests
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        lock_recovering(&self.recorded_requests).clear();
    }

    fn next_response(&self) -> MockResponse {
        let count = self.call_count.fetch_add(1, Ordering::SeqCst);
        let responses = lock_recovering(&self.responses);
        if responses.is_empty() {
            MockResponse::Empty
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatCompletion> {
        lock_recovering(&self.recorded_requests).push(request.clone());

        let response = self.next_response();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match response {
            MockResponse::Content(text) => Ok(ChatCompletion {
                model: request.model,
                content: Some(text),
            }),
            MockResponse::Empty => Ok(ChatCompletion {
                model: request.model,
                content: None,
            }),
            MockResponse::Failure(failure) => Err(failure.to_error()),
        }
    }
}

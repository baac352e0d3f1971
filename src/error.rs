// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for Forge
//!
//! Internal operations return these; the public service operations are total
//! and convert every error into a fallback value instead.

use thiserror::Error;

/// Main error type for Forge operations
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Chat provider errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Hardware probe failures
    #[error("Probe error: {0}")]
    Probe(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Chat provider error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// No credential is configured for the provider
    #[error("No API key configured")]
    MissingCredential,

    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Provider name not recognised
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid response from API
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,
}

/// Result type alias for Forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

impl ForgeError {
    /// Classify a transport error from reqwest into the API taxonomy.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForgeError::Api(ApiError::Timeout)
        } else if err.is_connect() {
            ForgeError::Api(ApiError::Network(err.to_string()))
        } else if err.is_decode() {
            ForgeError::Api(ApiError::InvalidResponse(err.to_string()))
        } else {
            ForgeError::Http(err)
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat provider implementations

pub(crate) mod common;
pub mod openai;

pub use openai::{default_endpoint, OpenAiCompatibleProvider};

/// Provider names accepted in `aiProvider`.
pub const SUPPORTED_PROVIDERS: &[&str] = &["openai", "openrouter"];

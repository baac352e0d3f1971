// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat provider layer for Forge
//!
//! Provides abstraction over OpenAI-compatible chat-completion backends.

pub mod factory;
pub mod message;
pub mod mock_provider;
pub mod provider;
pub mod providers;

pub use factory::ProviderFactory;
pub use message::*;
pub use provider::*;

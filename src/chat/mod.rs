// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat gateway and the types it hands back to callers.

pub mod fallback;
pub mod gateway;
pub mod presets;
pub mod session;

pub use gateway::ChatGateway;
pub use presets::{find_preset, ChatPreset, PRESETS};
pub use session::{ChatExchange, ChatSession, ChatTurn};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat exchange results and the caller-owned session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::llm::Role;

/// One outbound message paired with the reply it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExchange {
    pub message: String,
    pub reply: String,
    pub model: String,
    pub is_real: bool,
    /// Why the reply is canned, when it is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One entry of a conversation as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered turns of one conversation. The gateway never sees this; callers
/// that want history keep a session and record each exchange.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the user message and the reply of `exchange`.
    pub fn record(&mut self, exchange: &ChatExchange) {
        let now = Utc::now();
        self.turns.push(ChatTurn {
            role: Role::User,
            text: exchange.message.clone(),
            timestamp: now,
        });
        self.turns.push(ChatTurn {
            role: Role::Assistant,
            text: exchange.reply.clone(),
            timestamp: now,
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

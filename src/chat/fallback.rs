// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Canned replies used when the provider cannot answer.

use crate::random::RandomSource;

/// Model name reported on canned replies.
pub const FALLBACK_MODEL: &str = "offline-assistant";

pub const FALLBACK_REPLIES: [&str; 4] = [
    "I can help you optimize your GPU performance. What specific aspect would you like to improve?",
    "For TensorRT optimization, consider using FP16 precision for a good balance of speed and accuracy.",
    "Your RTX 5090 supports advanced features like DLSS 4 and hardware ray tracing.",
    "To reduce inference latency, try batching multiple requests together.",
];

/// Pick one canned reply.
pub fn pick_reply(random: &dyn RandomSource) -> &'static str {
    FALLBACK_REPLIES[random.index(FALLBACK_REPLIES.len())]
}

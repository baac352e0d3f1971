// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Forge - GPU telemetry, inference estimates, and an assistant chat service.
//!
//! This crate exposes the service used by the `forge` CLI (`src/main.rs`).
//!
//! Architecture highlights:
//! - `telemetry`: hardware probe with synthetic fallback, and the interval poller
//! - `inference`: latency and throughput estimator
//! - `chat`, `llm`: assistant gateway over OpenAI-compatible providers, with canned replies
//! - `config`: the JSON settings file and the read-only store the service consumes
//! - `service`: the facade the CLI calls into

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod inference;
pub mod llm;
pub mod random;
pub mod service;
pub mod telemetry;

pub use error::{ForgeError, Result};

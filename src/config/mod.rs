// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Configuration module for Forge
//!
//! Handles loading, saving, and reading user settings.

pub mod settings;
pub mod store;

pub use settings::*;
pub use store::*;

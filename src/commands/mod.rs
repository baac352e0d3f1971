// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Subcommand implementations for the forge CLI

pub mod chat;
pub mod inference;
pub mod settings;
pub mod telemetry;

use serde::Serialize;

use crate::error::Result;

/// Print `value` as pretty JSON on stdout
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

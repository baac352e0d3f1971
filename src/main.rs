// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Forge - GPU telemetry, inference estimates, and an AI assistant
//!
//! Entry point for the Forge CLI application.

use std::sync::Arc;

use clap::Parser;

use forge::cli::{Cli, Commands};
use forge::commands;
use forge::config::FileSettingsStore;
use forge::error::Result;
use forge::service::ForgeService;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on the service targets; `RUST_LOG` still takes precedence.
    if cli.verbose > 0 {
        for directive in [
            "forge.telemetry=debug",
            "forge.poller=debug",
            "forge.inference=debug",
            "forge.chat=debug",
            "forge.config=debug",
        ] {
            if let Ok(parsed) = directive.parse() {
                env_filter = env_filter.add_directive(parsed);
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = cli
        .config
        .clone()
        .map(FileSettingsStore::new)
        .unwrap_or_else(FileSettingsStore::default_location);
    let settings_path = store.path().clone();
    let service = ForgeService::with_defaults(Arc::new(store));
    let format = cli.format;

    match &cli.command {
        Commands::Metrics => commands::telemetry::execute_metrics(&service, format).await?,
        Commands::Watch(args) => commands::telemetry::execute_watch(&service, args, format).await?,
        Commands::Infer(args) => commands::inference::execute_infer(&service, args, format)?,
        Commands::Models => commands::inference::execute_models(&service, format)?,
        Commands::Bench(args) => commands::inference::execute_bench(&service, args, format)?,
        Commands::Chat(args) => commands::chat::execute(&service, args, format).await?,
        Commands::Presets => commands::chat::execute_presets(&service, format)?,
        Commands::Settings(args) => commands::settings::execute(args, &settings_path, format)?,
    }

    Ok(())
}

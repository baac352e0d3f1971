// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap
//!
//! Defines all command-line arguments and subcommands for Forge.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Forge - GPU telemetry, inference estimates, and an AI assistant
#[derive(Parser, Debug)]
#[command(name = "forge")]
#[command(version, about = "GPU telemetry, inference estimates, and an AI assistant")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file path (defaults to ~/.forge/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show one GPU telemetry sample
    #[command(alias = "gpu")]
    Metrics,

    /// Poll GPU telemetry continuously
    Watch(WatchArgs),

    /// Estimate inference latency and throughput
    Infer(InferArgs),

    /// List models known to the estimator
    Models,

    /// Run a simulated GPU benchmark
    Bench(BenchArgs),

    /// Chat with the assistant (interactive when no message is given)
    Chat(ChatArgs),

    /// List preset prompts
    Presets,

    /// Show or change settings
    #[command(alias = "config")]
    Settings(SettingsArgs),
}

/// Arguments for the watch subcommand
#[derive(clap::Args, Debug)]
pub struct WatchArgs {
    /// Poll period in milliseconds (defaults to refreshInterval)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Stop after this many samples
    #[arg(short = 'n', long)]
    pub count: Option<u64>,
}

/// Arguments for the infer subcommand
#[derive(clap::Args, Debug)]
pub struct InferArgs {
    /// Model name (e.g. "ResNet-50", "YOLOv8", "BERT", "GPT-2", "Stable Diffusion")
    #[arg(short, long, default_value = "ResNet-50")]
    pub model: String,

    /// Precision (FP32, FP16, INT8)
    #[arg(short, long, default_value = "FP16")]
    pub precision: String,

    /// Batch size
    #[arg(short, long, default_value_t = 1)]
    pub batch_size: u32,
}

/// Arguments for the bench subcommand
#[derive(clap::Args, Debug)]
pub struct BenchArgs {
    /// Benchmark type (cuda, tensorrt, vulkan, general)
    #[arg(default_value = "general")]
    pub kind: String,

    /// List benchmark types instead of running one
    #[arg(long, conflicts_with = "kind")]
    pub list: bool,
}

/// Arguments for the chat subcommand
#[derive(clap::Args, Debug, Default)]
pub struct ChatArgs {
    /// Message to send; omit for an interactive session
    pub message: Option<String>,

    /// Model override for this conversation
    #[arg(short, long)]
    pub model: Option<String>,

    /// Send a preset prompt (see `forge presets`)
    #[arg(long, conflicts_with = "message")]
    pub preset: Option<String>,
}

/// Arguments for the settings subcommand
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: Option<SettingsCommands>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings (default)
    Show,

    /// Set a settings value
    Set {
        /// Settings key as stored (e.g. "aiModel", "refreshInterval")
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the settings file path
    Path,
}

/// Output format for responses
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Text,

    /// JSON output
    Json,
}

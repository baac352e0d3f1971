// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Chat commands: one-shot, preset, and interactive session

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::{ChatExchange, ChatPreset, ChatSession};
use crate::cli::args::{ChatArgs, OutputFormat};
use crate::error::Result;
use crate::service::ForgeService;

use super::print_json;

/// Input lines understood by the interactive session
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Exit,
    Clear,
    History,
    Help,
    Preset(&'a str),
    Empty,
    Message(&'a str),
}

pub fn parse_repl_input(line: &str) -> ReplInput<'_> {
    let line = line.trim();
    match line {
        "" => ReplInput::Empty,
        "/exit" | "/quit" | "exit" | "quit" => ReplInput::Exit,
        "/clear" => ReplInput::Clear,
        "/history" => ReplInput::History,
        "/help" | "?" => ReplInput::Help,
        _ => match line.strip_prefix("/preset ") {
            Some(id) => ReplInput::Preset(id.trim()),
            None => ReplInput::Message(line),
        },
    }
}

/// Execute the chat command
pub async fn execute(service: &ForgeService, args: &ChatArgs, format: OutputFormat) -> Result<()> {
    let model = args.model.as_deref();

    if let Some(preset) = &args.preset {
        let exchange = service.send_preset(preset, model).await?;
        return print_exchange(&exchange, format);
    }

    if let Some(message) = &args.message {
        let exchange = service.send_chat(message, model).await;
        return print_exchange(&exchange, format);
    }

    run_session(service, model).await
}

/// Execute the presets command
pub fn execute_presets(service: &ForgeService, format: OutputFormat) -> Result<()> {
    let presets = service.chat_presets();

    if format == OutputFormat::Json {
        return print_json(&presets);
    }

    println!("{}", render_presets(presets));
    Ok(())
}

async fn run_session(service: &ForgeService, model: Option<&str>) -> Result<()> {
    let settings = service.settings();
    println!(
        "Forge assistant ({} / {}). Type /help for commands, /exit to leave.",
        settings.ai_provider,
        settings.resolve_model(model)
    );
    if !settings.resolve_credential().is_configured() {
        println!(
            "No API key configured; replies are canned. Set one with `forge settings set aiApiKey <key>` or ${}.",
            settings.ai_api_key_env
        );
    }

    let mut session = ChatSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let exchange = match parse_repl_input(&line) {
            ReplInput::Exit => break,
            ReplInput::Empty => continue,
            ReplInput::Clear => {
                session.clear();
                println!("History cleared.");
                continue;
            }
            ReplInput::History => {
                for turn in session.turns() {
                    println!("[{}] {}", turn.role.as_str(), turn.text);
                }
                continue;
            }
            ReplInput::Help => {
                println!("/preset <id>  send a preset prompt\n/history      show this conversation\n/clear        forget this conversation\n/exit         leave");
                println!("{}", render_presets(service.chat_presets()));
                continue;
            }
            ReplInput::Preset(id) => match service.send_preset(id, model).await {
                Ok(exchange) => exchange,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            ReplInput::Message(text) => service.send_chat(text, model).await,
        };

        println!("\n{}", render_exchange(&exchange));
        session.record(&exchange);
    }

    Ok(())
}

fn print_exchange(exchange: &ChatExchange, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(exchange);
    }
    println!("{}", render_exchange(exchange));
    Ok(())
}

pub fn render_exchange(exchange: &ChatExchange) -> String {
    let mut out = format!("[{}] {}", exchange.model, exchange.reply);
    if let Some(error) = &exchange.error {
        out.push_str(&format!("\n(offline reply: {})", error));
    }
    out
}

pub fn render_presets(presets: &[ChatPreset]) -> String {
    let mut out = String::from("\n=== Presets ===\n");
    for preset in presets {
        out.push_str(&format!(
            "\n  {:<20} {} / {}",
            preset.id, preset.label_en, preset.label
        ));
    }
    out
}

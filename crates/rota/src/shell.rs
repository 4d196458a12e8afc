// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rota shell` command implementation.
//!
//! Launches an interactive console session standing in for the chat
//! transport: typed lines become engine events, outbound messages print
//! to stdout. Input mapping:
//!
//! - `/start` (or any `/command`) -> a command event
//! - `!tag` -> a button press with that tag
//! - anything else -> a free-text message
//!
//! The session runs against the real store, scheduler, and engine, so a
//! shell conversation survives restarts exactly like a production one.

use std::sync::Arc;

use colored::Colorize;
use rota_config::model::RotaConfig;
use rota_core::types::{Event, UserId};
use rota_core::{Messenger, RotaError};
use rota_engine::{EngineSettings, SessionEngine};
use rota_lifecycle::{LifecycleScheduler, LifecycleSettings};
use rota_storage::Database;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::console::ConsoleMessenger;

/// Runs the `rota shell` interactive session as the given chat identity.
pub async fn run_shell(config: RotaConfig, user: String) -> Result<(), RotaError> {
    let db = Database::from_config(&config.storage).await?;
    let messenger: Arc<dyn Messenger> = Arc::new(ConsoleMessenger);

    let scheduler = Arc::new(LifecycleScheduler::new(
        db.clone(),
        messenger.clone(),
        LifecycleSettings::from_config(&config),
    ));
    scheduler.reconcile_on_startup().await?;

    let engine = SessionEngine::new(
        db.clone(),
        messenger,
        scheduler.clone(),
        EngineSettings::from_config(&config),
    );
    let user_id = UserId(user);

    let mut rl = DefaultEditor::new()
        .map_err(|e| RotaError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "rota shell".bold().green());
    println!(
        "Acting as user {}. Type {} to begin, {} to press a button, {} to leave.\n",
        user_id.to_string().bold(),
        "/start".yellow(),
        "!<tag>".yellow(),
        "/quit".yellow()
    );

    let prompt = format!("{}> ", "rota".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "/quit" || trimmed == "/exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let event = parse_line(trimmed);
                if let Err(e) = engine.dispatch(&user_id, event).await {
                    warn!(error = %e, "dispatch failed");
                    eprintln!("{} {e}", "error:".red());
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                return Err(RotaError::Internal(format!("readline error: {e}")));
            }
        }
    }

    scheduler.shutdown();
    db.close().await?;
    Ok(())
}

/// Map one console line to an engine event.
fn parse_line(line: &str) -> Event {
    if let Some(command) = line.strip_prefix('/') {
        Event::Command(command.to_string())
    } else if let Some(tag) = line.strip_prefix('!') {
        Event::Button(tag.to_string())
    } else {
        Event::Text(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_lines_become_commands() {
        assert_eq!(parse_line("/start"), Event::Command("start".into()));
    }

    #[test]
    fn bang_lines_become_button_presses() {
        assert_eq!(parse_line("!back"), Event::Button("back".into()));
        assert_eq!(parse_line("!42"), Event::Button("42".into()));
    }

    #[test]
    fn plain_lines_become_text() {
        assert_eq!(parse_line("Ana"), Event::Text("Ana".into()));
    }
}

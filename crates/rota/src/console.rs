// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console implementation of the outbound messaging seam.
//!
//! Stands in for a real chat transport during local runs: every outbound
//! message is printed to stdout with its recipient and button tags, so
//! `rota shell` and `rota serve` are fully observable without any
//! third-party service.

use async_trait::async_trait;
use colored::Colorize;

use rota_core::types::{Outbound, UserId};
use rota_core::{Messenger, RotaError};

/// Prints outbound messages to stdout.
pub struct ConsoleMessenger;

#[async_trait]
impl Messenger for ConsoleMessenger {
    async fn send(&self, user: &UserId, message: Outbound) -> Result<(), RotaError> {
        println!("{} {}", format!("[to {user}]").dimmed(), message.text);
        for row in &message.keyboard {
            let rendered: Vec<String> = row
                .iter()
                .map(|b| format!("[{} {}]", b.label, format!("!{}", b.tag).yellow()))
                .collect();
            println!("  {}", rendered.join(" "));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rota_core::types::Button;

    #[tokio::test]
    async fn send_accepts_any_message() {
        let messenger = ConsoleMessenger;
        let message = Outbound::text("hello").with_row(vec![Button::new("Back", "back")]);
        messenger
            .send(&UserId::from("local"), message)
            .await
            .unwrap();
    }
}

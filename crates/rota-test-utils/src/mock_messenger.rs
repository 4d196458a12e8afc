// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock messenger for deterministic testing.
//!
//! `MockMessenger` implements `Messenger` by capturing every outbound
//! message for assertion in tests.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rota_core::messenger::Messenger;
use rota_core::types::{Outbound, UserId};
use rota_core::RotaError;

/// A mock messaging transport for testing.
///
/// Messages passed to `send()` are captured and retrievable via
/// `sent_messages()` / `sent_to()`.
pub struct MockMessenger {
    sent: Arc<Mutex<Vec<(UserId, Outbound)>>>,
}

impl MockMessenger {
    /// Create a new mock messenger with an empty capture buffer.
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// All captured (recipient, message) pairs in send order.
    pub async fn sent_messages(&self) -> Vec<(UserId, Outbound)> {
        self.sent.lock().await.clone()
    }

    /// Captured messages addressed to one user, in send order.
    pub async fn sent_to(&self, user: &UserId) -> Vec<Outbound> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(u, _)| u == user)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// The count of captured messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// The most recent message addressed to one user.
    pub async fn last_to(&self, user: &UserId) -> Option<Outbound> {
        self.sent_to(user).await.pop()
    }

    /// Clear all captured messages.
    pub async fn clear(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Messenger for MockMessenger {
    async fn send(&self, user: &UserId, message: Outbound) -> Result<(), RotaError> {
        self.sent.lock().await.push((user.clone(), message));
        Ok(())
    }
}

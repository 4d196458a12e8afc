// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The outbound messaging seam.
//!
//! The chat transport is an external collaborator: the core hands it
//! fully-rendered [`Outbound`] messages and requires nothing beyond
//! "accepted for sending" (at-least-once delivery).

use async_trait::async_trait;

use crate::error::RotaError;
use crate::types::{Outbound, UserId};

/// Fire-and-forget outbound message delivery.
///
/// Implementations must be cheap to share (`Arc<dyn Messenger>`); both the
/// session engine and the lifecycle scheduler send through the same
/// instance.
#[async_trait]
pub trait Messenger: Send + Sync + 'static {
    /// Queues a message for delivery to a single user.
    async fn send(&self, user: &UserId, message: Outbound) -> Result<(), RotaError>;

    /// Sends the same message to every user in the slice, logging and
    /// continuing on individual failures. Broadcasts are at-least-once;
    /// a partial failure never aborts the remaining recipients.
    async fn broadcast(&self, users: &[UserId], message: Outbound) -> Result<(), RotaError> {
        for user in users {
            if let Err(e) = self.send(user, message.clone()).await {
                tracing::warn!(user = %user, error = %e, "broadcast send failed");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Fails on one specific recipient, records the rest.
    struct FlakyMessenger {
        delivered: Mutex<Vec<String>>,
        failing: String,
    }

    #[async_trait]
    impl Messenger for FlakyMessenger {
        async fn send(&self, user: &UserId, _message: Outbound) -> Result<(), RotaError> {
            if user.0 == self.failing {
                return Err(RotaError::Channel {
                    message: "recipient unreachable".into(),
                    source: None,
                });
            }
            self.delivered.lock().unwrap().push(user.0.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn broadcast_continues_past_individual_failures() {
        let messenger = FlakyMessenger {
            delivered: Mutex::new(Vec::new()),
            failing: "b".to_string(),
        };
        let users = vec![UserId::from("a"), UserId::from("b"), UserId::from("c")];

        messenger
            .broadcast(&users, Outbound::text("hello"))
            .await
            .unwrap();

        let delivered = messenger.delivered.lock().unwrap().clone();
        assert_eq!(delivered, vec!["a".to_string(), "c".to_string()]);
    }
}

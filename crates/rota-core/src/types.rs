// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Rota workspace.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// External chat identity of a user.
///
/// A single consistent string type end-to-end: the same value keys
/// `users.id`, `attendants.user_id`, and `conversation_states.user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        UserId(s.to_string())
    }
}

/// Lifecycle status of a queue. Transitions are monotonic:
/// planned -> active -> archived, never backward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QueueStatus {
    Planned,
    Active,
    Archived,
}

/// The kind of a pending lifecycle timer. Variant order is firing order
/// when several timers of one queue are due at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum TimerKind {
    Notify,
    Open,
    Close,
}

/// An inbound conversation event delivered by the chat transport.
///
/// Per-user ordering is the transport's responsibility; the engine
/// processes events in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A slash command, without the leading slash (`/start` -> `start`).
    Command(String),
    /// A free-text message.
    Text(String),
    /// An inline button press carrying its opaque tag.
    Button(String),
}

/// An inline button: a label shown to the user and the opaque tag the
/// transport echoes back as [`Event::Button`] when pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub tag: String,
}

impl Button {
    pub fn new(label: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            tag: tag.into(),
        }
    }
}

/// An outbound message: text plus optional rows of inline buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub text: String,
    pub keyboard: Vec<Vec<Button>>,
}

// --- Entity records ---
//
// Canonical persisted records, defined here for use across crate
// boundaries and re-exported by rota-storage.

/// A signup queue with a scheduled open/close window.
///
/// Mutated only by lifecycle transition handlers: `status` moves
/// planned -> active -> archived, `notification_sent` flips false -> true
/// exactly once. Never deleted; archived is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queue {
    pub id: i64,
    /// Unique case-insensitively.
    pub name: String,
    pub start_dt: DateTime<Utc>,
    pub end_dt: DateTime<Utc>,
    pub notify_dt: DateTime<Utc>,
    pub status: QueueStatus,
    pub notification_sent: bool,
}

/// A registered user. Immutable after creation; `is_admin` is set once
/// from configuration at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub is_admin: bool,
}

/// A user's join record for a queue, carrying FIFO position.
///
/// `position` is 1-based, assigned as attendant-count + 1 at join time;
/// monotonic per queue, never reused, never reordered. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendant {
    pub id: i64,
    pub user_id: UserId,
    pub queue_id: i64,
    pub position: i64,
}

/// A user's persisted conversation state.
///
/// Exactly one record per in-flight conversation; absence means the
/// implicit initial menu state. `state` round-trips through the engine's
/// closed state enumeration; `data` is serialized JSON form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub user_id: UserId,
    pub state: String,
    pub data: String,
    pub updated_at: DateTime<Utc>,
}

impl Outbound {
    /// A plain text message without buttons.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            keyboard: Vec::new(),
        }
    }

    /// Appends one row of buttons.
    pub fn with_row(mut self, row: Vec<Button>) -> Self {
        self.keyboard.push(row);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn queue_status_round_trips_through_strings() {
        for status in [
            QueueStatus::Planned,
            QueueStatus::Active,
            QueueStatus::Archived,
        ] {
            let s = status.to_string();
            assert_eq!(QueueStatus::from_str(&s).unwrap(), status);
        }
        assert_eq!(QueueStatus::Planned.to_string(), "planned");
    }

    #[test]
    fn timer_kind_orders_notify_open_close() {
        assert!(TimerKind::Notify < TimerKind::Open);
        assert!(TimerKind::Open < TimerKind::Close);
    }

    #[test]
    fn outbound_builder_attaches_rows() {
        let out = Outbound::text("pick one")
            .with_row(vec![Button::new("Back", "back")])
            .with_row(vec![Button::new("Next", "next"), Button::new("Prev", "prev")]);
        assert_eq!(out.keyboard.len(), 2);
        assert_eq!(out.keyboard[0][0].tag, "back");
        assert_eq!(out.keyboard[1][1].label, "Prev");
    }

    #[test]
    fn user_id_displays_inner_value() {
        let id = UserId::from("42");
        assert_eq!(id.to_string(), "42");
    }
}

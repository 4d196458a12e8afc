// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The closed conversation state enumeration and the persisted form data.
//!
//! States persist as their snake_case names; form data persists as JSON.
//! A record that fails to parse (schema drift, manual edits) degrades to
//! the initial menu state instead of wedging the conversation.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rota_core::types::QueueStatus;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::warn;

/// Every conversation state a user can be in.
///
/// The dispatch table is an exhaustive match over this enumeration, so an
/// unhandled (state, event) pair is impossible to add silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// The implicit initial state; also where completed flows land.
    Menu,
    // Registration flow.
    RegName,
    RegSurname,
    // Admin queue-creation flow.
    QueueName,
    QueueStart,
    QueueEnd,
    QueueNotify,
    // Browsing flow.
    QueueList,
    QueueDetail,
}

/// In-progress registration fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// In-progress queue-creation fields. Accepted values are kept so that
/// back-navigation re-renders without re-validating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_dt: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_dt: Option<DateTime<Utc>>,
}

/// Browsing cursor: which status list the user is in, the current page,
/// and the queue open in the detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseState {
    pub status: QueueStatus,
    pub page: usize,
    pub pages_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_id: Option<i64>,
}

/// The opaque per-user form data persisted alongside the state label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg: Option<RegDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<QueueDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browse: Option<BrowseState>,
}

impl SessionData {
    /// Serialize for persistence.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            warn!(error = %e, "session data failed to serialize; persisting empty data");
            "{}".to_string()
        })
    }

    /// Deserialize a persisted payload, degrading to defaults on parse
    /// failure.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!(error = %e, "session data failed to parse; resetting");
            Self::default()
        })
    }
}

/// Parse a persisted state label, degrading to the menu on drift.
pub fn parse_state(label: &str) -> ChatState {
    ChatState::from_str(label).unwrap_or_else(|_| {
        warn!(label, "unknown persisted state label; resetting to menu");
        ChatState::Menu
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_labels_round_trip() {
        for state in [
            ChatState::Menu,
            ChatState::RegName,
            ChatState::RegSurname,
            ChatState::QueueName,
            ChatState::QueueStart,
            ChatState::QueueEnd,
            ChatState::QueueNotify,
            ChatState::QueueList,
            ChatState::QueueDetail,
        ] {
            assert_eq!(parse_state(&state.to_string()), state);
        }
        assert_eq!(ChatState::RegName.to_string(), "reg_name");
        assert_eq!(ChatState::QueueList.to_string(), "queue_list");
    }

    #[test]
    fn unknown_label_degrades_to_menu() {
        assert_eq!(parse_state("ask_name_v2"), ChatState::Menu);
        assert_eq!(parse_state(""), ChatState::Menu);
    }

    #[test]
    fn session_data_round_trips_through_json() {
        let data = SessionData {
            reg: Some(RegDraft {
                name: Some("Ana".into()),
            }),
            draft: Some(QueueDraft {
                name: Some("algebra".into()),
                start_dt: Some("2026-09-01T09:00:00Z".parse().unwrap()),
                end_dt: None,
            }),
            browse: Some(BrowseState {
                status: QueueStatus::Active,
                page: 2,
                pages_count: 3,
                queue_id: Some(7),
            }),
        };
        let restored = SessionData::from_json(&data.to_json());
        assert_eq!(restored, data);
    }

    #[test]
    fn corrupted_payload_degrades_to_default() {
        assert_eq!(SessionData::from_json("not json"), SessionData::default());
        assert_eq!(SessionData::from_json(""), SessionData::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SessionData::from_json("{}"), SessionData::default());
    }
}

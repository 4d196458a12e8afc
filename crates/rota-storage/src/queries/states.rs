// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state persistence.
//!
//! One row per user; saving overwrites the previous state. The engine
//! persists the new state *before* sending any reply, so a crash between
//! the two leaves the conversation resumable at the committed state.

use chrono::Utc;
use rota_core::RotaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{ConversationState, UserId};

/// Load the persisted conversation state for a user, if any.
pub async fn load(db: &Database, user_id: &UserId) -> Result<Option<ConversationState>, RotaError> {
    let user_id = user_id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, state, data, updated_at
                 FROM conversation_states WHERE user_id = ?1",
            )?;
            let result = stmt.query_row(params![user_id], |row| {
                Ok(ConversationState {
                    user_id: UserId(row.get(0)?),
                    state: row.get(1)?,
                    data: row.get(2)?,
                    updated_at: row.get(3)?,
                })
            });
            match result {
                Ok(state) => Ok(Some(state)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Persist (insert or overwrite) a user's conversation state.
pub async fn save(
    db: &Database,
    user_id: &UserId,
    state: &str,
    data: &str,
) -> Result<(), RotaError> {
    let user_id = user_id.0.clone();
    let state = state.to_string();
    let data = data.to_string();
    let now = Utc::now();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_states (user_id, state, data, updated_at)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT (user_id) DO UPDATE SET
                     state = excluded.state,
                     data = excluded.data,
                     updated_at = excluded.updated_at",
                params![user_id, state, data, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Remove a user's conversation state (flow completed or abandoned).
pub async fn clear(db: &Database, user_id: &UserId) -> Result<(), RotaError> {
    let user_id = user_id.0.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "DELETE FROM conversation_states WHERE user_id = ?1",
                params![user_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Queue CRUD and guarded lifecycle transitions.
//!
//! Status changes go through single guarded UPDATE statements
//! (`... WHERE status = ?`), so a transition that already happened is a
//! no-op reported to the caller, never an error. The lifecycle scheduler
//! relies on this for idempotent re-firing after a restart.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rota_core::RotaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Queue, QueueStatus};

/// Fields for a queue about to be created.
#[derive(Debug, Clone)]
pub struct NewQueue {
    pub name: String,
    pub start_dt: DateTime<Utc>,
    pub end_dt: DateTime<Utc>,
    pub notify_dt: DateTime<Utc>,
}

fn map_queue(row: &rusqlite::Row<'_>) -> Result<Queue, rusqlite::Error> {
    let status: String = row.get(5)?;
    let status = QueueStatus::from_str(&status).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Queue {
        id: row.get(0)?,
        name: row.get(1)?,
        start_dt: row.get(2)?,
        end_dt: row.get(3)?,
        notify_dt: row.get(4)?,
        status,
        notification_sent: row.get(6)?,
    })
}

const QUEUE_COLUMNS: &str = "id, name, start_dt, end_dt, notify_dt, status, notification_sent";

/// Create a queue with status `planned` and `notification_sent = false`.
/// Returns the stored record with its assigned id.
pub async fn create(db: &Database, new: NewQueue) -> Result<Queue, RotaError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO queues (name, start_dt, end_dt, notify_dt) VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.start_dt, new.end_dt, new.notify_dt],
            )?;
            let id = conn.last_insert_rowid();
            Ok(Queue {
                id,
                name: new.name,
                start_dt: new.start_dt,
                end_dt: new.end_dt,
                notify_dt: new.notify_dt,
                status: QueueStatus::Planned,
                notification_sent: false,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a queue by id.
pub async fn get(db: &Database, id: i64) -> Result<Option<Queue>, RotaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {QUEUE_COLUMNS} FROM queues WHERE id = ?1"))?;
            let result = stmt.query_row(params![id], map_queue);
            match result {
                Ok(queue) => Ok(Some(queue)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// True if a queue with this name exists, compared case-insensitively.
pub async fn name_exists(db: &Database, name: &str) -> Result<bool, RotaError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM queues WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List queues with the given status, oldest first.
pub async fn list_by_status(db: &Database, status: QueueStatus) -> Result<Vec<Queue>, RotaError> {
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QUEUE_COLUMNS} FROM queues WHERE status = ?1 ORDER BY id"
            ))?;
            let rows = stmt.query_map(params![status], map_queue)?;
            let mut queues = Vec::new();
            for row in rows {
                queues.push(row?);
            }
            Ok(queues)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// List every queue that is not yet archived, for startup reconciliation.
pub async fn list_unarchived(db: &Database) -> Result<Vec<Queue>, RotaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {QUEUE_COLUMNS} FROM queues WHERE status != 'archived' ORDER BY id"
            ))?;
            let rows = stmt.query_map([], map_queue)?;
            let mut queues = Vec::new();
            for row in rows {
                queues.push(row?);
            }
            Ok(queues)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Distinct statuses that currently have at least one queue, for the menu.
pub async fn statuses_present(db: &Database) -> Result<Vec<QueueStatus>, RotaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT status FROM queues")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            let mut statuses = Vec::new();
            for row in rows {
                let raw = row?;
                let status = QueueStatus::from_str(&raw).map_err(|e| {
                    Box::new(e) as Box<dyn std::error::Error + Send + Sync>
                })?;
                statuses.push(status);
            }
            statuses.sort_by_key(|s| match s {
                QueueStatus::Active => 0,
                QueueStatus::Planned => 1,
                QueueStatus::Archived => 2,
            });
            Ok(statuses)
        })
        .await
        .map_err(crate::database::map_tr_box_err)
}

/// Guarded monotonic status transition.
///
/// Returns `true` if the row was transitioned, `false` if the queue was not
/// in `from` status anymore (or does not exist) -- the idempotent no-op case.
pub async fn advance_status(
    db: &Database,
    id: i64,
    from: QueueStatus,
    to: QueueStatus,
) -> Result<bool, RotaError> {
    let from = from.to_string();
    let to = to.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE queues SET status = ?1 WHERE id = ?2 AND status = ?3",
                params![to, id, from],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Guarded one-shot notification flag flip.
///
/// Returns `true` if this call flipped the flag, `false` if it was already
/// set (or the queue does not exist).
pub async fn mark_notified(db: &Database, id: i64) -> Result<bool, RotaError> {
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE queues SET notification_sent = 1
                 WHERE id = ?1 AND notification_sent = 0",
                params![id],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

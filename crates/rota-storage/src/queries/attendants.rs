// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Attendant (join record) operations.
//!
//! `join` runs its whole read-guard + position assignment + insert inside
//! one transaction on the single writer thread, so a join either fully
//! completes against an `active` queue or is reported not-open -- it can
//! never interleave with a concurrent Close into a torn state.

use rota_core::RotaError;
use rusqlite::params;

use crate::database::Database;
use crate::models::{Attendant, User, UserId};

/// Result of a join attempt. All variants are normal control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The user was appended at this 1-based position.
    Joined(i64),
    /// The (user, queue) pair already exists; nothing changed.
    AlreadyJoined,
    /// The queue is not in `active` status.
    NotOpen,
    /// The queue vanished between steps.
    QueueMissing,
}

/// Join a queue, assigning the next FIFO position.
pub async fn join(db: &Database, queue_id: i64, user_id: &UserId) -> Result<JoinOutcome, RotaError> {
    let user_id = user_id.0.clone();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let status = {
                let result = tx.query_row(
                    "SELECT status FROM queues WHERE id = ?1",
                    params![queue_id],
                    |row| row.get::<_, String>(0),
                );
                match result {
                    Ok(status) => status,
                    Err(rusqlite::Error::QueryReturnedNoRows) => {
                        tx.commit()?;
                        return Ok(JoinOutcome::QueueMissing);
                    }
                    Err(e) => return Err(e.into()),
                }
            };

            if status != "active" {
                tx.commit()?;
                return Ok(JoinOutcome::NotOpen);
            }

            let already: i64 = tx.query_row(
                "SELECT COUNT(*) FROM attendants WHERE queue_id = ?1 AND user_id = ?2",
                params![queue_id, user_id],
                |row| row.get(0),
            )?;
            if already > 0 {
                tx.commit()?;
                return Ok(JoinOutcome::AlreadyJoined);
            }

            // Positions are 1..=N with no gaps: count + 1 under the same
            // transaction that inserts.
            let position: i64 = tx.query_row(
                "SELECT COUNT(*) + 1 FROM attendants WHERE queue_id = ?1",
                params![queue_id],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT INTO attendants (user_id, queue_id, position) VALUES (?1, ?2, ?3)",
                params![user_id, queue_id, position],
            )?;
            tx.commit()?;

            Ok(JoinOutcome::Joined(position))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The queue's roster in position order, with each attendant's user record.
pub async fn roster(db: &Database, queue_id: i64) -> Result<Vec<(Attendant, User)>, RotaError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT a.id, a.user_id, a.queue_id, a.position,
                        u.id, u.name, u.surname, u.is_admin
                 FROM attendants a
                 JOIN users u ON u.id = a.user_id
                 WHERE a.queue_id = ?1
                 ORDER BY a.position",
            )?;
            let rows = stmt.query_map(params![queue_id], |row| {
                Ok((
                    Attendant {
                        id: row.get(0)?,
                        user_id: UserId(row.get(1)?),
                        queue_id: row.get(2)?,
                        position: row.get(3)?,
                    },
                    User {
                        id: UserId(row.get(4)?),
                        name: row.get(5)?,
                        surname: row.get(6)?,
                        is_admin: row.get(7)?,
                    },
                ))
            })?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// True if the user already joined the queue.
pub async fn is_joined(db: &Database, queue_id: i64, user_id: &UserId) -> Result<bool, RotaError> {
    let user_id = user_id.0.clone();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM attendants WHERE queue_id = ?1 AND user_id = ?2",
                params![queue_id, user_id],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

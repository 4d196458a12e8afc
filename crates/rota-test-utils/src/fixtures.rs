// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared database fixtures and record builders.

use chrono::{DateTime, TimeDelta, Utc};
use tempfile::TempDir;

use rota_core::types::{QueueStatus, User, UserId};
use rota_storage::queries::{queues, users};
use rota_storage::{Database, Queue};

/// Open a fresh migrated database in a temp directory.
///
/// The `TempDir` must be kept alive for the database's lifetime.
pub async fn temp_db() -> (Database, TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("rota-test.db");
    let db = Database::open(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("open test database");
    (db, dir)
}

/// Insert a registered non-admin user.
pub async fn seed_user(db: &Database, id: &str, name: &str, surname: &str) -> User {
    let user = User {
        id: UserId(id.to_string()),
        name: name.to_string(),
        surname: surname.to_string(),
        is_admin: false,
    };
    users::create_user(db, &user).await.expect("seed user");
    user
}

/// Insert a planned queue with the given window, relative to `start`.
pub async fn seed_queue(
    db: &Database,
    name: &str,
    start: DateTime<Utc>,
    duration: TimeDelta,
    notify_lead: TimeDelta,
) -> Queue {
    queues::create(
        db,
        queues::NewQueue {
            name: name.to_string(),
            start_dt: start,
            end_dt: start + duration,
            notify_dt: start - notify_lead,
        },
    )
    .await
    .expect("seed queue")
}

/// Insert a queue already in `active` status, opened in the recent past.
pub async fn seed_active_queue(db: &Database, name: &str) -> Queue {
    let start = Utc::now() - TimeDelta::minutes(5);
    let queue = seed_queue(
        db,
        name,
        start,
        TimeDelta::hours(2),
        TimeDelta::minutes(10),
    )
    .await;
    queues::advance_status(db, queue.id, QueueStatus::Planned, QueueStatus::Active)
        .await
        .expect("activate queue");
    queues::get(db, queue.id)
        .await
        .expect("reload queue")
        .expect("queue exists")
}

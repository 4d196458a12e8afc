// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Idempotent lifecycle transition handlers.
//!
//! Every `fire` re-reads the queue from the store and no-ops (logging,
//! never erroring) when its guard no longer holds: the queue is missing,
//! the notification was already sent, or the status already moved on.
//! Combined with the guarded UPDATEs in storage this makes re-firing after
//! a crash or a reconciliation overlap harmless. Broadcast delivery itself
//! is at-least-once; a duplicate broadcast is accepted, a lost state
//! change is not.

use std::sync::Arc;

use rota_core::localtime::{format_local, format_local_short};
use rota_core::types::{Button, Outbound, Queue, QueueStatus, TimerKind};
use rota_core::{Messenger, RotaError};
use rota_storage::Database;
use rota_storage::queries::{queues, users};
use tracing::{debug, info, warn};

/// Execute a due timer against current store state.
///
/// Storage failures are returned to the caller for retry; every guard
/// failure is a logged no-op.
pub async fn fire(
    db: &Database,
    messenger: &Arc<dyn Messenger>,
    queue_id: i64,
    kind: TimerKind,
    utc_offset_hours: i32,
) -> Result<(), RotaError> {
    let Some(queue) = queues::get(db, queue_id).await? else {
        warn!(queue_id, kind = %kind, "timer fired for a missing queue; skipping");
        return Ok(());
    };

    match kind {
        TimerKind::Notify => fire_notify(db, messenger, &queue, utc_offset_hours).await,
        TimerKind::Open => fire_open(db, messenger, &queue, utc_offset_hours).await,
        TimerKind::Close => fire_close(db, messenger, &queue).await,
    }
}

/// Announce the upcoming opening to every user, then durably mark the
/// queue notified.
async fn fire_notify(
    db: &Database,
    messenger: &Arc<dyn Messenger>,
    queue: &Queue,
    utc_offset_hours: i32,
) -> Result<(), RotaError> {
    if queue.notification_sent {
        debug!(queue_id = queue.id, "notify already sent; skipping");
        return Ok(());
    }

    let recipients = users::all_user_ids(db).await?;
    let text = format!(
        "Queue \"{}\" opens at {}. Get ready to sign up!",
        queue.name,
        format_local(queue.start_dt, utc_offset_hours)
    );
    messenger
        .broadcast(&recipients, Outbound::text(text))
        .await?;

    if queues::mark_notified(db, queue.id).await? {
        info!(queue_id = queue.id, name = %queue.name, "notify fired");
    } else {
        debug!(queue_id = queue.id, "notify flag already set by a concurrent fire");
    }
    Ok(())
}

/// Open the queue (planned -> active), then broadcast its detail with a
/// join affordance. The state change is persisted before the broadcast.
async fn fire_open(
    db: &Database,
    messenger: &Arc<dyn Messenger>,
    queue: &Queue,
    utc_offset_hours: i32,
) -> Result<(), RotaError> {
    if queue.status != QueueStatus::Planned {
        debug!(queue_id = queue.id, status = %queue.status, "open guard failed; skipping");
        return Ok(());
    }

    if !queues::advance_status(db, queue.id, QueueStatus::Planned, QueueStatus::Active).await? {
        debug!(queue_id = queue.id, "queue already opened by a concurrent fire");
        return Ok(());
    }
    info!(queue_id = queue.id, name = %queue.name, "queue opened");

    let recipients = users::all_user_ids(db).await?;
    let message = Outbound::text(render_detail(queue, utc_offset_hours))
        .with_row(vec![Button::new("Join the queue", queue.id.to_string())]);
    messenger.broadcast(&recipients, message).await?;
    Ok(())
}

/// Broadcast a closure notice, then archive the queue (active -> archived).
async fn fire_close(
    db: &Database,
    messenger: &Arc<dyn Messenger>,
    queue: &Queue,
) -> Result<(), RotaError> {
    if queue.status != QueueStatus::Active {
        debug!(queue_id = queue.id, status = %queue.status, "close guard failed; skipping");
        return Ok(());
    }

    let recipients = users::all_user_ids(db).await?;
    let text = format!("Queue \"{}\" is now closed.", queue.name);
    messenger
        .broadcast(&recipients, Outbound::text(text))
        .await?;

    if queues::advance_status(db, queue.id, QueueStatus::Active, QueueStatus::Archived).await? {
        info!(queue_id = queue.id, name = %queue.name, "queue archived");
    } else {
        debug!(queue_id = queue.id, "queue already archived by a concurrent fire");
    }
    Ok(())
}

/// The queue's full detail as broadcast on opening.
fn render_detail(queue: &Queue, utc_offset_hours: i32) -> String {
    format!(
        "Queue \"{}\" is now open!\nOpen: {}\nCloses: {}",
        queue.name,
        format_local_short(queue.start_dt, utc_offset_hours),
        format_local_short(queue.end_dt, utc_offset_hours),
    )
}

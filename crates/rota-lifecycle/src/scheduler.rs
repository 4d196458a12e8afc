// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The durable timer registry.
//!
//! No timer is ever persisted: every pending timer is a pure function of a
//! queue's fields and current status, so `reconcile_on_startup` re-derives
//! and re-arms the whole registry from the store after a restart. Delays
//! are `max(0, fire_at - now)` -- an overdue timer collapses to fire-now,
//! which together with the idempotent guards in [`crate::transitions`]
//! makes recovery safe.
//!
//! Each queue gets one sequential task walking its timers in Notify, Open,
//! Close order, so simultaneous due-times fire in logical precedence.
//! Timers are fire-and-forget and never cancelled individually; a Close
//! supersedes an unfired Open only through the no-op guards.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rota_config::model::RotaConfig;
use rota_core::types::{Queue, QueueStatus, TimerKind};
use rota_core::{Messenger, RotaError};
use rota_storage::Database;
use rota_storage::queries::queues;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::transitions;

/// Scheduler tuning, extracted from the lifecycle and time config sections.
#[derive(Debug, Clone)]
pub struct LifecycleSettings {
    pub utc_offset_hours: i32,
    pub fire_retry_attempts: u32,
    pub fire_retry_backoff_secs: u64,
}

impl LifecycleSettings {
    pub fn from_config(config: &RotaConfig) -> Self {
        Self {
            utc_offset_hours: config.time.utc_offset_hours,
            fire_retry_attempts: config.lifecycle.fire_retry_attempts,
            fire_retry_backoff_secs: config.lifecycle.fire_retry_backoff_secs,
        }
    }
}

/// Owns every pending queue timer in the process.
///
/// Single-instance by design: one scheduler per process, one process per
/// deployment.
pub struct LifecycleScheduler {
    db: Database,
    messenger: Arc<dyn Messenger>,
    settings: LifecycleSettings,
    cancel: CancellationToken,
}

impl LifecycleScheduler {
    pub fn new(db: Database, messenger: Arc<dyn Messenger>, settings: LifecycleSettings) -> Self {
        Self {
            db,
            messenger,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Re-derive and arm the timers for every non-archived queue.
    ///
    /// Called once at process start, after storage is open. Overdue
    /// timers fire immediately, in kind order per queue; `fire`'s guards
    /// make re-running a previously-handled transition a no-op. Returns
    /// the number of queues armed.
    pub async fn reconcile_on_startup(&self) -> Result<usize, RotaError> {
        let pending = queues::list_unarchived(&self.db).await?;
        let count = pending.len();
        for queue in pending {
            self.arm(queue);
        }
        info!(queues = count, "startup reconciliation armed pending timers");
        Ok(count)
    }

    /// Arm the three timers for a queue created this instant.
    ///
    /// Creation commits the record before calling this, so a crash in
    /// between loses nothing: the next startup reconciliation re-arms
    /// from the committed record.
    pub fn schedule_on_create(&self, queue: &Queue) {
        debug!(queue_id = queue.id, name = %queue.name, "scheduling timers for new queue");
        self.arm(queue.clone());
    }

    /// Stop all timer tasks. Pending transitions are picked up by the
    /// next startup reconciliation.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Spawn the sequential per-queue timer task.
    fn arm(&self, queue: Queue) {
        let timers = pending_timers(&queue);
        if timers.is_empty() {
            debug!(queue_id = queue.id, status = %queue.status, "no timers to arm");
            return;
        }

        let db = self.db.clone();
        let messenger = self.messenger.clone();
        let settings = self.settings.clone();
        let cancel = self.cancel.clone();
        let queue_id = queue.id;

        tokio::spawn(async move {
            for (kind, fire_at) in timers {
                let delay = (fire_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(queue_id, "scheduler shutdown; dropping remaining timers");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
                fire_with_retry(&db, &messenger, queue_id, kind, &settings).await;
            }
        });
    }
}

/// The timers a queue currently implies, in firing order.
///
/// Notify is owed while the notification is unsent, Open only while still
/// planned, Close for any non-archived queue. An archived queue owns
/// nothing.
pub fn pending_timers(queue: &Queue) -> Vec<(TimerKind, DateTime<Utc>)> {
    if queue.status == QueueStatus::Archived {
        return Vec::new();
    }

    let mut timers = Vec::new();
    if !queue.notification_sent {
        timers.push((TimerKind::Notify, queue.notify_dt));
    }
    if queue.status == QueueStatus::Planned {
        timers.push((TimerKind::Open, queue.start_dt));
    }
    timers.push((TimerKind::Close, queue.end_dt));
    timers
}

/// Run one fire to completion, retrying infrastructure failures on a
/// short backoff. A fire abandoned here is re-armed by the next startup
/// reconciliation, which is safe because firing is idempotent.
async fn fire_with_retry(
    db: &Database,
    messenger: &Arc<dyn Messenger>,
    queue_id: i64,
    kind: TimerKind,
    settings: &LifecycleSettings,
) {
    for attempt in 1..=settings.fire_retry_attempts {
        match transitions::fire(db, messenger, queue_id, kind, settings.utc_offset_hours).await {
            Ok(()) => return,
            Err(e) => {
                warn!(
                    queue_id,
                    kind = %kind,
                    attempt,
                    error = %e,
                    "timer fire failed"
                );
                if attempt < settings.fire_retry_attempts {
                    tokio::time::sleep(Duration::from_secs(settings.fire_retry_backoff_secs)).await;
                }
            }
        }
    }
    error!(
        queue_id,
        kind = %kind,
        "timer fire abandoned after retries; next startup reconciliation will re-arm it"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use rota_test_utils::{MockMessenger, seed_queue, seed_user, temp_db};

    fn test_settings() -> LifecycleSettings {
        LifecycleSettings {
            utc_offset_hours: 3,
            fire_retry_attempts: 3,
            fire_retry_backoff_secs: 0,
        }
    }

    async fn wait_for_status(db: &Database, queue_id: i64, expected: QueueStatus) -> Queue {
        for _ in 0..200 {
            let queue = queues::get(db, queue_id).await.unwrap().unwrap();
            if queue.status == expected {
                return queue;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("queue {queue_id} never reached {expected}");
    }

    #[test]
    fn pending_timers_for_planned_queue() {
        let now = Utc::now();
        let queue = Queue {
            id: 1,
            name: "q".into(),
            start_dt: now + TimeDelta::hours(1),
            end_dt: now + TimeDelta::hours(3),
            notify_dt: now + TimeDelta::minutes(50),
            status: QueueStatus::Planned,
            notification_sent: false,
        };
        let kinds: Vec<TimerKind> = pending_timers(&queue).iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![TimerKind::Notify, TimerKind::Open, TimerKind::Close]);
    }

    #[test]
    fn pending_timers_skip_sent_notification_and_past_states() {
        let now = Utc::now();
        let mut queue = Queue {
            id: 1,
            name: "q".into(),
            start_dt: now,
            end_dt: now + TimeDelta::hours(2),
            notify_dt: now - TimeDelta::minutes(10),
            status: QueueStatus::Active,
            notification_sent: true,
        };
        let kinds: Vec<TimerKind> = pending_timers(&queue).iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![TimerKind::Close], "active+notified owes only Close");

        queue.status = QueueStatus::Archived;
        assert!(pending_timers(&queue).is_empty(), "archived owes nothing");
    }

    #[tokio::test]
    async fn reconcile_opens_overdue_planned_queue_exactly_once() {
        let (db, _dir) = temp_db().await;
        let mock = Arc::new(MockMessenger::new());
        let messenger: Arc<dyn Messenger> = mock.clone();
        seed_user(&db, "a", "Ana", "Lee").await;

        // start_dt is in the past, end_dt far in the future, notification
        // already sent: reconciliation owes exactly one Open.
        let queue = seed_queue(
            &db,
            "overdue",
            Utc::now() - TimeDelta::minutes(30),
            TimeDelta::hours(6),
            TimeDelta::minutes(10),
        )
        .await;
        queues::mark_notified(&db, queue.id).await.unwrap();

        let scheduler = LifecycleScheduler::new(db.clone(), messenger, test_settings());
        let armed = scheduler.reconcile_on_startup().await.unwrap();
        assert_eq!(armed, 1);

        let opened = wait_for_status(&db, queue.id, QueueStatus::Active).await;
        assert_eq!(opened.status, QueueStatus::Active);

        // Exactly one opening broadcast to the one registered user.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.sent_count().await, 1);

        scheduler.shutdown();
    }

    #[tokio::test]
    async fn reconcile_walks_whole_overdue_lifecycle_in_order() {
        let (db, _dir) = temp_db().await;
        let mock = Arc::new(MockMessenger::new());
        let messenger: Arc<dyn Messenger> = mock.clone();
        let user = seed_user(&db, "a", "Ana", "Lee").await;

        // Everything overdue: notify, open, and close all collapse to
        // fire-now and must run in that order.
        let queue = seed_queue(
            &db,
            "expired",
            Utc::now() - TimeDelta::hours(3),
            TimeDelta::hours(1),
            TimeDelta::minutes(10),
        )
        .await;

        let scheduler = LifecycleScheduler::new(db.clone(), messenger, test_settings());
        scheduler.reconcile_on_startup().await.unwrap();

        let archived = wait_for_status(&db, queue.id, QueueStatus::Archived).await;
        assert!(archived.notification_sent);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let sent = mock.sent_to(&user.id).await;
        assert_eq!(sent.len(), 3, "notify, open, close broadcasts in order");
        assert!(sent[0].text.contains("opens at"));
        assert!(sent[1].text.contains("now open"));
        assert!(sent[2].text.contains("closed"));

        scheduler.shutdown();
    }

    #[tokio::test]
    async fn double_reconcile_produces_single_broadcast_set() {
        let (db, _dir) = temp_db().await;
        let mock = Arc::new(MockMessenger::new());
        let messenger: Arc<dyn Messenger> = mock.clone();
        seed_user(&db, "a", "Ana", "Lee").await;

        let queue = seed_queue(
            &db,
            "restarted",
            Utc::now() - TimeDelta::hours(3),
            TimeDelta::hours(1),
            TimeDelta::minutes(10),
        )
        .await;

        let scheduler = LifecycleScheduler::new(db.clone(), messenger, test_settings());
        scheduler.reconcile_on_startup().await.unwrap();
        wait_for_status(&db, queue.id, QueueStatus::Archived).await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        let after_first = mock.sent_count().await;
        assert_eq!(after_first, 3);

        // Simulated restart: the queue is archived now, so the second
        // reconciliation arms nothing and re-sends nothing.
        let armed = scheduler.reconcile_on_startup().await.unwrap();
        assert_eq!(armed, 0);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.sent_count().await, after_first);

        scheduler.shutdown();
    }

    #[tokio::test]
    async fn schedule_on_create_arms_future_timers_without_firing() {
        let (db, _dir) = temp_db().await;
        let mock = Arc::new(MockMessenger::new());
        let messenger: Arc<dyn Messenger> = mock.clone();
        seed_user(&db, "a", "Ana", "Lee").await;

        let queue = seed_queue(
            &db,
            "future",
            Utc::now() + TimeDelta::hours(1),
            TimeDelta::hours(2),
            TimeDelta::minutes(10),
        )
        .await;

        let scheduler = LifecycleScheduler::new(db.clone(), messenger, test_settings());
        scheduler.schedule_on_create(&queue);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.sent_count().await, 0, "nothing is due yet");
        let still = queues::get(&db, queue.id).await.unwrap().unwrap();
        assert_eq!(still.status, QueueStatus::Planned);

        scheduler.shutdown();
    }

    #[tokio::test]
    async fn shutdown_stops_pending_timers() {
        let (db, _dir) = temp_db().await;
        let mock = Arc::new(MockMessenger::new());
        let messenger: Arc<dyn Messenger> = mock.clone();
        seed_user(&db, "a", "Ana", "Lee").await;

        let queue = seed_queue(
            &db,
            "stopped",
            Utc::now() + TimeDelta::hours(1),
            TimeDelta::hours(2),
            TimeDelta::minutes(10),
        )
        .await;

        let scheduler = LifecycleScheduler::new(db.clone(), messenger, test_settings());
        scheduler.schedule_on_create(&queue);
        scheduler.shutdown();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(mock.sent_count().await, 0);
        let still = queues::get(&db, queue.id).await.unwrap().unwrap();
        assert_eq!(still.status, QueueStatus::Planned, "no transition after shutdown");
    }
}

// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-lifecycle scenario tests across engine, scheduler, and storage.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use rota_core::Messenger;
use rota_core::localtime::HUMAN_FORMAT;
use rota_core::types::{Event, QueueStatus, TimerKind, UserId};
use rota_engine::{EngineSettings, SessionEngine};
use rota_lifecycle::{LifecycleScheduler, LifecycleSettings, fire};
use rota_storage::Database;
use rota_storage::queries::{attendants, queues, states};
use rota_test_utils::{MockMessenger, temp_db};

fn human(dt: DateTime<Utc>) -> String {
    dt.format(HUMAN_FORMAT).to_string()
}

struct World {
    db: Database,
    mock: Arc<MockMessenger>,
    engine: SessionEngine,
    _dir: tempfile::TempDir,
}

async fn world() -> World {
    let (db, dir) = temp_db().await;
    let mock = Arc::new(MockMessenger::new());
    let messenger: Arc<dyn Messenger> = mock.clone();
    let scheduler = Arc::new(LifecycleScheduler::new(
        db.clone(),
        messenger.clone(),
        LifecycleSettings {
            utc_offset_hours: 0,
            fire_retry_attempts: 3,
            fire_retry_backoff_secs: 0,
        },
    ));
    let engine = SessionEngine::new(
        db.clone(),
        messenger,
        scheduler,
        EngineSettings {
            super_admin_id: Some("admin".to_string()),
            min_notify_lead_secs: 300,
            min_open_duration_secs: 600,
            utc_offset_hours: 0,
            page_size: 5,
        },
    );
    World {
        db,
        mock,
        engine,
        _dir: dir,
    }
}

async fn register(w: &World, id: &str, name: &str, surname: &str) -> UserId {
    let user = UserId::from(id);
    w.engine
        .dispatch(&user, Event::Command("start".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&user, Event::Text(name.into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&user, Event::Text(surname.into()))
        .await
        .unwrap();
    user
}

/// The full queue "A" scenario: create -> notify -> open -> join ->
/// close -> join rejected.
#[tokio::test]
async fn queue_a_walks_its_whole_lifecycle() {
    let w = world().await;
    let messenger: Arc<dyn Messenger> = w.mock.clone();

    let admin = register(&w, "admin", "Root", "Admin").await;
    let user = register(&w, "u1", "Ana", "Lee").await;

    // Admin creates queue "A": start = now + 1h, end = start + 2h,
    // notify = start - 10m (lead above the 300 s minimum).
    let start = Utc::now() + TimeDelta::hours(1);
    w.engine
        .dispatch(&admin, Event::Button("add_queue".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text("A".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start)))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start + TimeDelta::hours(2))))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start - TimeDelta::minutes(10))))
        .await
        .unwrap();

    let planned = queues::list_by_status(&w.db, QueueStatus::Planned)
        .await
        .unwrap();
    let queue = &planned[0];
    assert_eq!(queue.name, "A");
    assert_eq!(queue.status, QueueStatus::Planned);
    assert!(!queue.notification_sent);

    // Notify fires: the flag flips and both users hear about it.
    w.mock.clear().await;
    fire(&w.db, &messenger, queue.id, TimerKind::Notify, 0)
        .await
        .unwrap();
    let notified = queues::get(&w.db, queue.id).await.unwrap().unwrap();
    assert!(notified.notification_sent);
    assert_eq!(w.mock.sent_count().await, 2);

    // Open fires: status becomes active.
    fire(&w.db, &messenger, queue.id, TimerKind::Open, 0)
        .await
        .unwrap();
    let opened = queues::get(&w.db, queue.id).await.unwrap().unwrap();
    assert_eq!(opened.status, QueueStatus::Active);

    // Ana joins through the conversation and gets position 1.
    w.engine
        .dispatch(&user, Event::Command("start".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&user, Event::Button("active".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&user, Event::Button(queue.id.to_string()))
        .await
        .unwrap();
    w.engine
        .dispatch(&user, Event::Button(queue.id.to_string()))
        .await
        .unwrap();
    let roster = attendants::roster(&w.db, queue.id).await.unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].0.position, 1);
    assert_eq!(roster[0].1.name, "Ana");

    // Close fires: status becomes archived.
    fire(&w.db, &messenger, queue.id, TimerKind::Close, 0)
        .await
        .unwrap();
    let closed = queues::get(&w.db, queue.id).await.unwrap().unwrap();
    assert_eq!(closed.status, QueueStatus::Archived);

    // A later join attempt is rejected as not open.
    let late = register(&w, "u2", "Bob", "Ray").await;
    w.mock.clear().await;
    w.engine
        .dispatch(&late, Event::Button(queue.id.to_string()))
        .await
        .unwrap();
    w.engine
        .dispatch(&late, Event::Button(queue.id.to_string()))
        .await
        .unwrap();
    let sent = w.mock.sent_to(&late).await;
    assert!(
        sent.iter().any(|m| m.text.contains("not open")),
        "late join must be rejected"
    );
    let roster = attendants::roster(&w.db, queue.id).await.unwrap();
    assert_eq!(roster.len(), 1, "roster unchanged after rejected join");
}

/// Status only ever moves forward, even under stray re-fires.
#[tokio::test]
async fn lifecycle_is_monotonic_under_refires() {
    let w = world().await;
    let messenger: Arc<dyn Messenger> = w.mock.clone();
    register(&w, "u1", "Ana", "Lee").await;

    let admin = register(&w, "admin", "Root", "Admin").await;
    let start = Utc::now() + TimeDelta::hours(1);
    w.engine
        .dispatch(&admin, Event::Button("add_queue".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text("B".into()))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start)))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start + TimeDelta::hours(2))))
        .await
        .unwrap();
    w.engine
        .dispatch(&admin, Event::Text(human(start - TimeDelta::minutes(10))))
        .await
        .unwrap();
    let planned = queues::list_by_status(&w.db, QueueStatus::Planned)
        .await
        .unwrap();
    let queue_id = planned[0].id;

    // A surviving pre-restart timer may fire any kind at any point;
    // replay a messy interleaving and check the status never regresses.
    let sequence = [
        TimerKind::Open,
        TimerKind::Open,
        TimerKind::Notify,
        TimerKind::Close,
        TimerKind::Open,
        TimerKind::Notify,
        TimerKind::Close,
    ];
    let mut last_rank = 0;
    for kind in sequence {
        fire(&w.db, &messenger, queue_id, kind, 0).await.unwrap();
        let status = queues::get(&w.db, queue_id).await.unwrap().unwrap().status;
        let rank = match status {
            QueueStatus::Planned => 0,
            QueueStatus::Active => 1,
            QueueStatus::Archived => 2,
        };
        assert!(rank >= last_rank, "status regressed to {status}");
        last_rank = rank;
    }
    assert_eq!(last_rank, 2, "queue ends archived");
}

/// A conversation interrupted mid-creation resumes after a "restart"
/// with a new engine over the same store.
#[tokio::test]
async fn creation_flow_survives_engine_restart() {
    let (db, _dir) = temp_db().await;
    let mock = Arc::new(MockMessenger::new());

    let build = |db: &Database, mock: &Arc<MockMessenger>| {
        let messenger: Arc<dyn Messenger> = mock.clone();
        let scheduler = Arc::new(LifecycleScheduler::new(
            db.clone(),
            messenger.clone(),
            LifecycleSettings {
                utc_offset_hours: 0,
                fire_retry_attempts: 3,
                fire_retry_backoff_secs: 0,
            },
        ));
        SessionEngine::new(
            db.clone(),
            messenger,
            scheduler,
            EngineSettings {
                super_admin_id: Some("admin".to_string()),
                min_notify_lead_secs: 300,
                min_open_duration_secs: 600,
                utc_offset_hours: 0,
                page_size: 5,
            },
        )
    };

    let admin = UserId::from("admin");
    let start = Utc::now() + TimeDelta::hours(1);
    {
        let engine = build(&db, &mock);
        engine
            .dispatch(&admin, Event::Command("start".into()))
            .await
            .unwrap();
        engine
            .dispatch(&admin, Event::Text("Root".into()))
            .await
            .unwrap();
        engine
            .dispatch(&admin, Event::Text("Admin".into()))
            .await
            .unwrap();
        engine
            .dispatch(&admin, Event::Button("add_queue".into()))
            .await
            .unwrap();
        engine
            .dispatch(&admin, Event::Text("C".into()))
            .await
            .unwrap();
        engine
            .dispatch(&admin, Event::Text(human(start)))
            .await
            .unwrap();
        // Crash here: name and start are accepted, end is pending.
    }

    let record = states::load(&db, &admin).await.unwrap().unwrap();
    assert_eq!(record.state, "queue_end");

    let engine = build(&db, &mock);
    engine
        .dispatch(&admin, Event::Text(human(start + TimeDelta::hours(2))))
        .await
        .unwrap();
    engine
        .dispatch(&admin, Event::Text(human(start - TimeDelta::minutes(10))))
        .await
        .unwrap();

    let created = queues::list_by_status(&db, QueueStatus::Planned)
        .await
        .unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].name, "C");
}

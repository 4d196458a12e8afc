// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable wall-clock lifecycle scheduler for the Rota queue bot.
//!
//! Queues move planned -> active -> archived at absolute instants. This
//! crate arms those transitions as in-process timers, reconstructs every
//! pending timer from the store at startup, and fires each transition
//! idempotently so that a crash at any point recovers with no missed
//! transition and no duplicated state change.

pub mod scheduler;
pub mod transitions;

pub use scheduler::{LifecycleScheduler, LifecycleSettings, pending_timers};
pub use transitions::fire;

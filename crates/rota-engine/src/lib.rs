// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted per-user conversation engine for the Rota queue bot.
//!
//! Each user's conversation is a small state machine persisted in the
//! entity store: the engine loads the state, routes the inbound event
//! through an exhaustive (state, event) table, persists the next state,
//! and only then sends replies. Three flows run on top of it:
//! registration, admin queue creation, and queue browsing/joining.

pub mod engine;
pub mod pagination;
pub mod state;

pub use engine::{EngineSettings, SessionEngine};
pub use state::{ChatState, SessionData};

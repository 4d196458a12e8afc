// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Rota queue bot.
//!
//! This crate provides the error type, domain enumerations, conversation
//! event types, and the outbound [`Messenger`] trait used throughout the
//! Rota workspace.

pub mod error;
pub mod localtime;
pub mod messenger;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::RotaError;
pub use messenger::Messenger;
pub use types::{
    Attendant, Button, ConversationState, Event, Outbound, Queue, QueueStatus, TimerKind, User,
    UserId,
};

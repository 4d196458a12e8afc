// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types are defined in `rota-core::types` for use across
//! crate boundaries. This module re-exports them for convenience within
//! the storage crate.

pub use rota_core::types::{Attendant, ConversationState, Queue, QueueStatus, User, UserId};

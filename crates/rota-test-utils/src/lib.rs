// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared mocks and fixtures for Rota tests.

pub mod fixtures;
pub mod mock_messenger;

pub use fixtures::{seed_active_queue, seed_queue, seed_user, temp_db};
pub use mock_messenger::MockMessenger;

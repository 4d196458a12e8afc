// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use rota_core::RotaError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), RotaError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| RotaError::Storage {
            source: Box::new(e),
        })?;
    Ok(())
}

/// Same as [`run_migrations`], but boxes the failure for use inside a
/// tokio-rusqlite call closure.
pub(crate) fn run_migrations_raw(
    conn: &mut rusqlite::Connection,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;
    Ok(())
}

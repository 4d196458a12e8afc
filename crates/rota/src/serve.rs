// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `rota serve` command implementation.
//!
//! Opens storage, reconciles every pending lifecycle timer from durable
//! queue state, and keeps the scheduler running until interrupted.
//! Outbound broadcasts go to the console messenger; a chat transport
//! integration would swap in its own [`rota_core::Messenger`] here.

use std::sync::Arc;

use rota_config::model::RotaConfig;
use rota_core::{Messenger, RotaError};
use rota_lifecycle::{LifecycleScheduler, LifecycleSettings};
use rota_storage::Database;
use tracing::info;

use crate::console::ConsoleMessenger;

/// Runs the `rota serve` command until ctrl-c.
pub async fn run_serve(config: RotaConfig) -> Result<(), RotaError> {
    info!("starting rota serve");

    let db = Database::from_config(&config.storage).await?;
    let messenger: Arc<dyn Messenger> = Arc::new(ConsoleMessenger);

    let scheduler = Arc::new(LifecycleScheduler::new(
        db.clone(),
        messenger,
        LifecycleSettings::from_config(&config),
    ));
    let armed = scheduler.reconcile_on_startup().await?;
    info!(queues = armed, "scheduler running");

    tokio::signal::ctrl_c().await.map_err(|e| RotaError::Internal(
        format!("failed to listen for shutdown signal: {e}"),
    ))?;
    info!("shutdown signal received");

    scheduler.shutdown();
    db.close().await?;
    info!("rota serve stopped");
    Ok(())
}

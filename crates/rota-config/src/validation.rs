// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as positive timing policy values and a plausible
//! UTC offset.

use crate::diagnostic::ConfigError;
use crate::model::RotaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &RotaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.lifecycle.min_notify_lead_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "lifecycle.min_notify_lead_secs must be positive, got {}",
                config.lifecycle.min_notify_lead_secs
            ),
        });
    }

    if config.lifecycle.min_open_duration_secs < 1 {
        errors.push(ConfigError::Validation {
            message: format!(
                "lifecycle.min_open_duration_secs must be positive, got {}",
                config.lifecycle.min_open_duration_secs
            ),
        });
    }

    if config.lifecycle.fire_retry_attempts < 1 {
        errors.push(ConfigError::Validation {
            message: "lifecycle.fire_retry_attempts must be at least 1".to_string(),
        });
    }

    // Real-world offsets run from UTC-12 to UTC+14.
    if config.time.utc_offset_hours < -12 || config.time.utc_offset_hours > 14 {
        errors.push(ConfigError::Validation {
            message: format!(
                "time.utc_offset_hours must be within [-12, 14], got {}",
                config.time.utc_offset_hours
            ),
        });
    }

    if config.pagination.page_size < 1 {
        errors.push(ConfigError::Validation {
            message: "pagination.page_size must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

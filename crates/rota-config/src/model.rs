// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Rota queue bot.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Rota configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RotaConfig {
    /// Bot identity, logging, and admin settings.
    #[serde(default)]
    pub bot: BotConfig,

    /// Queue lifecycle timing policy.
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Local-time interpretation of human-entered timestamps.
    #[serde(default)]
    pub time: TimeConfig,

    /// Queue list pagination settings.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Bot identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    /// Display name of the bot.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Chat identity granted `is_admin` at registration. `None` means no
    /// user ever registers as admin.
    #[serde(default)]
    pub super_admin_id: Option<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            log_level: default_log_level(),
            super_admin_id: None,
        }
    }
}

fn default_bot_name() -> String {
    "rota".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Queue lifecycle timing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LifecycleConfig {
    /// Minimum seconds between notify_dt and start_dt at creation.
    /// The notification must land strictly more than this far ahead.
    #[serde(default = "default_min_notify_lead_secs")]
    pub min_notify_lead_secs: i64,

    /// Minimum seconds a queue must stay open (end_dt - start_dt).
    #[serde(default = "default_min_open_duration_secs")]
    pub min_open_duration_secs: i64,

    /// Attempts before a failed timer fire is abandoned to the next
    /// startup reconciliation.
    #[serde(default = "default_fire_retry_attempts")]
    pub fire_retry_attempts: u32,

    /// Seconds between fire retry attempts.
    #[serde(default = "default_fire_retry_backoff_secs")]
    pub fire_retry_backoff_secs: u64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            min_notify_lead_secs: default_min_notify_lead_secs(),
            min_open_duration_secs: default_min_open_duration_secs(),
            fire_retry_attempts: default_fire_retry_attempts(),
            fire_retry_backoff_secs: default_fire_retry_backoff_secs(),
        }
    }
}

fn default_min_notify_lead_secs() -> i64 {
    300
}

fn default_min_open_duration_secs() -> i64 {
    600
}

fn default_fire_retry_attempts() -> u32 {
    3
}

fn default_fire_retry_backoff_secs() -> u64 {
    5
}

/// Local-time interpretation of human-entered timestamps.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TimeConfig {
    /// Fixed offset from UTC, in whole hours, applied when parsing and
    /// rendering `DD.MM.YYYY hh:mm:ss` values.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

fn default_utc_offset_hours() -> i32 {
    3
}

/// Queue list pagination settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationConfig {
    /// Queues shown per page in the list view.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    5
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("rota").join("rota.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "rota.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = RotaConfig::default();
        assert_eq!(config.bot.name, "rota");
        assert_eq!(config.bot.log_level, "info");
        assert!(config.bot.super_admin_id.is_none());
        assert_eq!(config.lifecycle.min_notify_lead_secs, 300);
        assert_eq!(config.lifecycle.min_open_duration_secs, 600);
        assert_eq!(config.time.utc_offset_hours, 3);
        assert_eq!(config.pagination.page_size, 5);
        assert!(config.storage.wal_mode);
    }

    #[test]
    fn unknown_section_field_is_rejected() {
        let toml = r#"
[lifecycle]
min_notify_lead = 60
"#;
        assert!(toml::from_str::<RotaConfig>(toml).is_err());
    }
}

// SPDX-FileCopyrightText: 2026 Rota Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-entered date-time parsing and rendering.
//!
//! Users type and read timestamps as `DD.MM.YYYY hh:mm:ss` in a fixed
//! configurable UTC offset; everything stored and compared is UTC.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::RotaError;

/// The wire format users type: `DD.MM.YYYY hh:mm:ss`.
pub const HUMAN_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Shorter rendering for list rows: `DD.MM.YYYY hh:mm`.
const SHORT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The fixed offset for the given whole-hour shift from UTC.
///
/// Config validation bounds the shift to [-12, 14]; out-of-range values
/// fall back to UTC rather than panicking.
pub fn fixed_offset(offset_hours: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_hours * 3600).unwrap_or_else(|| Utc.fix())
}

/// Parse a `DD.MM.YYYY hh:mm:ss` string typed in the given local offset
/// into a UTC instant.
///
/// Malformed input yields a descriptive [`RotaError::Validation`], never
/// a panic.
pub fn parse_local(text: &str, offset_hours: i32) -> Result<DateTime<Utc>, RotaError> {
    let naive = NaiveDateTime::parse_from_str(text.trim(), HUMAN_FORMAT).map_err(|_| {
        RotaError::Validation(format!(
            "could not read `{}` as a date-time; expected DD.MM.YYYY hh:mm:ss",
            text.trim()
        ))
    })?;
    let local = fixed_offset(offset_hours)
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| {
            RotaError::Validation(format!("`{}` is not an unambiguous local time", text.trim()))
        })?;
    Ok(local.with_timezone(&Utc))
}

/// Render a UTC instant as `DD.MM.YYYY hh:mm:ss` in the given local offset.
pub fn format_local(dt: DateTime<Utc>, offset_hours: i32) -> String {
    dt.with_timezone(&fixed_offset(offset_hours))
        .format(HUMAN_FORMAT)
        .to_string()
}

/// Render a UTC instant as `DD.MM.YYYY hh:mm` in the given local offset.
pub fn format_local_short(dt: DateTime<Utc>, offset_hours: i32) -> String {
    dt.with_timezone(&fixed_offset(offset_hours))
        .format(SHORT_FORMAT)
        .to_string()
}

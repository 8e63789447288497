//! Time-of-day parsing and shift duration.
//!
//! Shift times are stored as `"HH:MM"` strings. Coverage and cost math work
//! on the hour component; how minutes and overnight ranges are treated when
//! measuring a duration is selected by [`DurationPolicy`].

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Minutes in one day, added when a minute-precise range wraps midnight.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// How a shift's duration is measured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationPolicy {
    /// `hour(end) - hour(start)`, minutes ignored. An end hour before the
    /// start hour is a data-entry error and yields zero hours.
    #[default]
    HourTruncated,
    /// Minute-exact difference; an end before the start wraps past midnight.
    MinutePrecision,
}

/// A measured duration and whether it had to be clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftDuration {
    /// Duration in hours.
    pub hours: Decimal,
    /// True when the raw hour difference was negative and was clamped to zero.
    pub clamped: bool,
}

/// Parses an `"HH:MM"` (or `"HH:MM:SS"`) string.
///
/// Single-digit hours such as `"8:00"` are accepted.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::parse_time;
/// use chrono::Timelike;
///
/// let time = parse_time("8:30").unwrap();
/// assert_eq!((time.hour(), time.minute()), (8, 30));
/// assert!(parse_time("25:00").is_err());
/// ```
pub fn parse_time(value: &str) -> EngineResult<NaiveTime> {
    let trimmed = value.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|e| EngineError::InvalidTime {
            value: value.to_string(),
            message: e.to_string(),
        })
}

/// Extracts the hour component (0–23), discarding minutes.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::hour_of;
///
/// assert_eq!(hour_of("17:45").unwrap(), 17);
/// ```
pub fn hour_of(value: &str) -> EngineResult<u32> {
    parse_time(value).map(|t| t.hour())
}

/// Minutes since midnight.
pub fn minutes_of(value: &str) -> EngineResult<u32> {
    parse_time(value).map(|t| t.hour() * 60 + t.minute())
}

/// Measures the duration between `start` and `end` under `policy`.
///
/// # Example
///
/// ```
/// use roster_engine::calculation::{duration_hours, DurationPolicy};
/// use rust_decimal::Decimal;
///
/// let duration = duration_hours("08:00", "17:00", DurationPolicy::HourTruncated).unwrap();
/// assert_eq!(duration.hours, Decimal::from(9));
///
/// let overnight = duration_hours("22:00", "06:00", DurationPolicy::MinutePrecision).unwrap();
/// assert_eq!(overnight.hours, Decimal::from(8));
/// ```
pub fn duration_hours(start: &str, end: &str, policy: DurationPolicy) -> EngineResult<ShiftDuration> {
    match policy {
        DurationPolicy::HourTruncated => {
            let raw = i64::from(hour_of(end)?) - i64::from(hour_of(start)?);
            if raw < 0 {
                Ok(ShiftDuration {
                    hours: Decimal::ZERO,
                    clamped: true,
                })
            } else {
                Ok(ShiftDuration {
                    hours: Decimal::from(raw),
                    clamped: false,
                })
            }
        }
        DurationPolicy::MinutePrecision => {
            let start_minutes = minutes_of(start)?;
            let end_minutes = minutes_of(end)?;
            let diff = if end_minutes >= start_minutes {
                end_minutes - start_minutes
            } else {
                end_minutes + MINUTES_PER_DAY - start_minutes
            };
            Ok(ShiftDuration {
                hours: Decimal::from(diff) / Decimal::from(60),
                clamped: false,
            })
        }
    }
}

/// Renders a minute-precise duration label such as `"9h"` or `"5h 30min"`.
///
/// Overnight ranges wrap. Returns `None` when either time is malformed.
pub fn format_duration(start: &str, end: &str) -> Option<String> {
    let start_minutes = minutes_of(start).ok()?;
    let end_minutes = minutes_of(end).ok()?;
    let diff = (end_minutes + MINUTES_PER_DAY - start_minutes) % MINUTES_PER_DAY;
    let (hours, minutes) = (diff / 60, diff % 60);
    if minutes > 0 {
        Some(format!("{}h {}min", hours, minutes))
    } else {
        Some(format!("{}h", hours))
    }
}

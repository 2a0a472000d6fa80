//! Time-of-day and calendar-date arithmetic.
//!
//! Times are carried as minutes since midnight and exchanged as `HH:MM`
//! (24-hour, zero-padded). Dates are exchanged as `YYYY-MM-DD`.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Number of minutes in a day; valid times are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A time of day, stored as minutes since midnight (`0..=1439`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Build a time from minutes since midnight.
    ///
    /// # Errors
    /// Returns `EngineError::Range` if `minutes` is not within `[0, 1439]`.
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(EngineError::Range(format!(
                "{} minutes is outside a day (0-{})",
                minutes,
                MINUTES_PER_DAY - 1
            )));
        }
        Ok(Self(minutes as u16))
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !well_formed {
            return Err(EngineError::Format(format!(
                "expected HH:MM time, got '{}'",
                s
            )));
        }

        let digit = |i: usize| u32::from(bytes[i] - b'0');
        let hour = digit(0) * 10 + digit(1);
        let minute = digit(3) * 10 + digit(4);
        if hour > 23 || minute > 59 {
            return Err(EngineError::Format(format!(
                "time '{}' is not a valid 24-hour time",
                s
            )));
        }

        Ok(Self((hour * 60 + minute) as u16))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

impl From<TimeOfDay> for NaiveTime {
    fn from(value: TimeOfDay) -> Self {
        NaiveTime::default() + Duration::minutes(i64::from(value.minutes()))
    }
}

/// Parse `HH:MM` text into minutes since midnight.
///
/// # Errors
/// Returns `EngineError::Format` unless the text is exactly `HH:MM` with hour
/// 0-23 and minute 0-59.
pub fn to_minutes(text: &str) -> Result<u32> {
    text.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

/// Format minutes since midnight as `HH:MM`.
///
/// # Errors
/// Returns `EngineError::Range` if `minutes` is not within `[0, 1439]`.
pub fn to_text(minutes: u32) -> Result<String> {
    TimeOfDay::from_minutes(minutes).map(|t| t.to_string())
}

/// Add `duration_minutes` to an `HH:MM` time and format the sum as `HH:MM`.
///
/// The sum is neither clamped nor wrapped at midnight: `"23:30" + 60` yields
/// `"24:30"`. Only the input time is validated.
///
/// # Errors
/// Returns `EngineError::Format` if `time_text` is not a valid `HH:MM` time,
/// and `EngineError::Range` only if the sum overflows `u32`.
pub fn add_minutes(time_text: &str, duration_minutes: u32) -> Result<String> {
    let total = to_minutes(time_text)?
        .checked_add(duration_minutes)
        .ok_or_else(|| EngineError::Range(format!("{} minutes overflows", duration_minutes)))?;
    Ok(format!("{:02}:{:02}", total / 60, total % 60))
}

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns `EngineError::Format` for any other shape or an impossible date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    // chrono accepts signs, padding and unpadded fields; the wire format does not.
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit());
    if !well_formed {
        return Err(EngineError::Format(format!(
            "expected YYYY-MM-DD date, got '{}'",
            text
        )));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| EngineError::Format(format!("invalid date '{}': {}", text, e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}


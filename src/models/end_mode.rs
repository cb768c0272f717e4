use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use serde::Serialize;

/// How the deadline of a new event is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndMode {
    /// The given calendar day at 23:59 local time.
    FixedDate(NaiveDate),
    /// `now` truncated to the hour, then shifted by whole days and hours.
    Offset { days: i64, hours: i64 },
}

impl EndMode {
    /// Build the mode from raw form values.
    /// A non-empty fixed date always wins over the offsets.
    pub fn from_form(fixed_date: &str, days_later: &str, hours_later: &str) -> AppResult<Self> {
        let fixed = fixed_date.trim();
        if !fixed.is_empty() {
            let date = NaiveDate::parse_from_str(fixed, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidDate(fixed.to_string()))?;
            return Ok(EndMode::FixedDate(date));
        }

        Ok(EndMode::Offset {
            days: parse_offset(days_later)?,
            hours: parse_offset(hours_later)?,
        })
    }
}

/// Parse the leading integer of `text`: optional sign followed by digits.
///
/// `"1.7"` → 1, `" -2"` → -2, `"3h"` → 3. Anything without a leading
/// integer is rejected.
pub fn parse_offset(text: &str) -> AppResult<i64> {
    let s = text.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return Err(AppError::InvalidOffset(text.to_string()));
    }

    digits[..end]
        .parse::<i64>()
        .map(|v| sign * v)
        .map_err(|_| AppError::InvalidOffset(text.to_string()))
}

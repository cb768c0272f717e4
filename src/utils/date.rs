use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Attach `tz` to a wall-clock time.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times that
/// do not exist (DST spring-forward gap) move one hour later.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> AppResult<DateTime<Tz>> {
    if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
        return Ok(dt);
    }

    naive
        .checked_add_signed(Duration::hours(1))
        .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
        .ok_or_else(|| AppError::InvalidDate(naive.to_string()))
}

/// Storage format: UTC, millisecond precision, `Z` suffix.
/// Lexical order of these strings equals chronological order.
pub fn to_db_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String {
    dt.with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn from_db_timestamp(s: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Parse a user supplied instant (`--now`): RFC 3339, or a local
/// `YYYY-MM-DDTHH:MM[:SS]` wall-clock time.
pub fn parse_instant(s: &str) -> AppResult<DateTime<Local>> {
    if let Some(dt) = from_db_timestamp(s) {
        return Ok(dt);
    }

    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| AppError::InvalidDate(s.to_string()))
        .and_then(|naive| resolve_local(&Local, naive))
}

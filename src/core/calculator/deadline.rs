//! End-time derivation for new events.

use crate::errors::{AppError, AppResult};
use crate::models::end_mode::EndMode;
use crate::utils::date::resolve_local;
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};

/// Time of day used for fixed-date deadlines.
pub fn fixed_deadline_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
}

/// Compute the deadline for `mode`, in the zone of `now`.
///
/// - `FixedDate(d)` → `d` at 23:59:00.000, independent of `now`.
/// - `Offset { days, hours }` → `now` with minutes/seconds zeroed, then
///   `days` calendar days and `hours` hours later (wall-clock arithmetic).
pub fn derive_end_time<Tz: TimeZone>(mode: &EndMode, now: &DateTime<Tz>) -> AppResult<DateTime<Tz>> {
    let tz = now.timezone();

    match *mode {
        EndMode::FixedDate(date) => resolve_local(&tz, date.and_time(fixed_deadline_time())),
        EndMode::Offset { days, hours } => {
            let local = now.naive_local();
            let truncated = local
                .date()
                .and_hms_opt(local.hour(), 0, 0)
                .ok_or_else(|| AppError::InvalidDate(local.to_string()))?;

            let overflow = || AppError::InvalidOffset(format!("{} days, {} hours", days, hours));

            let shifted = Duration::try_days(days)
                .and_then(|d| truncated.checked_add_signed(d))
                .ok_or_else(overflow)?;
            let shifted = Duration::try_hours(hours)
                .and_then(|h| shifted.checked_add_signed(h))
                .ok_or_else(overflow)?;

            resolve_local(&tz, shifted)
        }
    }
}

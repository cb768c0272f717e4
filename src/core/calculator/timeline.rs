//! Rolling nine-day timeline: yesterday through one week ahead.

use crate::errors::{AppError, AppResult};
use crate::utils::date::resolve_local;
use chrono::{DateTime, Duration, NaiveDate, TimeZone};

/// Days shown before today.
pub const DAYS_BEFORE: i64 = 1;
/// Days shown after today.
pub const DAYS_AFTER: i64 = 7;
/// Bars narrower than this (in percent) are widened so they stay visible.
pub const MIN_BAR_WIDTH: f64 = 2.0;
/// Upper bound on the day list of an arbitrary window.
pub const MAX_WINDOW_DAYS: usize = 366;

#[derive(Debug, Clone)]
pub struct TimelineWindow<Tz: TimeZone> {
    pub days: Vec<NaiveDate>,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Horizontal extent of a bar, both values in percent of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub left: f64,
    pub width: f64,
}

impl<Tz: TimeZone> TimelineWindow<Tz> {
    /// Window anchored on the local calendar day of `now`:
    /// starts at midnight of yesterday, ends 24h after midnight of day +7.
    pub fn around(now: &DateTime<Tz>) -> AppResult<Self> {
        let tz = now.timezone();
        let today = now.date_naive();

        let days: Vec<NaiveDate> = (-DAYS_BEFORE..=DAYS_AFTER)
            .map(|offset| {
                today
                    .checked_add_signed(Duration::days(offset))
                    .ok_or_else(|| AppError::InvalidDate(format!("{} {:+} days", today, offset)))
            })
            .collect::<AppResult<_>>()?;

        let first = days[0];
        let last = days[days.len() - 1];

        let start = resolve_local(&tz, first.and_time(chrono::NaiveTime::MIN))?;
        let end = resolve_local(&tz, last.and_time(chrono::NaiveTime::MIN))? + Duration::hours(24);

        Ok(Self { days, start, end })
    }

    /// Arbitrary window. An empty or inverted range is accepted and every
    /// position inside it is reported as 0. `days` lists at most
    /// `MAX_WINDOW_DAYS` dates; positions still use the full range.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        let first = start.date_naive();
        let days = if end > start {
            let last = end.date_naive();
            first
                .iter_days()
                .take_while(|d| *d <= last)
                .take(MAX_WINDOW_DAYS)
                .collect()
        } else {
            vec![first]
        };
        Self { days, start, end }
    }

    pub fn span_ms(&self) -> i64 {
        self.end.timestamp_millis() - self.start.timestamp_millis()
    }

    pub fn is_degenerate(&self) -> bool {
        self.span_ms() <= 0
    }

    /// Linear position of `t` in `[0, 100]`.
    pub fn position<T: TimeZone>(&self, t: &DateTime<T>) -> f64 {
        let span = self.span_ms();
        if span <= 0 {
            return 0.0;
        }

        let progress =
            (t.timestamp_millis() - self.start.timestamp_millis()) as f64 / span as f64 * 100.0;
        progress.clamp(0.0, 100.0)
    }

    pub fn bar<A: TimeZone, B: TimeZone>(&self, start_at: &DateTime<A>, end_at: &DateTime<B>) -> Bar {
        let left = self.position(start_at);
        let width = (self.position(end_at) - left).max(MIN_BAR_WIDTH);
        Bar { left, width }
    }

    /// Index of `today` inside `days`, if the window shows it.
    pub fn today_index(&self, today: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| *d == today)
    }
}

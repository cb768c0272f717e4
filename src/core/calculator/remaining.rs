use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until a deadline, minutes discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Remaining {
    Ended,
    Left { days: i64, hours: i64 },
}

impl Remaining {
    pub fn is_ended(&self) -> bool {
        matches!(self, Remaining::Ended)
    }
}

/// Whole days and whole hours-of-remainder from `now` until `end`.
/// `end == now` is not ended yet and reports zero days, zero hours.
pub fn remaining_time<A: TimeZone, B: TimeZone>(end: &DateTime<A>, now: &DateTime<B>) -> Remaining {
    let diff = end.timestamp_millis() - now.timestamp_millis();
    if diff < 0 {
        return Remaining::Ended;
    }

    Remaining::Left {
        days: diff / MS_PER_DAY,
        hours: (diff % MS_PER_DAY) / MS_PER_HOUR,
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{} {}", n, unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Remaining::Ended => write!(f, "ended"),
            Remaining::Left { days, hours } => {
                write!(f, "{}, {} left", plural(*days, "day"), plural(*hours, "hour"))
            }
        }
    }
}

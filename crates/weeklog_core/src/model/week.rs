//! Monday-aligned week arithmetic.
//!
//! # Responsibility
//! - Compute the last/current/next calendar week for a reference day.
//!
//! # Invariants
//! - `start` is always a Monday, `end` is always `start + 6` days.
//! - `week_after` never returns the reference day's own week, including when
//!   the reference day is itself a Monday.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One Monday-to-Sunday window, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    /// Iterates the seven days of this week in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let start = self.start;
        (0..7).map(move |offset| start + Duration::days(offset))
    }

    /// Whether `date` falls inside this week.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl Display for WeekRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Returns the week containing `date`.
pub fn week_of(date: NaiveDate) -> WeekRange {
    let weekday = i64::from(date.weekday().num_days_from_monday());
    let start = date - Duration::days(weekday);
    WeekRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Returns the week before the one containing `date`.
pub fn week_before(date: NaiveDate) -> WeekRange {
    let current = week_of(date);
    let start = current.start - Duration::days(7);
    WeekRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Returns the week after the one containing `date`.
///
/// Defined as `week_of(date).start + 7`, so a Monday reference day still
/// lands a full week ahead instead of degenerating to its own week (the
/// `(7 - weekday) % 7` distance formula would return the current Monday).
pub fn week_after(date: NaiveDate) -> WeekRange {
    let current = week_of(date);
    let start = current.start + Duration::days(7);
    WeekRange {
        start,
        end: start + Duration::days(6),
    }
}

/// Current week for the local calendar day.
pub fn current_week() -> WeekRange {
    week_of(Local::now().date_naive())
}

/// Last week for the local calendar day.
pub fn last_week() -> WeekRange {
    week_before(Local::now().date_naive())
}

/// Next week for the local calendar day.
pub fn next_week() -> WeekRange {
    week_after(Local::now().date_naive())
}

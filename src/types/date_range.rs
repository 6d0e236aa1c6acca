//! Defines [`DateRange`], the closed interval of civil dates that drives the
//! day-by-day historical fetch.

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use std::fmt;

/// A closed interval `[start, end]` of civil (calendar) dates.
///
/// The dates are interpreted in the station's civil timezone; each one is sent to
/// the observations endpoint verbatim as `YYYY-MM-DD`.
///
/// # Examples
///
/// ```
/// use meteo_lt::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let range = DateRange::new(start, end).unwrap();
///
/// assert_eq!(range.len_days(), 4); // leap day included
/// let days: Vec<String> = range.days_back().map(|d| d.to_string()).collect();
/// assert_eq!(days, ["2024-03-01", "2024-02-29", "2024-02-28", "2024-02-27"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, or `None` when `start` lies after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// The range ending on the civil date of `now` and starting `days` calendar
    /// days earlier, both taken in `now`'s own timezone.
    ///
    /// `trailing_days(now, 365)` therefore spans 366 dates, matching a
    /// "one year back from today, inclusive" window.
    pub fn trailing_days<Tz: TimeZone>(now: &DateTime<Tz>, days: u64) -> Option<Self> {
        let end = now.date_naive();
        let start = end.checked_sub_days(Days::new(days))?;
        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of civil dates in the range, both ends included.
    pub fn len_days(&self) -> u64 {
        // start <= end is a constructor invariant
        (self.end - self.start).num_days() as u64 + 1
    }

    /// Iterates from `end` down to `start`, one civil day at a time.
    pub fn days_back(&self) -> DaysBack {
        DaysBack {
            cursor: Some(self.end),
            start: self.start,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Backward iterator over a [`DateRange`], see [`DateRange::days_back`].
#[derive(Debug, Clone)]
pub struct DaysBack {
    cursor: Option<NaiveDate>,
    start: NaiveDate,
}

impl Iterator for DaysBack {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor.filter(|day| *day >= self.start)?;
        self.cursor = current.pred_opt();
        Some(current)
    }
}

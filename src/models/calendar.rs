//! Season calendar.
//!
//! Defines when a season may host games: a start date plus a set of
//! excluded (blocked) dates such as holidays.
//!
//! # Precedence
//! Excluded dates override rules. A date is playable for a rule iff:
//! - It falls on the rule's weekday, AND
//! - It is on or after the season start, AND
//! - It is NOT in `excluded_dates`.

use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Season start and blocked dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    /// First date on which games may be played.
    pub start_date: NaiveDate,
    /// Dates without games.
    pub excluded_dates: BTreeSet<NaiveDate>,
}

impl SeasonCalendar {
    /// Creates a calendar with no excluded dates.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            excluded_dates: BTreeSet::new(),
        }
    }

    /// Adds an excluded date.
    pub fn with_excluded(mut self, date: NaiveDate) -> Self {
        self.excluded_dates.insert(date);
        self
    }

    /// Whether games may be played on `date`.
    #[inline]
    pub fn is_playable(&self, date: NaiveDate) -> bool {
        date >= self.start_date && !self.excluded_dates.contains(&date)
    }

    /// Finds the first playable date on `weekday` at or after `from`.
    ///
    /// Excluded dates are skipped a week at a time. Since the excluded
    /// set is finite, the search ends after at most `excluded + 1` weeks.
    ///
    /// Returns `None` only if the search runs past [`NaiveDate::MAX`].
    pub fn next_playable(&self, from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
        let from = from.max(self.start_date);
        let offset = (7 + weekday.num_days_from_sunday() - from.weekday().num_days_from_sunday()) % 7;
        let mut date = from.checked_add_days(Days::new(u64::from(offset)))?;

        while self.excluded_dates.contains(&date) {
            date = date.checked_add_days(Days::new(7))?;
        }

        Some(date)
    }

    /// Finds the first playable date on `weekday` strictly after `after`.
    pub fn next_playable_after(&self, after: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
        self.next_playable(after.succ_opt()?, weekday)
    }
}

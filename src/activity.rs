use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::models::{ActivityDay, ActivityFlags, Intensity};

/// Per-day activity records. Days without a record count as no activity.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ActivityStore {
    #[serde(default)]
    days: BTreeMap<NaiveDate, ActivityFlags>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `flags` for `date`, replacing whatever was recorded before.
    pub fn record_day(&mut self, date: NaiveDate, flags: ActivityFlags) {
        tracing::debug!(%date, task = flags.task, learning = flags.learning, leetcode = flags.leetcode, "recording day");
        self.days.insert(date, flags);
    }

    pub fn day(&self, date: NaiveDate) -> Option<ActivityDay> {
        self.days.get(&date).map(|flags| ActivityDay { date, flags: *flags })
    }

    /// All recorded days in ascending date order.
    pub fn days(&self) -> impl Iterator<Item = ActivityDay> + '_ {
        self.days
            .iter()
            .map(|(date, flags)| ActivityDay { date: *date, flags: *flags })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn intensity(&self, date: NaiveDate) -> Intensity {
        self.days
            .get(&date)
            .map(Intensity::from_flags)
            .unwrap_or(Intensity::None)
    }

    /// Consecutive active days ending at `reference` (inclusive), walking backwards
    /// across month and year boundaries until the first inactive day.
    pub fn current_streak(&self, reference: NaiveDate) -> u32 {
        let earliest = match self.days.keys().next() {
            Some(d) => *d,
            None => return 0,
        };
        let mut streak = 0;
        let mut day = reference;
        while day >= earliest && self.intensity(day).is_active() {
            streak += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        streak
    }

    /// Number of active days inside a month.
    pub fn active_days_in(&self, month: &MonthView) -> usize {
        month
            .dates()
            .filter(|d| self.intensity(*d).is_active())
            .count()
    }
}

/// One cell of a rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Padding before the first day of the month.
    Blank,
    Day { date: NaiveDate, intensity: Intensity },
}

/// A displayed month. Navigating never touches stored activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    first: NaiveDate,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first| Self { first })
            .ok_or_else(|| TrackerError::Validation(format!("invalid month {}-{:02}", year, month)))
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self { first: date.with_day(1).unwrap_or(date) }
    }

    /// Parses `YYYY-MM`.
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || TrackerError::Validation(format!("invalid month '{}'. Use YYYY-MM.", s));
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.trim().parse().map_err(|_| invalid())?;
        let month: u32 = month.trim().parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Leap years included.
    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // only reachable at the very end of chrono's range
            None => 31,
        }
    }

    /// Blank cells before day 1 with weeks starting on Sunday.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn previous(&self) -> Self {
        match self.first.checked_sub_months(Months::new(1)) {
            Some(first) => Self { first },
            None => *self,
        }
    }

    pub fn next(&self) -> Self {
        match self.first.checked_add_months(Months::new(1)) {
            Some(first) => Self { first },
            None => *self,
        }
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let first = self.first;
        (0..self.days_in_month()).filter_map(move |i| first.checked_add_days(chrono::Days::new(i as u64)))
    }

    pub fn title(&self) -> String {
        self.first.format("%B %Y").to_string()
    }

    pub fn cells(&self, store: &ActivityStore) -> Vec<CalendarCell> {
        let mut cells: Vec<CalendarCell> = (0..self.first_weekday_offset())
            .map(|_| CalendarCell::Blank)
            .collect();
        cells.extend(self.dates().map(|date| CalendarCell::Day {
            date,
            intensity: store.intensity(date),
        }));
        cells
    }

    /// `cells` split into rows of seven, the last row padded with blanks.
    pub fn weeks(&self, store: &ActivityStore) -> Vec<[CalendarCell; 7]> {
        self.cells(store)
            .chunks(7)
            .map(|chunk| {
                let mut week = [CalendarCell::Blank; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

//! Month navigation and month-grid construction.
//!
//! The grid is a pure function of the visible month: Sunday-first weeks, blank
//! cells before day 1, one cell per day, and blank cells after the last day so
//! that every row has exactly seven cells.

use std::fmt;

use chrono::{Datelike, Days, Duration, NaiveDate};
use thiserror::Error;

use crate::format::month_name;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),
}

/// A year and one-based month that is known to exist on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
    last: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(Self::starting_at)
            .ok_or(CalendarError::InvalidYear(year))
    }

    /// Cursor for the month whose day 1 is `first`. December ends on the 31st
    /// so the last supported year still has a full December.
    fn starting_at(first: NaiveDate) -> Option<Self> {
        let last = if first.month() == 12 {
            first.with_day(31)
        } else {
            first.with_month(first.month() + 1).and_then(|next| next.pred_opt())
        }?;
        Some(Self { first, last })
    }

    /// The month a date falls in
    pub fn containing(date: NaiveDate) -> Self {
        let first = date - Duration::days(i64::from(date.day0()));
        // every month holding a valid date has a valid first and last day
        Self::starting_at(first).unwrap_or(Self { first, last: date })
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// One-based month number
    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn last_day(&self) -> NaiveDate {
        self.last
    }

    pub fn days_in_month(&self) -> u32 {
        (self.last - self.first).num_days() as u32 + 1
    }

    /// Weekday of day 1, Sunday = 0
    pub fn first_weekday(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first && date <= self.last
    }

    /// Move by `months` (negative goes back), wrapping across years.
    /// Stays put if the target falls outside the supported range.
    pub fn offset(&self, months: i32) -> Self {
        let index = i64::from(self.year()) * 12 + i64::from(self.month() - 1) + i64::from(months);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;

        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month).ok())
            .unwrap_or(*self)
    }

    pub fn previous(&self) -> Self {
        self.offset(-1)
    }

    pub fn next(&self) -> Self {
        self.offset(1)
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month()), self.year())
    }
}

/// One position in the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Blank cell before the first day of the month
    PaddingBefore,
    /// An actual day of the month
    Day(NaiveDate),
    /// Blank cell after the last day, completing the final week
    PaddingAfter,
}

impl CalendarCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            CalendarCell::Day(date) => Some(*date),
            _ => None,
        }
    }

    pub fn is_padding(&self) -> bool {
        self.date().is_none()
    }
}

/// The cells of one month, row-major, seven per week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub month: MonthCursor,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(7)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().filter_map(CalendarCell::date)
    }
}

/// Build the Sunday-first grid for `month`
pub fn build_month_grid(month: MonthCursor) -> MonthGrid {
    let leading = month.first_weekday() as usize;
    let days = month.days_in_month() as usize;
    let trailing = (7 - (leading + days) % 7) % 7;

    let mut cells = Vec::with_capacity(leading + days + trailing);
    cells.extend(std::iter::repeat(CalendarCell::PaddingBefore).take(leading));
    let first = month.first_day();
    cells.extend(
        (0..days as u64)
            .filter_map(|offset| first.checked_add_days(Days::new(offset)))
            .map(CalendarCell::Day),
    );
    cells.extend(std::iter::repeat(CalendarCell::PaddingAfter).take(trailing));

    MonthGrid { month, cells }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(year: i32, month: u32) -> MonthCursor {
        MonthCursor::new(year, month).unwrap()
    }

    #[test]
    fn test_rejects_invalid_month() {
        assert_eq!(MonthCursor::new(2024, 0), Err(CalendarError::InvalidMonth(0)));
        assert_eq!(MonthCursor::new(2024, 13), Err(CalendarError::InvalidMonth(13)));
    }

    #[test]
    fn test_containing_covers_the_last_supported_month() {
        let december = MonthCursor::containing(NaiveDate::MAX);
        assert_eq!(december.month(), 12);
        assert_eq!(december.days_in_month(), 31);
        assert!(december.contains(NaiveDate::MAX));

        let grid = build_month_grid(december);
        assert_eq!(grid.cells.len() % 7, 0);
        assert_eq!(grid.days().count(), 31);
        assert_eq!(grid.days().last(), Some(NaiveDate::MAX));

        let march = MonthCursor::containing(NaiveDate::from_ymd_opt(2024, 3, 17).unwrap());
        assert_eq!(march, cursor(2024, 3));
    }

    #[test]
    fn test_days_in_month() {
        let cases = [
            (2024, 1, 31),
            (2024, 2, 29),
            (2023, 2, 28),
            (1900, 2, 28),
            (2000, 2, 29),
            (2024, 4, 30),
            (2024, 12, 31),
        ];
        for (year, month, expected) in cases {
            assert_eq!(cursor(year, month).days_in_month(), expected, "{}-{}", year, month);
        }
    }

    #[test]
    fn test_grid_shape_for_every_month_of_several_years() {
        for year in [1999, 2000, 2023, 2024, 2025, 2100] {
            for month in 1..=12 {
                let cursor = cursor(year, month);
                let grid = build_month_grid(cursor);

                assert_eq!(grid.cells.len() % 7, 0, "{}", cursor);
                assert_eq!(grid.days().count() as u32, cursor.days_in_month(), "{}", cursor);

                let leading = grid
                    .cells
                    .iter()
                    .take_while(|cell| **cell == CalendarCell::PaddingBefore)
                    .count();
                assert_eq!(leading as u32, cursor.first_weekday());

                let days: Vec<NaiveDate> = grid.days().collect();
                assert_eq!(days.first(), Some(&cursor.first_day()));
                assert_eq!(days.last(), Some(&cursor.last_day()));
                assert!(days.windows(2).all(|pair| pair[0].succ_opt() == Some(pair[1])));
            }
        }
    }

    #[test]
    fn test_june_2024_layout() {
        // June 1st 2024 is a Saturday
        let grid = build_month_grid(cursor(2024, 6));
        assert_eq!(grid.cells.len(), 42);
        assert!(grid.cells[..6].iter().all(|cell| *cell == CalendarCell::PaddingBefore));
        assert_eq!(grid.cells[6].date(), NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(grid.cells[35].date(), NaiveDate::from_ymd_opt(2024, 6, 30));
        assert!(grid.cells[36..].iter().all(|cell| *cell == CalendarCell::PaddingAfter));
        assert_eq!(grid.weeks().count(), 6);
    }

    #[test]
    fn test_february_2015_fits_four_weeks() {
        let grid = build_month_grid(cursor(2015, 2));
        assert_eq!(grid.cells.len(), 28);
        assert!(grid.cells.iter().all(|cell| !cell.is_padding()));
    }

    #[test]
    fn test_grid_is_idempotent() {
        let month = cursor(2024, 3);
        assert_eq!(build_month_grid(month), build_month_grid(month));
    }

    #[test]
    fn test_navigation_wraps_years() {
        assert_eq!(cursor(2024, 1).previous(), cursor(2023, 12));
        assert_eq!(cursor(2024, 12).next(), cursor(2025, 1));
        assert_eq!(cursor(2024, 6).offset(-18), cursor(2022, 12));
        assert_eq!(cursor(2024, 6).offset(0), cursor(2024, 6));
    }

    #[test]
    fn test_contains_and_containing() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let month = MonthCursor::containing(date);
        assert_eq!(month, cursor(2024, 6));
        assert!(month.contains(date));
        assert!(!month.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!(cursor(2024, 6).to_string(), "June 2024");
    }
}

//! Puzzle dates: defaults and release availability
//!
//! Puzzles unlock at midnight in the UTC-5 zone, so "today" is always taken
//! there rather than in the local time zone.

use crate::cli::PuzzleArgs;
use crate::error::CliError;
use chrono::{Datelike, NaiveDate, TimeDelta, Utc};

/// First year of the event
pub const FIRST_YEAR: u16 = 2015;

/// Last puzzle day of an event
pub const LAST_DAY: u8 = 25;

/// Offset of the release time zone from UTC, in hours
const RELEASE_UTC_OFFSET_HOURS: i64 = -5;

/// A single puzzle, identified by year and day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PuzzleDate {
    pub year: u16,
    pub day: u8,
}

impl PuzzleDate {
    /// Fill in missing day/year from `today`
    pub fn resolve(args: PuzzleArgs, today: NaiveDate) -> Self {
        let defaults = Self::default_for(today);
        Self {
            year: args.year.unwrap_or(defaults.year),
            day: args.day.unwrap_or(defaults.day),
        }
    }

    /// The current year; today's day during December 1 to 25, day 1 otherwise
    pub fn default_for(today: NaiveDate) -> Self {
        let day = if today.month() == 12 && today.day() <= u32::from(LAST_DAY) {
            today.day() as u8
        } else {
            1
        };
        Self {
            year: today.year() as u16,
            day,
        }
    }

    /// Whether the puzzle has been released as of `today`
    pub fn is_available(&self, today: NaiveDate) -> bool {
        if !(1..=LAST_DAY).contains(&self.day) || self.year < FIRST_YEAR {
            return false;
        }

        let current_year = today.year();
        let year = i32::from(self.year);
        if year < current_year {
            return true;
        }

        year == current_year && today.month() == 12 && today.day() >= u32::from(self.day)
    }

    /// Pass the date through if released, otherwise `CliError::Unavailable`
    pub fn ensure_available(self, today: NaiveDate) -> Result<Self, CliError> {
        if self.is_available(today) {
            Ok(self)
        } else {
            Err(CliError::Unavailable {
                year: self.year,
                day: self.day,
            })
        }
    }
}

/// Today's date in the puzzle release time zone
pub fn today() -> NaiveDate {
    (Utc::now() + TimeDelta::hours(RELEASE_UTC_OFFSET_HOURS)).date_naive()
}

/// Every released day of `year`, in order
pub fn released_days(year: u16, today: NaiveDate) -> Vec<u8> {
    (1..=LAST_DAY)
        .filter(|&day| PuzzleDate { year, day }.is_available(today))
        .collect()
}

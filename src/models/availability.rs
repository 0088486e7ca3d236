// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recurring (year-less) availability windows and their anchoring to
//! concrete calendar years.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// A calendar day within a month, with no year attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayMonth {
    // Field order matters: derived Ord compares month first.
    month: u32,
    day: u32,
}

impl DayMonth {
    /// Build a day/month pair, rejecting days that never occur (Feb 30, Apr 31...).
    pub fn new(day: u32, month: u32) -> Result<Self, AvailabilityError> {
        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(AvailabilityError::OutOfRange { day, month }),
        };
        if day == 0 || day > max_day {
            return Err(AvailabilityError::OutOfRange { day, month });
        }
        Ok(Self { month, day })
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Apply a concrete year. 29 February falls back to the 28th in
    /// non-leap years.
    pub fn anchor(&self, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
            .or_else(|| NaiveDate::from_ymd_opt(year, self.month, self.day - 1))
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

impl FromStr for DayMonth {
    type Err = AvailabilityError;

    /// Accepts `dd/mm`, `d/m`, `dd-mm`, `dd/mm/yyyy`, `yyyy-mm-dd` and ISO
    /// datetimes. Any year present is discarded.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let s = raw.trim();
        let malformed = || AvailabilityError::Malformed(raw.to_string());

        // ISO datetime: keep the date part only
        let date_part = s.split(['T', ' ']).next().unwrap_or(s);

        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            return Self::new(date.day(), date.month());
        }
        if let Ok(date) = NaiveDate::parse_from_str(date_part, "%d/%m/%Y") {
            return Self::new(date.day(), date.month());
        }

        let parts: Vec<&str> = date_part.split(['/', '-']).collect();
        if parts.len() != 2 {
            return Err(malformed());
        }
        let day = parts[0].trim().parse::<u32>().map_err(|_| malformed())?;
        let month = parts[1].trim().parse::<u32>().map_err(|_| malformed())?;
        Self::new(day, month)
    }
}

/// An availability window that recurs every year, e.g. a festival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnualWindow {
    pub start: DayMonth,
    pub end: DayMonth,
}

/// One concrete occurrence of an [`AnnualWindow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchoredWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl AnchoredWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// True if any day of `start..=end` falls inside this occurrence.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}

impl AnnualWindow {
    /// The day/month pair marking an attraction as open all year.
    pub const YEAR_ROUND: AnnualWindow = AnnualWindow {
        start: DayMonth { month: 12, day: 1 },
        end: DayMonth { month: 12, day: 31 },
    };

    pub fn parse(start: &str, end: &str) -> Result<Self, AvailabilityError> {
        Ok(Self {
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    pub fn is_year_round(&self) -> bool {
        *self == Self::YEAR_ROUND
    }

    /// True when the window's end day/month precedes its start (Dec 20 → Jan 5).
    pub fn crosses_year_boundary(&self) -> bool {
        self.end < self.start
    }

    /// The occurrence that starts in `year`.
    pub fn anchor(&self, year: i32) -> AnchoredWindow {
        let end_year = if self.crosses_year_boundary() {
            year + 1
        } else {
            year
        };
        AnchoredWindow {
            start: self.start.anchor(year),
            end: self.end.anchor(end_year),
        }
    }

    /// Anchor the window for comparison against a trip.
    ///
    /// The occurrence starting in `anchor_year` is used, except that a
    /// year-crossing window whose previous occurrence still covers the
    /// trip's first known date (`trip_start`, else `trip_end`) uses that
    /// previous occurrence. If `trip_start` falls after the chosen
    /// occurrence, the next year's occurrence is used.
    pub fn anchor_for_trip(
        &self,
        anchor_year: i32,
        trip_start: Option<NaiveDate>,
        trip_end: Option<NaiveDate>,
    ) -> AnchoredWindow {
        let window = self.anchor(anchor_year);

        let Some(first_day) = trip_start.or(trip_end) else {
            return window;
        };

        if self.crosses_year_boundary() {
            let previous = self.anchor(anchor_year - 1);
            if first_day <= previous.end {
                return previous;
            }
        }

        match trip_start {
            // Anchored afresh so 29 February survives into leap years
            Some(start) if start > window.end => self.anchor(anchor_year + 1),
            _ => window,
        }
    }
}

/// Errors from parsing availability data.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("Malformed day/month value: {0:?}")]
    Malformed(String),

    #[error("Day/month out of range: {day}/{month}")]
    OutOfRange { day: u32, month: u32 },
}

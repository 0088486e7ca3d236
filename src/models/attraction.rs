// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Attraction model as delivered by the attraction-selection collaborator.

use crate::models::availability::{AnnualWindow, AvailabilityError};
use serde::{Deserialize, Serialize};

/// A selectable attraction with its (optional) recurring availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    /// Opaque identifier (compared for duplicate detection)
    pub id: String,
    /// Display label
    pub name: String,
    /// Window start as day/month, e.g. "15/04"
    #[serde(default)]
    pub availability_start: Option<String>,
    /// Window end as day/month, e.g. "20/04"
    #[serde(default)]
    pub availability_end: Option<String>,
    /// Daily opening hours, e.g. "8:00 AM - 5:00 PM"
    #[serde(default)]
    pub opening_hours: Option<String>,
}

/// Calendar constraint of an attraction after parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Open all year (sentinel window or no window given)
    YearRound,
    /// Recurring window
    Seasonal(AnnualWindow),
}

impl Attraction {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            availability_start: None,
            availability_end: None,
            opening_hours: None,
        }
    }

    /// Attach a recurring availability window ("dd/mm" endpoints).
    pub fn with_window(mut self, start: &str, end: &str) -> Self {
        self.availability_start = Some(start.to_string());
        self.availability_end = Some(end.to_string());
        self
    }

    pub fn with_opening_hours(mut self, hours: &str) -> Self {
        self.opening_hours = Some(hours.to_string());
        self
    }

    /// Parse the availability window.
    ///
    /// A missing endpoint is treated as year-round. Parse failures are
    /// returned so the caller can decide to log and ignore them.
    pub fn availability(&self) -> Result<Availability, AvailabilityError> {
        let (Some(start), Some(end)) = (&self.availability_start, &self.availability_end) else {
            return Ok(Availability::YearRound);
        };

        let window = AnnualWindow::parse(start, end)?;
        if window.is_year_round() {
            Ok(Availability::YearRound)
        } else {
            Ok(Availability::Seasonal(window))
        }
    }

    /// Quick check that tolerates malformed data (malformed counts as
    /// unconstrained, same as year-round).
    pub fn is_year_round(&self) -> bool {
        !matches!(self.availability(), Ok(Availability::Seasonal(_)))
    }
}

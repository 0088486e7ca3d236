// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Opening-hours advisories for scheduled visits.
//!
//! Unlike date-window rejections these never block anything: a visit
//! scheduled outside an attraction's daily hours is reported so the UI can
//! flag it.

use crate::models::{Attraction, ItineraryResult, TimelineEntry};
use crate::time_utils::parse_time_label;
use chrono::NaiveTime;
use serde::Serialize;
use std::str::FromStr;

/// Daily opening hours. `close` before `open` means the spot closes after
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl OpeningHours {
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.open <= self.close {
            self.open <= time && time <= self.close
        } else {
            time >= self.open || time <= self.close
        }
    }
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let compact: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if compact.ends_with("AM") || compact.ends_with("PM") {
        NaiveTime::parse_from_str(&compact, "%I:%M%p").ok()
    } else {
        NaiveTime::parse_from_str(&compact, "%H:%M").ok()
    }
}

impl FromStr for OpeningHours {
    type Err = HoursError;

    /// Accepts `8:00 AM - 5:00 PM` and `08:00 - 17:00`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let malformed = || HoursError::Malformed(raw.to_string());
        let (open, close) = raw.split_once(['-', '–']).ok_or_else(malformed)?;
        Ok(Self {
            open: parse_clock(open).ok_or_else(malformed)?,
            close: parse_clock(close).ok_or_else(malformed)?,
        })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HoursError {
    #[error("Unrecognized opening hours: {0:?}")]
    Malformed(String),
}

/// A visit scheduled while the attraction is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisory {
    pub day: Option<u32>,
    pub attraction_id: String,
    pub attraction_name: String,
    pub time: String,
    pub opening_hours: String,
    pub message: String,
}

/// Check every timed visit against its attraction's opening hours.
///
/// Visits are matched to attractions by id, falling back to the name.
pub fn opening_hours_advisories(
    itinerary: &ItineraryResult,
    attractions: &[Attraction],
) -> Vec<Advisory> {
    let mut advisories = Vec::new();

    for entry in &itinerary.timeline {
        let TimelineEntry::Visit(stop) = entry else {
            continue;
        };

        let attraction = attractions.iter().find(|a| match &stop.attraction_id {
            Some(id) => &a.id == id,
            None => a.name == stop.name,
        });
        let Some(attraction) = attraction else {
            continue;
        };
        let Some(raw_hours) = attraction.opening_hours.as_deref() else {
            continue;
        };

        let hours = match raw_hours.parse::<OpeningHours>() {
            Ok(hours) => hours,
            Err(e) => {
                tracing::warn!(attraction_id = %attraction.id, error = %e, "Ignoring opening hours");
                continue;
            }
        };

        let Some(label) = stop.time.as_deref() else {
            continue;
        };
        let Some(time) = parse_time_label(label) else {
            continue;
        };

        if !hours.contains(time) {
            advisories.push(Advisory {
                day: stop.day,
                attraction_id: attraction.id.clone(),
                attraction_name: attraction.name.clone(),
                time: label.to_string(),
                opening_hours: raw_hours.to_string(),
                message: format!(
                    "\"{}\" is scheduled at {} but is open {}",
                    attraction.name, label, raw_hours
                ),
            });
        }
    }

    advisories
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip date validation against attraction availability windows.
//!
//! Two operations:
//! 1. `validate` gates a candidate trip window. Rejections are values,
//!    not errors, and carry a reason suitable for display.
//! 2. `suggest_dates` proposes a default window from the selection.
//!
//! Both are pure with respect to their inputs; "today" is fixed when the
//! validator is built.

use crate::models::{Attraction, Availability};
use crate::time_utils::format_dmy;
use chrono::{Datelike, Days, NaiveDate};

/// Outcome of validating a trip window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateVerdict {
    Accepted,
    Rejected(Rejection),
}

impl DateVerdict {
    pub fn is_ok(&self) -> bool {
        matches!(self, DateVerdict::Accepted)
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            DateVerdict::Accepted => None,
            DateVerdict::Rejected(rejection) => Some(rejection),
        }
    }

    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            DateVerdict::Accepted => Ok(()),
            DateVerdict::Rejected(rejection) => Err(rejection),
        }
    }
}

/// A user-correctable rejection of a trip window.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct Rejection {
    pub kind: RejectionKind,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionKind {
    StartAfterEnd,
    /// Trip starts after the event's occurrence is over
    EventAlreadyEnded { attraction_id: String },
    /// Trip ends before the event starts
    EventNotStarted { attraction_id: String },
}

impl RejectionKind {
    pub fn code(&self) -> &'static str {
        match self {
            RejectionKind::StartAfterEnd => "start_after_end",
            RejectionKind::EventAlreadyEnded { .. } => "event_already_ended",
            RejectionKind::EventNotStarted { .. } => "event_not_started",
        }
    }
}

/// Proposed trip window; both `None` clears the dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestedWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// Validates trip windows relative to a fixed "today".
#[derive(Debug, Clone, Copy)]
pub struct DateWindowValidator {
    today: NaiveDate,
}

impl DateWindowValidator {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Check a candidate trip window against every selected attraction.
    pub fn validate(
        &self,
        trip_start: Option<NaiveDate>,
        trip_end: Option<NaiveDate>,
        attractions: &[Attraction],
    ) -> DateVerdict {
        if trip_start.is_none() && trip_end.is_none() {
            return DateVerdict::Accepted;
        }

        if let (Some(start), Some(end)) = (trip_start, trip_end) {
            if start > end {
                return DateVerdict::Rejected(Rejection {
                    kind: RejectionKind::StartAfterEnd,
                    reason: "The start date must not be after the end date".to_string(),
                });
            }
        }

        let anchor_year = trip_start.map_or(self.today.year(), |d| d.year());

        for attraction in attractions {
            let window = match attraction.availability() {
                Ok(Availability::YearRound) => continue,
                Ok(Availability::Seasonal(window)) => window,
                Err(e) => {
                    tracing::warn!(
                        attraction_id = %attraction.id,
                        error = %e,
                        "Ignoring malformed availability window"
                    );
                    continue;
                }
            };

            let occurrence = window.anchor_for_trip(anchor_year, trip_start, trip_end);

            if let Some(start) = trip_start {
                if start > occurrence.end {
                    return DateVerdict::Rejected(Rejection {
                        kind: RejectionKind::EventAlreadyEnded {
                            attraction_id: attraction.id.clone(),
                        },
                        reason: format!(
                            "\"{}\" ends on {}, but the trip starts on {}",
                            attraction.name,
                            format_dmy(occurrence.end),
                            format_dmy(start)
                        ),
                    });
                }
            }

            if let Some(end) = trip_end {
                if end < occurrence.start {
                    return DateVerdict::Rejected(Rejection {
                        kind: RejectionKind::EventNotStarted {
                            attraction_id: attraction.id.clone(),
                        },
                        reason: format!(
                            "Too early: \"{}\" starts on {}, but the trip ends on {}",
                            attraction.name,
                            format_dmy(occurrence.start),
                            format_dmy(end)
                        ),
                    });
                }
            }
        }

        DateVerdict::Accepted
    }

    /// Propose a trip window for the current selection.
    ///
    /// Seasonal attractions win: the proposal spans from the earliest
    /// anchored start to the latest anchored end. Otherwise the trip
    /// starts at `existing_start` (or today) and lasts one day per
    /// selected attraction, at least one.
    pub fn suggest_dates(
        &self,
        existing_start: Option<NaiveDate>,
        attractions: &[Attraction],
    ) -> SuggestedWindow {
        if attractions.is_empty() {
            return SuggestedWindow::default();
        }

        let reference = existing_start.unwrap_or(self.today);

        let union = attractions
            .iter()
            .filter_map(|attraction| match attraction.availability() {
                Ok(Availability::Seasonal(window)) => {
                    Some(window.anchor_for_trip(reference.year(), Some(reference), None))
                }
                Ok(Availability::YearRound) => None,
                Err(e) => {
                    tracing::warn!(
                        attraction_id = %attraction.id,
                        error = %e,
                        "Ignoring malformed availability window"
                    );
                    None
                }
            })
            .fold(None, |acc: Option<(NaiveDate, NaiveDate)>, w| match acc {
                None => Some((w.start, w.end)),
                Some((start, end)) => Some((start.min(w.start), end.max(w.end))),
            });

        if let Some((start, end)) = union {
            tracing::debug!(%start, %end, "Suggesting seasonal trip window");
            return SuggestedWindow {
                start: Some(start),
                end: Some(end),
            };
        }

        let days = attractions.len().max(1) as u64;
        let end = reference
            .checked_add_days(Days::new(days))
            .unwrap_or(reference);
        SuggestedWindow {
            start: Some(reference),
            end: Some(end),
        }
    }
}

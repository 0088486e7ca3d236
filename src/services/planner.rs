// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip draft: the attraction selection plus the trip window being composed.
//!
//! Every change goes through the date validator and is committed only when
//! accepted, so a rejected edit leaves the previous state untouched.

use crate::models::Attraction;
use crate::services::date_window::{DateWindowValidator, Rejection};
use chrono::NaiveDate;

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Ordered attraction selection (insertion order) and trip window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TripDraft {
    selection: Vec<Attraction>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl TripDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &[Attraction] {
        &self.selection
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn contains(&self, attraction_id: &str) -> bool {
        self.selection.iter().any(|a| a.id == attraction_id)
    }

    /// Add the attraction if absent, remove it if present.
    ///
    /// Both directions re-derive the trip window from the new selection.
    /// An add whose derived window fails validation is rejected and nothing
    /// changes.
    pub fn toggle(
        &mut self,
        attraction: Attraction,
        validator: &DateWindowValidator,
    ) -> Result<ToggleOutcome, Rejection> {
        if self.contains(&attraction.id) {
            self.selection.retain(|a| a.id != attraction.id);
            let suggestion = validator.suggest_dates(self.start, &self.selection);
            self.start = suggestion.start;
            self.end = suggestion.end;
            tracing::debug!(attraction_id = %attraction.id, "Removed attraction from trip");
            return Ok(ToggleOutcome::Removed);
        }

        let mut candidate = self.selection.clone();
        candidate.push(attraction);

        let suggestion = validator.suggest_dates(self.start, &candidate);
        validator
            .validate(suggestion.start, suggestion.end, &candidate)
            .into_result()?;

        self.selection = candidate;
        self.start = suggestion.start;
        self.end = suggestion.end;
        Ok(ToggleOutcome::Added)
    }

    /// Set the trip window directly (user typed dates).
    pub fn set_dates(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        validator: &DateWindowValidator,
    ) -> Result<(), Rejection> {
        if let Err(rejection) = validator.validate(start, end, &self.selection).into_result() {
            tracing::debug!(reason = %rejection.reason, "Rejected trip date change");
            return Err(rejection);
        }
        self.start = start;
        self.end = end;
        Ok(())
    }
}

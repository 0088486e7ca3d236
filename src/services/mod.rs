// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod date_window;
pub mod hours;
pub mod planner;
pub mod projection;
pub mod viewport;

pub use date_window::{DateVerdict, DateWindowValidator, Rejection, RejectionKind, SuggestedWindow};
pub use hours::{opening_hours_advisories, Advisory, OpeningHours};
pub use planner::{ToggleOutcome, TripDraft};
pub use projection::{color_for_day, day_summaries, project, project_itinerary};
pub use viewport::{fit_viewport, BoundingBoxFitter, FitError, Viewport, ViewportFitter};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API consumed by the trip-planning front end.

use crate::error::{AppError, Result};
use crate::models::{Attraction, DaySummary, ItineraryResult, RenderModel, TimelineEntry};
use crate::services::{
    day_summaries, fit_viewport, opening_hours_advisories, project_itinerary, Advisory,
    DateVerdict, Viewport,
};
use crate::time_utils::deserialize_optional_trip_date;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/trip/validate", post(validate_dates))
        .route("/api/trip/suggest-dates", post(suggest_dates))
        .route("/api/itinerary/projection", post(get_projection))
        .route("/api/itinerary/geojson", post(get_geojson))
}

fn check_selection_size(state: &AppState, attractions: &[Attraction]) -> Result<()> {
    let max = state.config.max_selected_attractions;
    if attractions.len() > max {
        return Err(AppError::BadRequest(format!(
            "Too many attractions: {} (max {})",
            attractions.len(),
            max
        )));
    }
    Ok(())
}

// ─── Date Validation ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDatesRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trip_date")]
    pub trip_start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_trip_date")]
    pub trip_end: Option<NaiveDate>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
}

/// `{ok: true}` or `{ok: false, reason, kind}`.
#[derive(Debug, Serialize)]
pub struct VerdictResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl From<DateVerdict> for VerdictResponse {
    fn from(verdict: DateVerdict) -> Self {
        match verdict {
            DateVerdict::Accepted => Self {
                ok: true,
                reason: None,
                kind: None,
            },
            DateVerdict::Rejected(rejection) => Self {
                ok: false,
                kind: Some(rejection.kind.code()),
                reason: Some(rejection.reason),
            },
        }
    }
}

/// Validate a candidate trip window. Rejections are a 200 with `ok: false`.
async fn validate_dates(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ValidateDatesRequest>,
) -> Result<Json<VerdictResponse>> {
    check_selection_size(&state, &params.attractions)?;

    let verdict =
        state
            .validator()
            .validate(params.trip_start, params.trip_end, &params.attractions);

    if let Some(rejection) = verdict.rejection() {
        tracing::info!(kind = rejection.kind.code(), "Trip window rejected");
    }

    Ok(Json(verdict.into()))
}

// ─── Date Suggestion ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestDatesRequest {
    #[serde(default, deserialize_with = "deserialize_optional_trip_date")]
    pub trip_start: Option<NaiveDate>,
    #[serde(default)]
    pub attractions: Vec<Attraction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

async fn suggest_dates(
    State(state): State<Arc<AppState>>,
    Json(params): Json<SuggestDatesRequest>,
) -> Result<Json<SuggestionResponse>> {
    check_selection_size(&state, &params.attractions)?;

    let suggestion = state
        .validator()
        .suggest_dates(params.trip_start, &params.attractions);

    Ok(Json(SuggestionResponse {
        start_date: suggestion.start,
        end_date: suggestion.end,
    }))
}

// ─── Map Projection ──────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionRequest {
    pub itinerary: ItineraryResult,
    #[validate(range(min = 1, message = "Focus day is 1-based"))]
    #[serde(default)]
    pub focus_day: Option<u32>,
    /// Used for opening-hours advisories only
    #[serde(default)]
    pub attractions: Vec<Attraction>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    #[serde(flatten)]
    pub model: RenderModel,
    /// `None` if the bounds could not be framed
    pub viewport: Option<Viewport>,
    pub days: Vec<DaySummary>,
    pub timeline: Vec<TimelineEntry>,
    pub advisories: Vec<Advisory>,
    pub total_days: u32,
    pub total_destinations: usize,
}

async fn get_projection(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ProjectionRequest>,
) -> Result<Json<ProjectionResponse>> {
    params.validate()?;
    check_selection_size(&state, &params.attractions)?;

    let itinerary = &params.itinerary;
    tracing::debug!(
        total_days = itinerary.total_days,
        focus_day = ?params.focus_day,
        "Projecting itinerary"
    );

    let model = project_itinerary(itinerary, params.focus_day);
    let viewport = fit_viewport(&state.fitter, &model);

    Ok(Json(ProjectionResponse {
        viewport,
        days: day_summaries(itinerary),
        timeline: itinerary
            .timeline_for_day(params.focus_day)
            .into_iter()
            .cloned()
            .collect(),
        advisories: opening_hours_advisories(itinerary, &params.attractions),
        total_days: itinerary.total_days,
        total_destinations: itinerary.total_destinations(),
        model,
    }))
}

/// Same projection, exported as a GeoJSON FeatureCollection.
async fn get_geojson(
    State(state): State<Arc<AppState>>,
    Json(params): Json<ProjectionRequest>,
) -> Result<Json<geojson::FeatureCollection>> {
    params.validate()?;
    check_selection_size(&state, &params.attractions)?;

    let model = project_itinerary(&params.itinerary, params.focus_day);
    Ok(Json(model.to_geojson()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Rejection, RejectionKind};

    #[test]
    fn test_verdict_response_shapes() {
        let ok: VerdictResponse = DateVerdict::Accepted.into();
        assert_eq!(serde_json::to_value(&ok).unwrap(), serde_json::json!({"ok": true}));

        let rejected: VerdictResponse = DateVerdict::Rejected(Rejection {
            kind: RejectionKind::StartAfterEnd,
            reason: "nope".to_string(),
        })
        .into();
        assert_eq!(
            serde_json::to_value(&rejected).unwrap(),
            serde_json::json!({"ok": false, "reason": "nope", "kind": "start_after_end"})
        );
    }

    #[test]
    fn test_focus_day_zero_fails_validation() {
        let request: ProjectionRequest =
            serde_json::from_str(r#"{"itinerary": {"totalDays": 1}, "focusDay": 0}"#).unwrap();
        assert!(request.validate().is_err());
    }
}

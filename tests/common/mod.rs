// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use itinerary_engine::config::Config;
use itinerary_engine::models::ItineraryResult;
use itinerary_engine::routes::create_router;
use itinerary_engine::AppState;
use std::sync::Arc;

/// Create a test app with the default test configuration.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default()));
    (create_router(state.clone()), state)
}

/// Raw JSON of the two-day sample itinerary.
#[allow(dead_code)]
pub fn sample_itinerary_json() -> String {
    std::fs::read_to_string("tests/fixtures/itinerary_two_days.json")
        .expect("Failed to read itinerary fixture")
}

/// The two-day sample itinerary, parsed.
#[allow(dead_code)]
pub fn sample_itinerary() -> ItineraryResult {
    serde_json::from_str(&sample_itinerary_json()).expect("Failed to parse itinerary fixture")
}

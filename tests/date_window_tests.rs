// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip-window validation regression tests.
//!
//! Covers the calendar edge cases that are easy to break: windows spanning
//! New Year, occurrences already over this year, and the union rule for
//! suggested dates.

use chrono::{Days, NaiveDate};
use itinerary_engine::models::{Attraction, AnnualWindow, Availability};
use itinerary_engine::services::{DateVerdict, DateWindowValidator, RejectionKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn validator() -> DateWindowValidator {
    DateWindowValidator::new(date(2026, 1, 10))
}

/// Every day of `year`, stepping by `step` days.
fn days_of_year(year: i32, step: u64) -> impl Iterator<Item = NaiveDate> {
    let first = date(year, 1, 1);
    (0..366u64)
        .step_by(step as usize)
        .filter_map(move |offset| first.checked_add_days(Days::new(offset)))
        .filter(move |d| d.format("%Y").to_string() == year.to_string())
}

#[test]
fn test_year_round_never_fails() {
    let v = validator();
    let attractions = vec![
        Attraction::new("a", "Museum").with_window("01/12", "31/12"),
        Attraction::new("b", "Temple"),
    ];

    for start in days_of_year(2026, 5) {
        for length in [0u64, 1, 7, 40] {
            let end = start + Days::new(length);
            assert!(
                v.validate(Some(start), Some(end), &attractions).is_ok(),
                "year-round rejected {start}..{end}"
            );
        }
        assert!(v.validate(Some(start), None, &attractions).is_ok());
        assert!(v.validate(None, Some(start), &attractions).is_ok());
    }
}

#[test]
fn test_trip_inside_window_succeeds() {
    let v = validator();
    let windows = [("15/04", "20/04"), ("01/01", "31/01"), ("20/12", "05/01"), ("25/02", "10/03")];

    for (start_dm, end_dm) in windows {
        let attraction = Attraction::new("f", "Festival").with_window(start_dm, end_dm);
        let Ok(Availability::Seasonal(window)) = attraction.availability() else {
            panic!("expected seasonal window for {start_dm}-{end_dm}");
        };

        for year in 2025..=2028 {
            let occurrence = window.anchor(year);
            let mut day = occurrence.start;
            while day <= occurrence.end {
                let end = occurrence.end;
                assert!(
                    v.validate(Some(day), Some(end), std::slice::from_ref(&attraction))
                        .is_ok(),
                    "{start_dm}-{end_dm}: trip {day}..{end} inside {occurrence:?} rejected"
                );
                day = day + Days::new(1);
            }
        }
    }
}

#[test]
fn test_validation_is_repeatable() {
    let v = validator();
    let attractions = vec![Attraction::new("f", "Festival").with_window("01/03", "05/03")];
    let first = v.validate(Some(date(2026, 3, 10)), Some(date(2026, 3, 12)), &attractions);
    let second = v.validate(Some(date(2026, 3, 10)), Some(date(2026, 3, 12)), &attractions);
    assert_eq!(first, second);
    assert!(!first.is_ok());
}

#[test]
fn test_new_year_window_accepts_early_january_trip() {
    let v = validator();
    let attractions = vec![Attraction::new("t", "Tet Flower Street").with_window("20/12", "05/01")];

    assert!(v.validate(Some(date(2027, 1, 2)), None, &attractions).is_ok());
    assert!(v
        .validate(Some(date(2027, 1, 2)), Some(date(2027, 1, 4)), &attractions)
        .is_ok());
    assert!(v
        .validate(Some(date(2026, 12, 28)), Some(date(2027, 1, 3)), &attractions)
        .is_ok());

    // Mid-January lies between two occurrences
    let verdict = v.validate(Some(date(2027, 1, 10)), Some(date(2027, 1, 12)), &attractions);
    assert!(matches!(
        verdict.rejection().map(|r| &r.kind),
        Some(RejectionKind::EventNotStarted { .. })
    ));
}

#[test]
fn test_new_year_window_accepts_end_only_trip() {
    let v = DateWindowValidator::new(date(2026, 1, 2));
    let attractions = vec![Attraction::new("t", "Tet Flower Street").with_window("20/12", "05/01")];

    // The occurrence that began last December is still running
    assert!(v.validate(None, Some(date(2026, 1, 3)), &attractions).is_ok());
    assert!(v.validate(None, Some(date(2025, 12, 24)), &attractions).is_ok());

    // After it closes, the next occurrence has not started yet
    let verdict = v.validate(None, Some(date(2026, 1, 10)), &attractions);
    let rejection = verdict.rejection().expect("should reject");
    assert!(rejection.reason.contains("20/12/2026"));
}

#[test]
fn test_passed_window_reanchors_to_next_year() {
    let v = validator();
    let attractions = vec![Attraction::new("f", "Kite Festival").with_window("01/03", "05/03")];

    // Trip ends before next year's occurrence starts
    let verdict = v.validate(Some(date(2026, 3, 10)), Some(date(2026, 3, 12)), &attractions);
    let DateVerdict::Rejected(rejection) = verdict else {
        panic!("expected rejection");
    };
    assert_eq!(
        rejection.kind,
        RejectionKind::EventNotStarted {
            attraction_id: "f".to_string()
        }
    );
    assert!(rejection.reason.contains("Kite Festival"));
    assert!(rejection.reason.contains("01/03/2027"));
    assert!(rejection.reason.contains("12/03/2026"));

    // Open-ended or long enough trips reach the next occurrence
    assert!(v.validate(Some(date(2026, 3, 10)), None, &attractions).is_ok());
    assert!(v
        .validate(Some(date(2026, 3, 10)), Some(date(2027, 3, 2)), &attractions)
        .is_ok());
}

#[test]
fn test_first_failing_attraction_is_reported() {
    let v = validator();
    let attractions = vec![
        Attraction::new("ok", "Museum"),
        Attraction::new("late", "Summer Fair").with_window("01/07", "05/07"),
        Attraction::new("later", "Autumn Fair").with_window("01/10", "05/10"),
    ];
    let verdict = v.validate(Some(date(2026, 6, 1)), Some(date(2026, 6, 3)), &attractions);
    assert_eq!(
        verdict.rejection().map(|r| r.kind.clone()),
        Some(RejectionKind::EventNotStarted {
            attraction_id: "late".to_string()
        })
    );
}

/// Accepted exactly when the trip shares at least one day with some
/// occurrence of the window: the start and end checks never both pass
/// for a trip that misses every occurrence.
#[test]
fn test_acceptance_matches_overlap() {
    let v = validator();
    let windows = [("15/04", "20/04"), ("20/12", "05/01"), ("28/02", "02/03"), ("10/11", "10/11")];

    for (start_dm, end_dm) in windows {
        let window = AnnualWindow::parse(start_dm, end_dm).unwrap();
        let attraction = Attraction::new("f", "Festival").with_window(start_dm, end_dm);

        for start in days_of_year(2026, 3) {
            for length in [0u64, 2, 9, 30] {
                let end = start + Days::new(length);
                let overlaps = (2025..=2027).any(|y| window.anchor(y).overlaps(start, end));
                let accepted = v
                    .validate(Some(start), Some(end), std::slice::from_ref(&attraction))
                    .is_ok();
                assert_eq!(
                    accepted, overlaps,
                    "{start_dm}-{end_dm}: trip {start}..{end} accepted={accepted} overlaps={overlaps}"
                );
            }
        }
    }
}

#[test]
fn test_suggest_prefers_seasonal_window() {
    let v = validator();
    let attractions = vec![
        Attraction::new("m", "Museum"),
        Attraction::new("f", "Flower Festival").with_window("15/04", "20/04"),
    ];
    let suggestion = v.suggest_dates(None, &attractions);
    assert_eq!(suggestion.start, Some(date(2026, 4, 15)));
    assert_eq!(suggestion.end, Some(date(2026, 4, 20)));
}

#[test]
fn test_suggest_after_window_uses_next_occurrence() {
    // Today is past this year's occurrence: the next one is proposed
    let v = DateWindowValidator::new(date(2026, 5, 1));
    let attractions = vec![
        Attraction::new("m", "Museum"),
        Attraction::new("f", "Flower Festival").with_window("15/04", "20/04"),
    ];
    let suggestion = v.suggest_dates(None, &attractions);
    assert_eq!(suggestion.start, Some(date(2027, 4, 15)));
    assert_eq!(suggestion.end, Some(date(2027, 4, 20)));
    assert!(v
        .validate(suggestion.start, suggestion.end, &attractions)
        .is_ok());
}

#[test]
fn test_suggest_then_validate_accepts() {
    let v = validator();
    let attractions = vec![
        Attraction::new("a", "Spring Fair").with_window("15/04", "20/04"),
        Attraction::new("b", "Tet Flower Street").with_window("20/12", "05/01"),
        Attraction::new("c", "Museum"),
    ];
    let suggestion = v.suggest_dates(Some(date(2026, 2, 1)), &attractions);
    assert_eq!(suggestion.start, Some(date(2026, 4, 15)));
    assert_eq!(suggestion.end, Some(date(2027, 1, 5)));
    assert!(v
        .validate(suggestion.start, suggestion.end, &attractions)
        .is_ok());
}

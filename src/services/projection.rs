// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route projection: turns a multi-day itinerary into a render model.
//!
//! Handles:
//! 1. Focus-day filtering of markers and segments
//! 2. Deterministic per-day colors with reserved start/return colors
//! 3. Stroke treatment per segment kind
//! 4. Bounds for viewport framing, never degenerate on a single point
//!
//! Nothing here fails: missing or invalid geometry yields a smaller model.

use crate::models::{
    Color, ColoredSegment, DaySummary, ItineraryResult, LatLon, MapPoint, Marker, PointRole,
    RenderModel, RouteSegment,
};
use crate::models::render::StrokeStyle;
use geo::{Distance, Haversine};
use std::collections::{BTreeMap, BTreeSet};

/// Day colors, rotated by `(day - 1) % len`.
pub const DAY_PALETTE: [Color; 5] = [
    Color("#3b82f6"),
    Color("#8b5cf6"),
    Color("#ec4899"),
    Color("#f59e0b"),
    Color("#10b981"),
];

/// Reserved for the start marker, outside the rotation.
pub const START_COLOR: Color = Color("#16a34a");

/// Reserved for return legs, overrides the day color.
pub const RETURN_COLOR: Color = Color("#6b7280");

/// Offset (degrees, both axes) of the synthesized second bounds point.
pub const SINGLE_POINT_OFFSET: f64 = 0.01;

const DASH_PATTERN: &str = "10, 10";
const SOLID_WEIGHT: u32 = 5;
const DASHED_WEIGHT: u32 = 3;
const NORMAL_OPACITY: f64 = 0.8;
const RETURN_OPACITY: f64 = 0.5;

/// Palette color of a day. Independent of which days are visible.
pub fn color_for_day(day: u32) -> Color {
    let index = day.saturating_sub(1) as usize % DAY_PALETTE.len();
    DAY_PALETTE[index]
}

/// Flights and return legs are dashed and thinner; return legs are faded.
pub fn stroke_style(segment: &RouteSegment) -> StrokeStyle {
    let is_return = segment.is_return_leg();
    let dashed = is_return || segment.is_flight();
    StrokeStyle {
        dash_array: dashed.then_some(DASH_PATTERN),
        weight: if dashed { DASHED_WEIGHT } else { SOLID_WEIGHT },
        opacity: if is_return {
            RETURN_OPACITY
        } else {
            NORMAL_OPACITY
        },
    }
}

fn marker_color(point: &MapPoint) -> Color {
    match point.role {
        PointRole::Start => START_COLOR,
        PointRole::Visit | PointRole::Special => color_for_day(point.day.unwrap_or(1)),
    }
}

fn finite_points(points: impl IntoIterator<Item = LatLon>) -> Vec<LatLon> {
    points.into_iter().filter(LatLon::is_finite).collect()
}

/// Build the render model.
///
/// With `focus_day` unset every marker and day is visible. With a focus day
/// only start markers and that day's markers and segments remain.
pub fn project(
    locations: &[MapPoint],
    routes_by_day: &BTreeMap<u32, Vec<RouteSegment>>,
    full_path: &[LatLon],
    focus_day: Option<u32>,
) -> RenderModel {
    let points: Vec<Marker> = locations
        .iter()
        .filter(|p| p.position.is_finite())
        .filter(|p| match focus_day {
            None => true,
            Some(day) => p.role == PointRole::Start || p.day == Some(day),
        })
        .map(|p| Marker {
            color: marker_color(p),
            point: p.clone(),
        })
        .collect();

    let segments: Vec<ColoredSegment> = routes_by_day
        .iter()
        .filter(|(day, _)| focus_day.is_none_or(|focus| focus == **day))
        .flat_map(|(&day, day_segments)| {
            day_segments.iter().filter_map(move |segment| {
                let path = finite_points(segment.path.points());
                if path.is_empty() {
                    return None;
                }
                let is_return = segment.is_return_leg();
                Some(ColoredSegment {
                    day,
                    points: path,
                    kind: segment.kind,
                    is_return,
                    color: if is_return {
                        RETURN_COLOR
                    } else {
                        color_for_day(day)
                    },
                    style: stroke_style(segment),
                })
            })
        })
        .collect();

    let bounds = compute_bounds(&points, &segments, full_path, focus_day);

    tracing::debug!(
        focus_day = ?focus_day,
        points = points.len(),
        segments = segments.len(),
        bounds = bounds.len(),
        "Projected itinerary"
    );

    RenderModel {
        points,
        segments,
        bounds,
    }
}

/// Segment geometry first, then the whole-trip path (unfocused only),
/// then the marker positions.
fn compute_bounds(
    points: &[Marker],
    segments: &[ColoredSegment],
    full_path: &[LatLon],
    focus_day: Option<u32>,
) -> Vec<LatLon> {
    let mut bounds: Vec<LatLon> = segments
        .iter()
        .flat_map(|s| s.points.iter().copied())
        .collect();

    if bounds.is_empty() && focus_day.is_none() {
        bounds = finite_points(full_path.iter().copied());
    }

    if bounds.is_empty() {
        bounds = points.iter().map(|m| m.point.position).collect();
    }

    if let [only] = bounds.as_slice() {
        let second = only.offset(SINGLE_POINT_OFFSET);
        bounds.push(second);
    }

    bounds
}

/// Project an itinerary result directly.
pub fn project_itinerary(itinerary: &ItineraryResult, focus_day: Option<u32>) -> RenderModel {
    project(
        &itinerary.locations(),
        &itinerary.routes,
        &itinerary.full_path,
        focus_day,
    )
}

/// Great-circle length of a path in kilometers.
pub fn path_length_km(points: &[LatLon]) -> f64 {
    points
        .windows(2)
        .map(|pair| Haversine.distance(pair[0].to_point(), pair[1].to_point()))
        .sum::<f64>()
        / 1000.0
}

/// One summary per trip day (1..=total_days, plus any extra route days).
pub fn day_summaries(itinerary: &ItineraryResult) -> Vec<DaySummary> {
    let mut days: BTreeSet<u32> = (1..=itinerary.total_days).collect();
    days.extend(itinerary.routes.keys().copied());

    let locations = itinerary.locations();

    days.into_iter()
        .map(|day| {
            let day_segments = itinerary.routes.get(&day).map(Vec::as_slice).unwrap_or(&[]);
            let distance_km = day_segments
                .iter()
                .map(|segment| path_length_km(&finite_points(segment.path.points())))
                .sum();
            DaySummary {
                day,
                color: color_for_day(day),
                visits: locations
                    .iter()
                    .filter(|p| p.role == PointRole::Visit && p.day == Some(day))
                    .count(),
                segments: day_segments.len(),
                distance_km,
            }
        })
        .collect()
}

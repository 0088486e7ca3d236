// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary result model (produced by the upstream tour generator).
//!
//! The upstream payload is loosely typed: coordinates arrive as `[lat, lon]`
//! pairs or `{lat, lon}` objects, route segments as objects, bare
//! coordinate arrays or encoded polylines. Everything is normalized into
//! explicit types here so the projection code never probes field presence.

use crate::models::render::{MapPoint, PointRole};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Polyline precision used by the route generator (same as Google/Strava).
const POLYLINE_PRECISION: u32 = 5;

/// A WGS84 coordinate. Serialized as `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLonRepr", into = "[f64; 2]")]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLonRepr {
    Pair([f64; 2]),
    /// `[lat, lon, elevation]`; elevation is dropped
    WithElevation([f64; 3]),
    Object { lat: f64, lon: f64 },
}

impl From<LatLonRepr> for LatLon {
    fn from(repr: LatLonRepr) -> Self {
        match repr {
            LatLonRepr::Pair([lat, lon]) | LatLonRepr::WithElevation([lat, lon, _]) => {
                Self { lat, lon }
            }
            LatLonRepr::Object { lat, lon } => Self { lat, lon },
        }
    }
}

impl From<LatLon> for [f64; 2] {
    fn from(p: LatLon) -> Self {
        [p.lat, p.lon]
    }
}

impl From<geo::Coord<f64>> for LatLon {
    fn from(c: geo::Coord<f64>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// geo uses x = longitude, y = latitude.
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }

    pub fn offset(self, delta: f64) -> Self {
        Self {
            lat: self.lat + delta,
            lon: self.lon + delta,
        }
    }
}

/// Classification of a path segment, governing its visual treatment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Flight,
    Return,
    /// Unknown kinds render as normal travel
    #[default]
    #[serde(other)]
    Normal,
}

/// Geometry of a segment, as delivered.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentPath {
    Coordinates(Vec<LatLon>),
    /// Encoded polyline, precision 5
    Encoded(String),
}

impl SegmentPath {
    /// Decode into coordinates. An undecodable polyline yields no points.
    pub fn points(&self) -> Vec<LatLon> {
        match self {
            SegmentPath::Coordinates(points) => points.clone(),
            SegmentPath::Encoded(encoded) => {
                match polyline::decode_polyline(encoded, POLYLINE_PRECISION) {
                    Ok(line) => line.0.into_iter().map(LatLon::from).collect(),
                    Err(e) => {
                        tracing::warn!(error = %e, "Dropping undecodable route polyline");
                        Vec::new()
                    }
                }
            }
        }
    }
}

/// One leg of a day's route.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "SegmentRepr")]
pub struct RouteSegment {
    pub path: SegmentPath,
    pub kind: SegmentKind,
    /// Leg back to the starting point
    pub is_return: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Coordinates(Vec<LatLon>),
    Encoded(String),
}

impl Default for PathRepr {
    fn default() -> Self {
        PathRepr::Coordinates(Vec::new())
    }
}

impl From<PathRepr> for SegmentPath {
    fn from(repr: PathRepr) -> Self {
        match repr {
            PathRepr::Coordinates(points) => SegmentPath::Coordinates(points),
            PathRepr::Encoded(encoded) => SegmentPath::Encoded(encoded),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentRepr {
    Detailed {
        #[serde(default, alias = "polyline", alias = "coordinates")]
        path: PathRepr,
        #[serde(default)]
        kind: SegmentKind,
        #[serde(default, rename = "isReturn", alias = "is_return")]
        is_return: bool,
    },
    Bare(PathRepr),
    /// Anything else (`"path": null`, bad coordinates...). Must stay last.
    Invalid(IgnoredAny),
}

impl From<SegmentRepr> for RouteSegment {
    fn from(repr: SegmentRepr) -> Self {
        match repr {
            SegmentRepr::Detailed {
                path,
                kind,
                is_return,
            } => Self {
                path: path.into(),
                kind,
                is_return,
            },
            SegmentRepr::Bare(path) => Self {
                path: path.into(),
                kind: SegmentKind::Normal,
                is_return: false,
            },
            SegmentRepr::Invalid(_) => {
                tracing::warn!("Dropping malformed route segment");
                Self::new(Vec::new())
            }
        }
    }
}

impl RouteSegment {
    pub fn new(points: Vec<LatLon>) -> Self {
        Self {
            path: SegmentPath::Coordinates(points),
            kind: SegmentKind::Normal,
            is_return: false,
        }
    }

    pub fn encoded(polyline: impl Into<String>) -> Self {
        Self {
            path: SegmentPath::Encoded(polyline.into()),
            kind: SegmentKind::Normal,
            is_return: false,
        }
    }

    pub fn with_kind(mut self, kind: SegmentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn returning(mut self) -> Self {
        self.is_return = true;
        self
    }

    /// A return leg is either flagged or tagged as such.
    pub fn is_return_leg(&self) -> bool {
        self.is_return || self.kind == SegmentKind::Return
    }

    pub fn is_flight(&self) -> bool {
        self.kind == SegmentKind::Flight
    }
}

/// Header entry opening a day in the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMarker {
    pub day: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    /// Calendar date label, e.g. "15/04/2026"
    #[serde(default)]
    pub date: Option<String>,
}

/// A timed stop in the timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    #[serde(default)]
    pub day: Option<u32>,
    /// Time label, e.g. "09:30"
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    /// Upstream VISIT entries carry this as `id`
    #[serde(default, alias = "id", deserialize_with = "string_or_number")]
    pub attraction_id: Option<String>,
}

impl Stop {
    pub fn position(&self) -> Option<LatLon> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)).filter(LatLon::is_finite),
            _ => None,
        }
    }

    fn to_map_point(&self, role: PointRole) -> Option<MapPoint> {
        let position = self.position()?;
        let day = match role {
            PointRole::Start => None,
            _ => Some(self.day?),
        };
        Some(MapPoint {
            position,
            role,
            day,
            name: self.name.clone(),
            time: self.time.clone(),
            image_url: self.image_url.clone(),
        })
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Timeline entry, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEntry {
    DayStart(DayMarker),
    Start(Stop),
    Visit(Stop),
    Travel(Stop),
    WakeUp(Stop),
    Lunch(Stop),
    Dinner(Stop),
    Sleep(Stop),
}

impl TimelineEntry {
    pub fn day(&self) -> Option<u32> {
        match self {
            TimelineEntry::DayStart(marker) => Some(marker.day),
            TimelineEntry::Start(stop)
            | TimelineEntry::Visit(stop)
            | TimelineEntry::Travel(stop)
            | TimelineEntry::WakeUp(stop)
            | TimelineEntry::Lunch(stop)
            | TimelineEntry::Dinner(stop)
            | TimelineEntry::Sleep(stop) => stop.day,
        }
    }

    /// The map marker this entry contributes, if it has coordinates.
    pub fn map_point(&self) -> Option<MapPoint> {
        match self {
            TimelineEntry::Start(stop) => stop.to_map_point(PointRole::Start),
            TimelineEntry::Visit(stop) => stop.to_map_point(PointRole::Visit),
            TimelineEntry::Lunch(stop) | TimelineEntry::Dinner(stop) | TimelineEntry::Sleep(stop) => {
                stop.to_map_point(PointRole::Special)
            }
            TimelineEntry::DayStart(_) | TimelineEntry::Travel(_) | TimelineEntry::WakeUp(_) => None,
        }
    }
}

/// Computed trip, consumed as an opaque resolved value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryResult {
    pub total_days: u32,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    /// Day index (1-based) to that day's segments
    #[serde(default)]
    pub routes: BTreeMap<u32, Vec<RouteSegment>>,
    /// Whole-trip path, used for framing when no segment is visible
    #[serde(default)]
    pub full_path: Vec<LatLon>,
    #[serde(default)]
    pub start_point: Option<LatLon>,
    #[serde(default)]
    pub total_distance_km: Option<f64>,
}

impl ItineraryResult {
    /// All map markers of the trip, in timeline order.
    ///
    /// If the timeline carries no `START` entry with coordinates, the
    /// `startPoint` field supplies the start marker, named after the
    /// `START` entry when there is one.
    pub fn locations(&self) -> Vec<MapPoint> {
        let mut points: Vec<MapPoint> = self
            .timeline
            .iter()
            .filter_map(TimelineEntry::map_point)
            .collect();

        let has_start = points.iter().any(|p| p.role == PointRole::Start);
        if !has_start {
            if let Some(position) = self.start_point.filter(LatLon::is_finite) {
                let start_stop = self.timeline.iter().find_map(|entry| match entry {
                    TimelineEntry::Start(stop) => Some(stop),
                    _ => None,
                });
                points.insert(
                    0,
                    MapPoint {
                        position,
                        role: PointRole::Start,
                        day: None,
                        name: start_stop
                            .map_or_else(|| "Start".to_string(), |stop| stop.name.clone()),
                        time: start_stop.and_then(|stop| stop.time.clone()),
                        image_url: None,
                    },
                );
            }
        }
        points
    }

    /// Timeline narrowed to one day, or the whole timeline.
    pub fn timeline_for_day(&self, focus_day: Option<u32>) -> Vec<&TimelineEntry> {
        self.timeline
            .iter()
            .filter(|entry| focus_day.is_none() || entry.day() == focus_day)
            .collect()
    }

    /// Number of visits, counted across the whole timeline.
    pub fn total_destinations(&self) -> usize {
        self.timeline
            .iter()
            .filter(|entry| matches!(entry, TimelineEntry::Visit(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latlon_accepts_pair_and_object() {
        let pair: LatLon = serde_json::from_str("[10.5, 106.7]").unwrap();
        let object: LatLon = serde_json::from_str(r#"{"lat": 10.5, "lon": 106.7}"#).unwrap();
        assert_eq!(pair, object);
        assert_eq!(serde_json::to_string(&pair).unwrap(), "[10.5,106.7]");
    }

    #[test]
    fn test_segment_shapes() {
        let detailed: RouteSegment =
            serde_json::from_str(r#"{"path": [[1.0, 2.0], [3.0, 4.0]], "kind": "flight", "isReturn": true}"#)
                .unwrap();
        assert!(detailed.is_flight());
        assert!(detailed.is_return_leg());
        assert_eq!(detailed.path.points().len(), 2);

        let bare: RouteSegment = serde_json::from_str("[[1.0, 2.0]]").unwrap();
        assert_eq!(bare.kind, SegmentKind::Normal);
        assert!(!bare.is_return_leg());

        let unknown_kind: RouteSegment =
            serde_json::from_str(r#"{"path": [], "kind": "ferry"}"#).unwrap();
        assert_eq!(unknown_kind.kind, SegmentKind::Normal);
    }

    #[test]
    fn test_segment_kind_wire_names() {
        assert_eq!(serde_json::to_value(SegmentKind::Flight).unwrap(), "flight");
        assert_eq!(serde_json::to_value(SegmentKind::Normal).unwrap(), "normal");
        let kind: SegmentKind = serde_json::from_str(r#""return""#).unwrap();
        assert_eq!(kind, SegmentKind::Return);
    }

    #[test]
    fn test_malformed_segments_degrade_to_empty() {
        let json = r#"[
            {"path": null},
            {"kind": "flight"},
            {"path": [[10.0, 106.0, 5.0], [10.1, 106.1, 7.5]]},
            [[10.0, 106.0], "oops"],
            42,
            [[10.2, 106.2], [10.3, 106.3]]
        ]"#;
        let segments: Vec<RouteSegment> = serde_json::from_str(json).unwrap();
        assert_eq!(segments.len(), 6);

        let lengths: Vec<usize> = segments.iter().map(|s| s.path.points().len()).collect();
        assert_eq!(lengths, vec![0, 0, 2, 0, 0, 2]);
        assert!(segments[1].is_flight());
        assert_eq!(segments[2].path.points()[1], LatLon::new(10.1, 106.1));
    }

    #[test]
    fn test_encoded_polyline_decodes_lat_lon_order() {
        // Google's reference example: (38.5, -120.2), (40.7, -120.95), (43.252, -126.453)
        let segment = RouteSegment::encoded("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
        let points = segment.path.points();
        assert_eq!(points.len(), 3);
        assert!((points[0].lat - 38.5).abs() < 1e-6);
        assert!((points[0].lon + 120.2).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_encoded_polyline_is_empty() {
        let segment = RouteSegment::encoded("invalid!!!");
        assert!(segment.path.points().is_empty());
    }

    #[test]
    fn test_return_kind_counts_as_return_leg() {
        let segment = RouteSegment::new(vec![]).with_kind(SegmentKind::Return);
        assert!(segment.is_return_leg());
        assert!(!segment.is_flight());
    }

    #[test]
    fn test_timeline_entry_tags() {
        let json = r#"[
            {"type": "DAY_START", "day": 1, "name": "Day 1", "date": "15/04/2026"},
            {"type": "START", "name": "Hotel", "lat": 10.0, "lon": 106.0},
            {"type": "VISIT", "day": 1, "time": "09:00", "name": "Pagoda", "lat": 10.1, "lon": 106.1, "attractionId": 42},
            {"type": "LUNCH", "day": 1, "time": "12:00", "name": "Lunch"},
            {"type": "SLEEP", "day": 1, "name": "Inn", "lat": 10.2, "lon": 106.2}
        ]"#;
        let entries: Vec<TimelineEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].day(), Some(1));

        let start = entries[1].map_point().unwrap();
        assert_eq!(start.role, PointRole::Start);
        assert_eq!(start.day, None);

        match &entries[2] {
            TimelineEntry::Visit(stop) => assert_eq!(stop.attraction_id.as_deref(), Some("42")),
            other => panic!("expected visit, got {:?}", other),
        }

        // The tour generator names the attraction key `id`
        let visit: TimelineEntry =
            serde_json::from_str(r#"{"type": "VISIT", "day": 1, "name": "Pagoda", "id": 7}"#).unwrap();
        match visit {
            TimelineEntry::Visit(stop) => assert_eq!(stop.attraction_id.as_deref(), Some("7")),
            other => panic!("expected visit, got {:?}", other),
        }

        // Lunch without coordinates contributes no marker
        assert!(entries[3].map_point().is_none());
        assert_eq!(entries[4].map_point().unwrap().role, PointRole::Special);
    }

    #[test]
    fn test_start_point_fallback() {
        let itinerary = ItineraryResult {
            total_days: 1,
            timeline: vec![],
            routes: BTreeMap::new(),
            full_path: vec![],
            start_point: Some(LatLon::new(10.0, 106.0)),
            total_distance_km: None,
        };
        let points = itinerary.locations();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].role, PointRole::Start);
    }

    #[test]
    fn test_routes_keys_parse_from_strings() {
        let json = r#"{"totalDays": 2, "routes": {"2": [[[1.0, 1.0]]], "1": []}}"#;
        let itinerary: ItineraryResult = serde_json::from_str(json).unwrap();
        let days: Vec<u32> = itinerary.routes.keys().copied().collect();
        assert_eq!(days, vec![1, 2]);
    }
}

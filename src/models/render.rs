// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Render model handed to the map view.

use crate::models::itinerary::{LatLon, SegmentKind};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(pub &'static str);

impl Color {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Role of a marker on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum PointRole {
    Start,
    Visit,
    Special,
}

/// A marker candidate. `day` is `None` only for the start marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    pub position: LatLon,
    pub role: PointRole,
    pub day: Option<u32>,
    pub name: String,
    pub time: Option<String>,
    pub image_url: Option<String>,
}

/// A visible marker with its assigned color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    #[serde(flatten)]
    pub point: MapPoint,
    pub color: Color,
}

/// Stroke treatment of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeStyle {
    /// SVG dash pattern, `None` for a solid line
    pub dash_array: Option<&'static str>,
    pub weight: u32,
    pub opacity: f64,
}

impl StrokeStyle {
    pub fn is_dashed(&self) -> bool {
        self.dash_array.is_some()
    }
}

/// A visible, colored route segment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoredSegment {
    pub day: u32,
    pub points: Vec<LatLon>,
    pub kind: SegmentKind,
    pub is_return: bool,
    pub color: Color,
    pub style: StrokeStyle,
}

/// Derived, ephemeral structure consumed directly by the map view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderModel {
    pub points: Vec<Marker>,
    pub segments: Vec<ColoredSegment>,
    /// Coordinates to fit the viewport to; never a single point
    pub bounds: Vec<LatLon>,
}

/// Per-day overview shown next to the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: u32,
    pub color: Color,
    pub visits: usize,
    pub segments: usize,
    pub distance_km: f64,
}

impl RenderModel {
    /// Export as a GeoJSON FeatureCollection: Point features for markers,
    /// LineString features for segments, styling kept in properties.
    pub fn to_geojson(&self) -> FeatureCollection {
        let markers = self.points.iter().map(|marker| {
            let mut properties = JsonObject::new();
            properties.insert("role".to_string(), serde_json::json!(marker.point.role));
            properties.insert("name".to_string(), JsonValue::from(marker.point.name.clone()));
            properties.insert("day".to_string(), serde_json::json!(marker.point.day));
            properties.insert("time".to_string(), serde_json::json!(marker.point.time));
            properties.insert("color".to_string(), JsonValue::from(marker.color.as_str()));
            feature(
                geojson::Value::from(&marker.point.position.to_point()),
                properties,
            )
        });

        let lines = self.segments.iter().map(|segment| {
            let line: geo::LineString<f64> = segment
                .points
                .iter()
                .map(|p| geo::Coord { x: p.lon, y: p.lat })
                .collect();
            let mut properties = JsonObject::new();
            properties.insert("day".to_string(), JsonValue::from(segment.day));
            properties.insert("kind".to_string(), serde_json::json!(segment.kind));
            properties.insert("isReturn".to_string(), JsonValue::from(segment.is_return));
            properties.insert("color".to_string(), JsonValue::from(segment.color.as_str()));
            properties.insert("weight".to_string(), JsonValue::from(segment.style.weight));
            properties.insert("opacity".to_string(), JsonValue::from(segment.style.opacity));
            properties.insert(
                "dashArray".to_string(),
                serde_json::json!(segment.style.dash_array),
            );
            feature(geojson::Value::from(&line), properties)
        });

        FeatureCollection {
            bbox: None,
            features: markers.chain(lines).collect(),
            foreign_members: None,
        }
    }
}

fn feature(value: geojson::Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> RenderModel {
        RenderModel {
            points: vec![Marker {
                point: MapPoint {
                    position: LatLon::new(10.0, 106.0),
                    role: PointRole::Start,
                    day: None,
                    name: "Hotel".to_string(),
                    time: None,
                    image_url: None,
                },
                color: Color("#16a34a"),
            }],
            segments: vec![ColoredSegment {
                day: 1,
                points: vec![LatLon::new(10.0, 106.0), LatLon::new(10.5, 106.5)],
                kind: SegmentKind::Normal,
                is_return: false,
                color: Color("#3b82f6"),
                style: StrokeStyle {
                    dash_array: None,
                    weight: 5,
                    opacity: 0.8,
                },
            }],
            bounds: vec![],
        }
    }

    #[test]
    fn test_geojson_feature_per_marker_and_segment() {
        let collection = sample_model().to_geojson();
        assert_eq!(collection.features.len(), 2);

        let point = &collection.features[0];
        match &point.geometry.as_ref().unwrap().value {
            geojson::Value::Point(position) => {
                // GeoJSON positions are [lon, lat]
                assert_eq!(position[0], 106.0);
                assert_eq!(position[1], 10.0);
            }
            other => panic!("expected point, got {:?}", other),
        }
        assert_eq!(
            point.property("color").and_then(|v| v.as_str()),
            Some("#16a34a")
        );

        let line = &collection.features[1];
        assert!(matches!(
            line.geometry.as_ref().unwrap().value,
            geojson::Value::LineString(_)
        ));
        assert_eq!(line.property("day").and_then(|v| v.as_u64()), Some(1));
    }

    #[test]
    fn test_marker_serializes_flat() {
        let model = sample_model();
        let json = serde_json::to_value(&model.points[0]).unwrap();
        assert_eq!(json["role"], "start");
        assert_eq!(json["color"], "#16a34a");
        assert_eq!(json["position"], serde_json::json!([10.0, 106.0]));
    }
}

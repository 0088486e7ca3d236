// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod attraction;
pub mod availability;
pub mod itinerary;
pub mod render;

pub use attraction::{Attraction, Availability};
pub use availability::{AnchoredWindow, AnnualWindow, DayMonth};
pub use itinerary::{ItineraryResult, LatLon, RouteSegment, SegmentKind, TimelineEntry};
pub use render::{Color, ColoredSegment, DaySummary, MapPoint, Marker, PointRole, RenderModel};

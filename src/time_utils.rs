// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

/// Format a date the way trip dates are shown to users: `dd/mm/yyyy`.
pub fn format_dmy(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a trip date given as ISO `yyyy-mm-dd` or `dd/mm/yyyy`.
pub fn parse_trip_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
}

/// Parse a timeline time label such as `09:30`.
pub fn parse_time_label(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").ok()
}

/// Today's calendar date at a fixed UTC offset.
pub fn today_at_offset(offset_minutes: i32) -> NaiveDate {
    let now = Utc::now();
    match FixedOffset::east_opt(offset_minutes.saturating_mul(60)) {
        Some(offset) => now.with_timezone(&offset).date_naive(),
        None => now.date_naive(),
    }
}

/// Serde helper for optional trip dates in request bodies.
pub fn deserialize_optional_trip_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_trip_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date {s:?}, expected yyyy-mm-dd"))),
    }
}

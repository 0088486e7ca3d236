// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Itinerary engine: trip date validation and route map projection
//!
//! This crate checks a chosen travel window against attraction availability
//! (recurring festivals included) and turns a computed multi-day itinerary
//! into a color-coded, day-filterable map render model.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{BoundingBoxFitter, DateWindowValidator};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub fitter: BoundingBoxFitter,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            fitter: BoundingBoxFitter::default(),
        }
    }

    /// Validator anchored on the current local date.
    pub fn validator(&self) -> DateWindowValidator {
        DateWindowValidator::new(self.config.today())
    }
}

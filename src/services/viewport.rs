// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Viewport framing boundary.
//!
//! The projection only produces a list of bounds; turning it into a view is
//! the map layer's job. `fit_viewport` is the one place a fit failure is
//! absorbed: it is logged and the render model is left as it was.

use crate::models::{LatLon, RenderModel};
use geo::{BoundingRect, MultiPoint};
use serde::Serialize;

/// Fits a view to a set of coordinates.
pub trait ViewportFitter {
    type Viewport;

    fn fit(&self, bounds: &[LatLon]) -> Result<Self::Viewport, FitError>;
}

/// Errors a fitter may report on unusable input.
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("No coordinates to fit")]
    Empty,

    #[error("Non-finite coordinate in bounds")]
    NonFinite,

    #[error("Degenerate bounds: {0}")]
    Degenerate(String),
}

/// Fit the model's bounds, logging and swallowing any failure.
pub fn fit_viewport<F: ViewportFitter>(fitter: &F, model: &RenderModel) -> Option<F::Viewport> {
    match fitter.fit(&model.bounds) {
        Ok(viewport) => Some(viewport),
        Err(e) => {
            tracing::warn!(
                error = %e,
                bounds = model.bounds.len(),
                "Viewport fit failed, keeping current view"
            );
            None
        }
    }
}

/// South-west / north-east corners of a view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub south_west: LatLon,
    pub north_east: LatLon,
}

/// Axis-aligned bounding box, grown by a fraction of its size on each side.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBoxFitter {
    pub padding_ratio: f64,
}

impl Default for BoundingBoxFitter {
    fn default() -> Self {
        Self { padding_ratio: 0.1 }
    }
}

impl ViewportFitter for BoundingBoxFitter {
    type Viewport = Viewport;

    fn fit(&self, bounds: &[LatLon]) -> Result<Viewport, FitError> {
        if bounds.iter().any(|p| !p.is_finite()) {
            return Err(FitError::NonFinite);
        }

        let multi: MultiPoint<f64> = bounds.iter().map(|p| p.to_point()).collect();
        let rect = multi.bounding_rect().ok_or(FitError::Empty)?;

        let width = rect.width();
        let height = rect.height();
        if width == 0.0 && height == 0.0 {
            return Err(FitError::Degenerate(format!(
                "all {} points coincide",
                bounds.len()
            )));
        }

        let pad_lon = width * self.padding_ratio;
        let pad_lat = height * self.padding_ratio;
        Ok(Viewport {
            south_west: LatLon::new(rect.min().y - pad_lat, rect.min().x - pad_lon),
            north_east: LatLon::new(rect.max().y + pad_lat, rect.max().x + pad_lon),
        })
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hotspot records and the zoom-to-hotspot entry point.

use kurbo::{Point, Rect};

use crate::fit::{FitOptions, fit_viewport_rect_with};
use crate::geometry::{Geometry, InvalidGeometryError, compute_bounds};
use crate::viewport::ViewportProvider;

/// A clickable region of the image.
///
/// `K` is the caller's identifier for the overlay content attached to the
/// hotspot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct Hotspot<K> {
    /// Caller-defined identifier.
    pub id: K,
    /// Region in image-pixel space.
    pub geometry: Geometry,
}

impl<K> Hotspot<K> {
    /// Creates a hotspot.
    #[must_use]
    pub fn new(id: K, geometry: Geometry) -> Self {
        Self { id, geometry }
    }

    /// Image-space bounding box of the hotspot.
    pub fn bounds(&self) -> Result<Rect, InvalidGeometryError> {
        compute_bounds(&self.geometry)
    }
}

/// Returns the topmost hotspot containing `image_pt`.
///
/// Later entries are drawn above earlier ones, so the search runs back to
/// front.
#[must_use]
pub fn hotspot_at<K>(hotspots: &[Hotspot<K>], image_pt: Point) -> Option<&Hotspot<K>> {
    hotspots
        .iter()
        .rev()
        .find(|hotspot| hotspot.geometry.contains(image_pt))
}

/// Computes where the viewer should navigate to show `geometry`.
///
/// Uses the viewer's live image-to-viewport transform and aspect ratio.
///
/// # Errors
///
/// Fails with [`InvalidGeometryError`] when the geometry has no points. In
/// that case nothing is computed and the caller should not navigate.
pub fn zoom_to_hotspot<V: ViewportProvider + ?Sized>(
    viewport: &V,
    geometry: &Geometry,
    options: FitOptions,
) -> Result<Rect, InvalidGeometryError> {
    let bounds = compute_bounds(geometry)?;
    Ok(fit_viewport_rect_with(
        bounds,
        |pt| viewport.image_to_viewport_point(pt),
        viewport.aspect_ratio(),
        options,
    ))
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hotspot geometry in image-pixel space.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{BezPath, Point, Rect, Shape};

/// A single closed ring of points in image-pixel space.
///
/// The ring is implicitly closed: the last point connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    /// Ordered ring vertices.
    pub ring: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon from its ring vertices.
    #[must_use]
    pub fn new(ring: impl IntoIterator<Item = Point>) -> Self {
        Self {
            ring: ring.into_iter().collect(),
        }
    }

    /// Creates a polygon from raw `[x, y]` coordinate pairs.
    #[must_use]
    pub fn from_coordinates(coords: &[[f64; 2]]) -> Self {
        Self::new(coords.iter().map(|&[x, y]| Point::new(x, y)))
    }

    fn to_path(&self, path: &mut BezPath) {
        let mut points = self.ring.iter().copied();
        if let Some(first) = points.next() {
            path.move_to(first);
            for pt in points {
                path.line_to(pt);
            }
            path.close_path();
        }
    }
}

/// Hotspot region, either one polygon or several.
///
/// The variant is fixed when the geometry is ingested; nothing downstream
/// inspects coordinate nesting to decide which one it is.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "RawGeometry")
)]
pub enum Geometry {
    /// A single ring.
    Polygon(Polygon),
    /// An ordered list of rings, each treated as its own polygon.
    MultiPolygon(Vec<Polygon>),
}

impl Geometry {
    /// Builds a [`Geometry::Polygon`] from `[[x, y], ...]`.
    ///
    /// Returns an error if `coords` is empty.
    pub fn from_polygon_coordinates(coords: &[[f64; 2]]) -> Result<Self, InvalidGeometryError> {
        let geometry = Self::Polygon(Polygon::from_coordinates(coords));
        geometry.validate()?;
        Ok(geometry)
    }

    /// Builds a [`Geometry::MultiPolygon`] from `[[[x, y], ...], ...]`.
    ///
    /// Returns an error if there are no rings or any ring is empty.
    pub fn from_multi_polygon_coordinates(
        rings: &[Vec<[f64; 2]>],
    ) -> Result<Self, InvalidGeometryError> {
        let geometry = Self::MultiPolygon(
            rings
                .iter()
                .map(|ring| Polygon::from_coordinates(ring))
                .collect(),
        );
        geometry.validate()?;
        Ok(geometry)
    }

    /// Returns the rings of this geometry in order.
    #[must_use]
    pub fn rings(&self) -> &[Polygon] {
        match self {
            Self::Polygon(polygon) => core::slice::from_ref(polygon),
            Self::MultiPolygon(polygons) => polygons,
        }
    }

    /// Iterates every vertex of every ring.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.rings()
            .iter()
            .flat_map(|polygon| polygon.ring.iter().copied())
    }

    /// Checks that there is at least one ring and that no ring is empty.
    pub fn validate(&self) -> Result<(), InvalidGeometryError> {
        let rings = self.rings();
        if rings.is_empty() {
            return Err(InvalidGeometryError::NoRings);
        }
        if let Some(index) = rings.iter().position(|polygon| polygon.ring.is_empty()) {
            return Err(InvalidGeometryError::EmptyRing { index });
        }
        Ok(())
    }

    /// Returns a closed path with one subpath per ring.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for polygon in self.rings() {
            polygon.to_path(&mut path);
        }
        path
    }

    /// Returns `true` if `pt` (image space) lies inside the geometry.
    ///
    /// Uses the non-zero winding rule over all rings, so overlapping rings of a
    /// multipolygon count as a single region.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        self.to_path().contains(pt)
    }
}

/// Computes the axis-aligned bounding box of every point in `geometry`.
///
/// The result is in image-pixel space with `x0 <= x1` and `y0 <= y1`. A box
/// with zero width or height is valid.
///
/// # Errors
///
/// Returns [`InvalidGeometryError::NoPoints`] if the geometry has no points at
/// all.
pub fn compute_bounds(geometry: &Geometry) -> Result<Rect, InvalidGeometryError> {
    let mut points = geometry.points();
    let first = points.next().ok_or(InvalidGeometryError::NoPoints)?;
    let bounds = points.fold(Rect::from_points(first, first), |acc, pt| {
        Rect::new(
            acc.x0.min(pt.x),
            acc.y0.min(pt.y),
            acc.x1.max(pt.x),
            acc.y1.max(pt.y),
        )
    });
    Ok(bounds)
}

/// Error returned when hotspot geometry cannot be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidGeometryError {
    /// The geometry contains no points in any ring.
    NoPoints,
    /// A multipolygon was given with no rings.
    NoRings,
    /// The ring at `index` has no points.
    EmptyRing {
        /// Position of the offending ring.
        index: usize,
    },
}

impl fmt::Display for InvalidGeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPoints => f.write_str("hotspot geometry has no points"),
            Self::NoRings => f.write_str("hotspot geometry has no rings"),
            Self::EmptyRing { index } => write!(f, "hotspot ring {index} has no points"),
        }
    }
}

impl core::error::Error for InvalidGeometryError {}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum RawGeometry {
    Polygon(Vec<[f64; 2]>),
    MultiPolygon(Vec<Vec<[f64; 2]>>),
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeometry> for Geometry {
    type Error = InvalidGeometryError;

    fn try_from(raw: RawGeometry) -> Result<Self, Self::Error> {
        match raw {
            RawGeometry::Polygon(coords) => Self::from_polygon_coordinates(&coords),
            RawGeometry::MultiPolygon(rings) => Self::from_multi_polygon_coordinates(&rings),
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hotspot --heading-base-level=0

//! Understory Hotspot: polygon hotspots over deep-zoom images.
//!
//! A hotspot is a polygonal region of a large image, expressed in the pixel
//! space of the full-resolution source. This crate answers two questions about
//! hotspots:
//! - Which hotspot is under a given image point ([`hotspot_at`]).
//! - Which viewport rectangle the viewer should animate to so that a hotspot
//!   fills the view with a comfortable margin ([`zoom_to_hotspot`],
//!   [`fit_viewport_rect`]).
//!
//! It does **not** animate the camera or draw overlays. Callers supply the
//! viewer's live coordinate state through [`ViewportProvider`];
//! [`DeepZoomViewport`] is a small headless implementation with a normalized
//! viewport space where the image width spans `0..1`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_hotspot::{
//!     DeepZoomViewport, DeviceClass, FitOptions, Geometry, zoom_to_hotspot,
//! };
//!
//! let mut viewport = DeepZoomViewport::new(Size::new(8000.0, 6000.0), Size::new(1280.0, 720.0));
//! let geometry = Geometry::from_polygon_coordinates(&[
//!     [1000.0, 1000.0],
//!     [1800.0, 1000.0],
//!     [1800.0, 1400.0],
//!     [1000.0, 1400.0],
//! ])
//! .unwrap();
//!
//! let target = zoom_to_hotspot(&viewport, &geometry, FitOptions::for_device(DeviceClass::Desktop))
//!     .unwrap();
//! viewport.fit_bounds(target);
//! assert!((viewport.bounds().width() - target.width()).abs() < 1e-9);
//! ```
//!
//! ## Fitting rule
//!
//! The hotspot's bounding box is mapped into viewport space and padded along
//! its limiting axis: desktop hotspots occupy 80% of that axis, mobile ones
//! 85%. The other axis follows from the viewport aspect ratio, so the result
//! can be handed straight to the viewer without distortion. Zero-width or
//! zero-height hotspots are fitted along their non-degenerate axis.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod fit;
mod geometry;
mod hotspot;
mod viewport;

pub use fit::{DeviceClass, FitOptions, fit_viewport_rect, fit_viewport_rect_with};
pub use geometry::{Geometry, InvalidGeometryError, Polygon, compute_bounds};
pub use hotspot::{Hotspot, hotspot_at, zoom_to_hotspot};
pub use viewport::{DeepZoomViewport, ViewportProvider};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// The host viewer's live coordinate state, as seen by hotspot fitting.
///
/// Viewport space is the viewer's normalized space; image space is the pixel
/// space of the full-resolution source image.
pub trait ViewportProvider {
    /// Current zoom factor.
    fn zoom(&self) -> f64;

    /// Maps an image-space point into viewport space.
    fn image_to_viewport_point(&self, pt: Point) -> Point;

    /// Width divided by height of the visible container.
    fn aspect_ratio(&self) -> f64;

    /// Full-resolution image size in pixels.
    fn content_size(&self) -> Size;
}

/// Deep-zoom viewport over a single image.
///
/// Viewport space is normalized so that the image width spans `0.0..1.0`;
/// the image height spans `0.0..1.0 / content_aspect`. The viewport tracks
/// the rectangle of viewport space currently visible in the container, whose
/// aspect ratio always matches the container's.
///
/// Zoom is the reciprocal of the visible width, so `1.0` shows the whole image
/// width and `2.0` shows half of it.
#[derive(Clone, Debug)]
pub struct DeepZoomViewport {
    content_size: Size,
    container_size: Size,
    bounds: Rect,
    min_zoom: f64,
    max_zoom: f64,
}

impl DeepZoomViewport {
    /// Creates a viewport showing the whole image centered in the container.
    ///
    /// Zoom is clamped to the range `[1e-3, 1e3]` by default.
    #[must_use]
    pub fn new(content_size: Size, container_size: Size) -> Self {
        let mut vp = Self {
            content_size,
            container_size,
            bounds: Rect::ZERO,
            min_zoom: 1e-3,
            max_zoom: 1e3,
        };
        vp.go_home();
        vp
    }

    /// Returns the full image in viewport coordinates.
    #[must_use]
    pub fn home_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, 1.0, 1.0 / self.content_aspect())
    }

    /// Fits the whole image into the container.
    pub fn go_home(&mut self) {
        self.fit_bounds(self.home_bounds());
    }

    /// Returns the visible region in viewport coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the visible region in image-pixel coordinates.
    #[must_use]
    pub fn visible_image_rect(&self) -> Rect {
        Rect::from_points(
            self.viewport_to_image_point(self.bounds.origin()),
            self.viewport_to_image_point(Point::new(self.bounds.x1, self.bounds.y1)),
        )
    }

    /// Returns the container size in device pixels.
    #[must_use]
    pub fn container_size(&self) -> Size {
        self.container_size
    }

    /// Sets the container size, keeping the visible center and zoom.
    pub fn set_container_size(&mut self, size: Size) {
        if self.container_size == size {
            return;
        }
        self.container_size = size;
        let center = self.bounds.center();
        let width = self.bounds.width();
        self.bounds = Rect::from_center_size(center, (width, width / self.aspect_ratio()));
    }

    /// Sets the minimum and maximum zoom factors.
    ///
    /// The provided range is normalized so that `min_zoom <= max_zoom`. The
    /// current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom());
    }

    /// Sets the zoom factor about the visible center, clamped into the zoom range.
    pub fn set_zoom(&mut self, zoom: f64) {
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        let width = 1.0 / clamped;
        if (self.bounds.width() - width).abs() < f64::EPSILON {
            return;
        }
        let center = self.bounds.center();
        self.bounds = Rect::from_center_size(center, (width, width / self.aspect_ratio()));
    }

    /// Pans the visible region by a delta in viewport space.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.bounds = self.bounds + delta;
    }

    /// Shows `rect` (viewport space), preserving the container aspect ratio.
    ///
    /// The rectangle is grown along one axis to match the container aspect and
    /// centered. The resulting zoom is clamped into the zoom range. Empty
    /// rectangles leave the view unchanged.
    pub fn fit_bounds(&mut self, rect: Rect) {
        let rect = rect.abs();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let aspect = self.aspect_ratio();
        let width = if rect.width() / rect.height() > aspect {
            rect.width()
        } else {
            rect.height() * aspect
        };
        let width = width.clamp(1.0 / self.max_zoom, 1.0 / self.min_zoom);
        self.bounds = Rect::from_center_size(rect.center(), (width, width / aspect));
    }

    /// Converts a viewport-space point into image-pixel coordinates.
    #[must_use]
    pub fn viewport_to_image_point(&self, pt: Point) -> Point {
        let scale = self.content_width();
        Point::new(pt.x * scale, pt.y * scale)
    }

    /// Converts an image-space rectangle into viewport coordinates.
    #[must_use]
    pub fn image_to_viewport_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.image_to_viewport_point(rect.origin()),
            self.image_to_viewport_point(Point::new(rect.x1, rect.y1)),
        )
    }

    fn content_width(&self) -> f64 {
        self.content_size.width.max(f64::MIN_POSITIVE)
    }

    fn content_aspect(&self) -> f64 {
        self.content_width() / self.content_size.height.max(f64::MIN_POSITIVE)
    }
}

impl ViewportProvider for DeepZoomViewport {
    fn zoom(&self) -> f64 {
        1.0 / self.bounds.width().max(f64::MIN_POSITIVE)
    }

    fn image_to_viewport_point(&self, pt: Point) -> Point {
        let scale = self.content_width();
        Point::new(pt.x / scale, pt.y / scale)
    }

    fn aspect_ratio(&self) -> f64 {
        self.container_size.width.max(f64::MIN_POSITIVE)
            / self.container_size.height.max(f64::MIN_POSITIVE)
    }

    fn content_size(&self) -> Size {
        self.content_size
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitting an image-space bounding box into a viewport-space navigation target.

use kurbo::{Point, Rect};

/// Broad device category, used to choose how much padding surrounds a hotspot.
///
/// The caller decides the class; nothing in this crate inspects the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DeviceClass {
    /// Small touch screens; the hotspot fills more of the view.
    Mobile,
    /// Everything else.
    #[default]
    Desktop,
}

impl DeviceClass {
    /// Fraction of the limiting viewport dimension the hotspot should occupy.
    #[must_use]
    pub fn padding_factor(self) -> f64 {
        match self {
            Self::Mobile => 0.85,
            Self::Desktop => 0.80,
        }
    }
}

/// Options for [`fit_viewport_rect_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FitOptions {
    /// Fraction in `(0, 1]` of the limiting viewport dimension that the
    /// hotspot occupies. Smaller values zoom out further.
    pub padding_factor: f64,
}

impl FitOptions {
    /// Options using the padding preset for `device_class`.
    #[must_use]
    pub fn for_device(device_class: DeviceClass) -> Self {
        Self {
            padding_factor: device_class.padding_factor(),
        }
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self::for_device(DeviceClass::default())
    }
}

/// Computes the viewport rectangle to navigate to so that `bounds` is shown
/// with the device's padding.
///
/// `bounds` is in image space; `image_to_viewport` maps image points into the
/// viewer's viewport space. The returned rectangle is in viewport space and
/// always has the aspect ratio `viewport_aspect_ratio` (unless both mapped
/// dimensions are zero, in which case it collapses to the hotspot center).
///
/// See [`fit_viewport_rect_with`] for the details.
#[must_use]
pub fn fit_viewport_rect(
    bounds: Rect,
    image_to_viewport: impl Fn(Point) -> Point,
    viewport_aspect_ratio: f64,
    device_class: DeviceClass,
) -> Rect {
    fit_viewport_rect_with(
        bounds,
        image_to_viewport,
        viewport_aspect_ratio,
        FitOptions::for_device(device_class),
    )
}

/// Like [`fit_viewport_rect`], with explicit [`FitOptions`].
///
/// The mapped hotspot is compared against the viewport aspect ratio. When it
/// is relatively wider, its width is divided by the padding factor and the
/// height follows from the aspect ratio; otherwise the height is padded and
/// the width follows. The result is centered on the mapped hotspot center.
///
/// A mapped width or height of zero is not an error: a zero height fits to
/// width, a zero width fits to height, and when both are zero the hotspot
/// aspect is taken to be the viewport's own.
#[must_use]
pub fn fit_viewport_rect_with(
    bounds: Rect,
    image_to_viewport: impl Fn(Point) -> Point,
    viewport_aspect_ratio: f64,
    options: FitOptions,
) -> Rect {
    let left = image_to_viewport(Point::new(bounds.x0, bounds.y0));
    let right = image_to_viewport(Point::new(bounds.x1, bounds.y1));

    let width = right.x - left.x;
    let height = right.y - left.y;
    let center = left.midpoint(right);

    let hotspot_aspect = match (width == 0.0, height == 0.0) {
        (true, true) => viewport_aspect_ratio,
        (false, true) => f64::INFINITY,
        (true, false) => 0.0,
        (false, false) => width / height,
    };

    let padding = options.padding_factor;
    let (final_width, final_height) = if hotspot_aspect > viewport_aspect_ratio {
        let w = width / padding;
        (w, w / viewport_aspect_ratio)
    } else {
        let h = height / padding;
        (h * viewport_aspect_ratio, h)
    };

    let rect = Rect::from_center_size(center, (final_width, final_height));
    tracing::trace!(
        hotspot_width = width,
        hotspot_height = height,
        padding,
        x = rect.x0,
        y = rect.y0,
        width = final_width,
        height = final_height,
        "fitted hotspot viewport rect"
    );
    rect
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(pt: Point) -> Point {
        pt
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn wide_hotspot_fits_to_width() {
        let bounds = Rect::new(0.0, 0.0, 0.4, 0.1);
        let rect = fit_viewport_rect(bounds, identity, 2.0, DeviceClass::Desktop);
        assert_close(rect.width(), 0.5);
        assert_close(rect.height(), 0.25);
        assert_close(rect.center().x, 0.2);
        assert_close(rect.center().y, 0.05);
    }

    #[test]
    fn tall_hotspot_fits_to_height() {
        let bounds = Rect::new(10.0, 10.0, 12.0, 27.0);
        let rect = fit_viewport_rect(bounds, identity, 1.5, DeviceClass::Mobile);
        assert_close(rect.height(), 20.0);
        assert_close(rect.width(), 30.0);
        assert_close(rect.x0, 11.0 - 15.0);
        assert_close(rect.y0, 18.5 - 10.0);
    }

    #[test]
    fn result_matches_viewport_aspect() {
        let to_viewport = |pt: Point| Point::new(pt.x / 4000.0, pt.y / 4000.0);
        for bounds in [
            Rect::new(100.0, 200.0, 900.0, 260.0),
            Rect::new(1500.0, 10.0, 1520.0, 2900.0),
            Rect::new(0.0, 0.0, 4000.0, 3000.0),
        ] {
            let rect = fit_viewport_rect(bounds, to_viewport, 16.0 / 9.0, DeviceClass::Desktop);
            assert_close(rect.width() / rect.height(), 16.0 / 9.0);
        }
    }

    #[test]
    fn horizontal_line_fits_to_width() {
        let bounds = Rect::new(0.0, 5.0, 8.0, 5.0);
        let rect = fit_viewport_rect(bounds, identity, 1.0, DeviceClass::Desktop);
        assert_close(rect.width(), 10.0);
        assert_close(rect.height(), 10.0);
        assert_close(rect.center().y, 5.0);
    }

    #[test]
    fn vertical_line_fits_to_height() {
        let bounds = Rect::new(3.0, 0.0, 3.0, 8.0);
        let rect = fit_viewport_rect(bounds, identity, 0.5, DeviceClass::Desktop);
        assert_close(rect.height(), 10.0);
        assert_close(rect.width(), 5.0);
    }

    #[test]
    fn point_hotspot_collapses_without_nan() {
        let bounds = Rect::new(3.0, 4.0, 3.0, 4.0);
        let rect = fit_viewport_rect(bounds, identity, 1.25, DeviceClass::Mobile);
        assert_eq!(rect.width(), 0.0);
        assert_eq!(rect.height(), 0.0);
        assert_eq!(rect.center(), Point::new(3.0, 4.0));
    }

    #[test]
    fn custom_padding_factor() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        let rect = fit_viewport_rect_with(bounds, identity, 1.0, FitOptions {
            padding_factor: 0.5,
        });
        assert_close(rect.width(), 2.0);
        assert_eq!(FitOptions::default().padding_factor, 0.80);
    }
}

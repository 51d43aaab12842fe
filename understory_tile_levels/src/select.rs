// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Level interval adjustment and drawable-tile filtering.

use alloc::vec::Vec;

use crate::config::LevelSelectionConfig;
use crate::interval::ZoomLevelInterval;

/// A tile that belongs to one pyramid level.
///
/// Only the level is read; everything else about the tile stays opaque.
pub trait PyramidTile {
    /// Pyramid level of this tile. Lower is coarser.
    fn level(&self) -> u32;
}

impl<T: PyramidTile + ?Sized> PyramidTile for &T {
    fn level(&self) -> u32 {
        (**self).level()
    }
}

impl<T: PyramidTile + ?Sized> PyramidTile for alloc::rc::Rc<T> {
    fn level(&self) -> u32 {
        (**self).level()
    }
}

/// Address of a tile within a pyramid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Pyramid level.
    pub level: u32,
    /// Column within the level.
    pub x: u32,
    /// Row within the level.
    pub y: u32,
}

impl TileCoord {
    /// Creates a tile coordinate.
    #[must_use]
    pub const fn new(level: u32, x: u32, y: u32) -> Self {
        Self { level, x, y }
    }
}

impl PyramidTile for TileCoord {
    fn level(&self) -> u32 {
        self.level
    }
}

/// Narrows the engine's native level interval at low zoom.
///
/// At or above [`LevelSelectionConfig::zoom_threshold`] (or for a NaN zoom)
/// `native` is returned unchanged. Below it, a center level is estimated from
/// `floor(log2(zoom * tile_size / reference_tile_size)) + center_level_offset`,
/// clamped to `[min_center_level, max_center_level]`, and the result is the
/// band one level either side of it, kept within `[min_level, max_level]` and
/// no wider than `max_spread`.
///
/// Non-positive zooms estimate the lowest center level.
#[must_use]
pub fn compute_adjusted_interval(
    native: ZoomLevelInterval,
    zoom: f64,
    config: &LevelSelectionConfig,
) -> ZoomLevelInterval {
    if zoom.is_nan() || zoom >= config.zoom_threshold {
        return native;
    }

    let min_center = i64::from(config.min_center_level);
    let max_center = i64::from(config.max_center_level).max(min_center);
    let center = match optimal_level(zoom, config) {
        Some(optimal) => {
            (optimal + i64::from(config.center_level_offset)).clamp(min_center, max_center)
        }
        None => min_center,
    };

    let highest = (center + 1).min(i64::from(config.max_level));
    let mut lowest = (center - 1).max(i64::from(config.min_level));
    if highest - lowest > i64::from(config.max_spread) {
        lowest = highest - i64::from(config.max_spread);
    }
    let lowest = lowest.min(highest);

    let adjusted = ZoomLevelInterval {
        lowest: to_level(lowest),
        highest: to_level(highest),
    };
    if adjusted != native {
        tracing::trace!(
            zoom,
            native_lowest = native.lowest,
            native_highest = native.highest,
            lowest = adjusted.lowest,
            highest = adjusted.highest,
            "narrowed pyramid level interval"
        );
    }
    adjusted
}

/// Returns the tiles whose level lies in `interval`, in their original order.
#[must_use]
pub fn filter_drawable_tiles<T: PyramidTile + Clone>(
    tiles: &[T],
    interval: ZoomLevelInterval,
) -> Vec<T> {
    tiles
        .iter()
        .filter(|tile| interval.contains(tile.level()))
        .cloned()
        .collect()
}

/// In-place form of [`filter_drawable_tiles`].
pub fn retain_drawable_tiles<T: PyramidTile>(tiles: &mut Vec<T>, interval: ZoomLevelInterval) {
    tiles.retain(|tile| interval.contains(tile.level()));
}

/// `floor(log2(zoom * tile_size / reference_tile_size))`, or `None` when the
/// ratio is not a positive finite number.
fn optimal_level(zoom: f64, config: &LevelSelectionConfig) -> Option<i64> {
    let ratio = zoom * config.tile_size / config.reference_tile_size;
    if !ratio.is_finite() || ratio <= 0.0 {
        return None;
    }
    Some(floor_log2(ratio))
}

/// Exact `floor(log2(x))` for positive finite `x`.
///
/// Scaling by two is exact in binary floating point, so this needs no
/// transcendental functions and works without `std`.
fn floor_log2(mut x: f64) -> i64 {
    let mut exponent = 0_i64;
    while x >= 2.0 {
        x /= 2.0;
        exponent += 1;
    }
    while x < 1.0 {
        x *= 2.0;
        exponent -= 1;
    }
    exponent
}

fn to_level(level: i64) -> u32 {
    u32::try_from(level.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    const NATIVE: ZoomLevelInterval = ZoomLevelInterval {
        lowest: 0,
        highest: 13,
    };

    #[test]
    fn floor_log2_matches_powers() {
        assert_eq!(floor_log2(1.0), 0);
        assert_eq!(floor_log2(1.999), 0);
        assert_eq!(floor_log2(2.0), 1);
        assert_eq!(floor_log2(0.5), -1);
        assert_eq!(floor_log2(0.3), -2);
        assert_eq!(floor_log2(1024.0), 10);
    }

    #[test]
    fn high_zoom_is_identity() {
        let config = LevelSelectionConfig::default();
        assert_eq!(compute_adjusted_interval(NATIVE, 5.0, &config), NATIVE);
        assert_eq!(compute_adjusted_interval(NATIVE, 3.0, &config), NATIVE);
        assert_eq!(compute_adjusted_interval(NATIVE, f64::NAN, &config), NATIVE);
    }

    #[test]
    fn low_zoom_centers_on_estimated_level() {
        let config = LevelSelectionConfig::default();
        assert_eq!(
            compute_adjusted_interval(NATIVE, 1.0, &config),
            ZoomLevelInterval::new(10, 12)
        );
        assert_eq!(
            compute_adjusted_interval(NATIVE, 2.9, &config),
            ZoomLevelInterval::new(11, 13)
        );
        assert_eq!(
            compute_adjusted_interval(NATIVE, 0.6, &config),
            ZoomLevelInterval::new(9, 11)
        );
    }

    #[test]
    fn very_low_zoom_stays_at_global_floor() {
        let config = LevelSelectionConfig::default();
        for zoom in [0.01, 0.0, -1.0, f64::NEG_INFINITY] {
            assert_eq!(
                compute_adjusted_interval(NATIVE, zoom, &config),
                ZoomLevelInterval::new(8, 9)
            );
        }
    }

    #[test]
    fn adjusted_interval_respects_bounds_and_spread() {
        let config = LevelSelectionConfig::default();
        let mut zoom = 0.001;
        while zoom < config.zoom_threshold {
            let interval = compute_adjusted_interval(NATIVE, zoom, &config);
            assert!(interval.lowest >= config.min_level);
            assert!(interval.highest <= config.max_level);
            assert!(interval.spread() <= config.max_spread);
            zoom *= 1.3;
        }
    }

    #[test]
    fn narrow_spread_pulls_lowest_up() {
        let config = LevelSelectionConfig {
            max_spread: 1,
            ..LevelSelectionConfig::default()
        };
        assert_eq!(
            compute_adjusted_interval(NATIVE, 1.0, &config),
            ZoomLevelInterval::new(11, 12)
        );
    }

    #[test]
    fn larger_tiles_raise_the_estimate() {
        let config = LevelSelectionConfig {
            tile_size: 512.0,
            ..LevelSelectionConfig::default()
        };
        assert_eq!(
            compute_adjusted_interval(NATIVE, 1.0, &config),
            ZoomLevelInterval::new(11, 13)
        );
    }

    #[test]
    fn filter_keeps_order_and_is_idempotent() {
        let tiles: Vec<TileCoord> = [12, 3, 9, 10, 14, 10, 8, 11]
            .iter()
            .enumerate()
            .map(|(i, &level)| TileCoord::new(level, u32::try_from(i).unwrap(), 0))
            .collect();
        let interval = ZoomLevelInterval::new(9, 11);
        let once = filter_drawable_tiles(&tiles, interval);
        assert_eq!(
            once,
            vec![
                TileCoord::new(9, 2, 0),
                TileCoord::new(10, 3, 0),
                TileCoord::new(10, 5, 0),
                TileCoord::new(11, 7, 0),
            ]
        );
        assert_eq!(filter_drawable_tiles(&once, interval), once);

        let mut in_place = tiles.clone();
        retain_drawable_tiles(&mut in_place, interval);
        assert_eq!(in_place, once);
    }
}

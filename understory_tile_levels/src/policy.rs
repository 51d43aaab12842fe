// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-viewer level selection policies.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::config::LevelSelectionConfig;
use crate::interval::ZoomLevelInterval;
use crate::select::{PyramidTile, compute_adjusted_interval, retain_drawable_tiles};

/// Trait for level selection policies.
///
/// A policy decides, once per frame, which pyramid levels a viewer may draw.
/// Each viewer owns its own policy, so changing one viewer's behavior never
/// leaks into another viewer built on the same engine.
///
/// # Example
///
/// ```
/// use understory_tile_levels::{
///     LevelGate, LevelSelectionPolicy, NativeLevels, TileCascadeFix, TileCoord,
///     ZoomLevelInterval,
/// };
///
/// let native = ZoomLevelInterval::new(0, 13);
///
/// let mut stock = LevelGate::new(NativeLevels);
/// assert_eq!(stock.select_levels(native, 0.5), native);
///
/// let mut fixed = LevelGate::new(TileCascadeFix::default());
/// let interval = fixed.select_levels(native, 0.5);
/// assert!(interval.spread() <= 2);
///
/// let mut tiles = vec![TileCoord::new(2, 0, 0), TileCoord::new(interval.lowest, 0, 0)];
/// fixed.retain_drawable(&mut tiles);
/// assert_eq!(tiles.len(), 1);
/// ```
pub trait LevelSelectionPolicy {
    /// Returns the interval to draw given the engine's own choice and the
    /// current zoom.
    fn select_levels(&self, native: ZoomLevelInterval, zoom: f64) -> ZoomLevelInterval;

    /// Returns `true` if tiles should be dropped when their level is outside
    /// the selected interval.
    ///
    /// Policies that leave the engine's interval alone have no reason to touch
    /// its tile list either.
    fn filters_tiles(&self) -> bool {
        true
    }
}

impl<P: LevelSelectionPolicy + ?Sized> LevelSelectionPolicy for &P {
    fn select_levels(&self, native: ZoomLevelInterval, zoom: f64) -> ZoomLevelInterval {
        (**self).select_levels(native, zoom)
    }

    fn filters_tiles(&self) -> bool {
        (**self).filters_tiles()
    }
}

impl<P: LevelSelectionPolicy + ?Sized> LevelSelectionPolicy for Box<P> {
    fn select_levels(&self, native: ZoomLevelInterval, zoom: f64) -> ZoomLevelInterval {
        (**self).select_levels(native, zoom)
    }

    fn filters_tiles(&self) -> bool {
        (**self).filters_tiles()
    }
}

/// Delegates entirely to the engine: the native interval is used as is and
/// the tile list is never filtered.
#[derive(Copy, Clone, Debug, Default)]
pub struct NativeLevels;

impl LevelSelectionPolicy for NativeLevels {
    fn select_levels(&self, native: ZoomLevelInterval, _zoom: f64) -> ZoomLevelInterval {
        native
    }

    fn filters_tiles(&self) -> bool {
        false
    }
}

/// Narrows the level band at low zoom to stop tile cascades.
///
/// Below the configured zoom threshold the engine tends to request many
/// pyramid levels at once, which overdraws and leaves dark regions while tiles
/// load. This policy replaces the native interval with a band of at most
/// `max_spread + 1` levels around an estimated ideal level; see
/// [`compute_adjusted_interval`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TileCascadeFix {
    /// Tuning constants.
    pub config: LevelSelectionConfig,
}

impl TileCascadeFix {
    /// Creates the policy with explicit tuning constants.
    #[must_use]
    pub fn new(config: LevelSelectionConfig) -> Self {
        Self { config }
    }
}

impl LevelSelectionPolicy for TileCascadeFix {
    fn select_levels(&self, native: ZoomLevelInterval, zoom: f64) -> ZoomLevelInterval {
        compute_adjusted_interval(native, zoom, &self.config)
    }
}

/// A policy plus the interval it chose for the current frame.
///
/// A viewer calls [`LevelGate::select_levels`] when it recomputes its level
/// interval and [`LevelGate::retain_drawable`] after it rebuilds its drawable
/// tile list.
#[derive(Clone, Debug, Default)]
pub struct LevelGate<P> {
    policy: P,
    interval: Option<ZoomLevelInterval>,
}

impl<P: LevelSelectionPolicy> LevelGate<P> {
    /// Creates a gate with no interval selected yet.
    #[must_use]
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            interval: None,
        }
    }

    /// Returns the policy.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Returns the interval chosen by the last [`LevelGate::select_levels`] call.
    #[must_use]
    pub fn interval(&self) -> Option<ZoomLevelInterval> {
        self.interval
    }

    /// Runs the policy for this frame and remembers the result.
    pub fn select_levels(&mut self, native: ZoomLevelInterval, zoom: f64) -> ZoomLevelInterval {
        let interval = self.policy.select_levels(native, zoom);
        self.interval = Some(interval);
        interval
    }

    /// Drops tiles outside the current interval, keeping the rest in order.
    ///
    /// Does nothing before the first [`LevelGate::select_levels`] call or when
    /// the policy does not filter tiles.
    pub fn retain_drawable<T: PyramidTile>(&self, tiles: &mut Vec<T>) {
        if !self.policy.filters_tiles() {
            return;
        }
        if let Some(interval) = self.interval {
            retain_drawable_tiles(tiles, interval);
        }
    }
}

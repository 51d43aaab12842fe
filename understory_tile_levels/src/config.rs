// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Tuning constants for narrowing the level band at low zoom.
///
/// The defaults were fit against one pyramid (256px tiles, levels up to 14)
/// and are not expected to carry over unchanged to pyramids of a different
/// depth or tile size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LevelSelectionConfig {
    /// At or above this zoom the native interval is left untouched.
    pub zoom_threshold: f64,
    /// Lowest level the adjusted interval may start at.
    pub min_level: u32,
    /// Highest level the adjusted interval may reach.
    pub max_level: u32,
    /// Lower clamp for the estimated center level.
    pub min_center_level: u32,
    /// Upper clamp for the estimated center level.
    pub max_center_level: u32,
    /// Added to `floor(log2(zoom * tile_size / reference_tile_size))` to
    /// estimate the center level.
    pub center_level_offset: i32,
    /// Maximum `highest - lowest` of the adjusted interval.
    pub max_spread: u32,
    /// Tile edge length of the pyramid, in pixels.
    pub tile_size: f64,
    /// Tile edge length the offset was tuned for, in pixels.
    pub reference_tile_size: f64,
}

impl Default for LevelSelectionConfig {
    fn default() -> Self {
        Self {
            zoom_threshold: 3.0,
            min_level: 8,
            max_level: 14,
            min_center_level: 8,
            max_center_level: 12,
            center_level_offset: 11,
            max_spread: 2,
            tile_size: 256.0,
            reference_tile_size: 256.0,
        }
    }
}

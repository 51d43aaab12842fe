// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Inclusive range of pyramid levels a viewer may draw in one frame.
///
/// Lower levels are coarser. `lowest <= highest` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomLevelInterval {
    /// Coarsest level allowed.
    pub lowest: u32,
    /// Finest level allowed.
    pub highest: u32,
}

impl ZoomLevelInterval {
    /// Creates an interval, swapping the ends if they are out of order.
    #[must_use]
    pub fn new(lowest: u32, highest: u32) -> Self {
        if lowest <= highest {
            Self { lowest, highest }
        } else {
            Self {
                lowest: highest,
                highest: lowest,
            }
        }
    }

    /// Returns `true` if `level` is within the interval, ends included.
    #[must_use]
    pub fn contains(&self, level: u32) -> bool {
        (self.lowest..=self.highest).contains(&level)
    }

    /// Number of levels above `lowest`; zero for a single-level interval.
    #[must_use]
    pub fn spread(&self) -> u32 {
        self.highest - self.lowest
    }

    /// Clamps both ends into `[0, max_level]`.
    #[must_use]
    pub fn clamp_to(self, max_level: u32) -> Self {
        Self {
            lowest: self.lowest.min(max_level),
            highest: self.highest.min(max_level),
        }
    }
}

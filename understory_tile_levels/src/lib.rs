// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_tile_levels --heading-base-level=0

//! Understory Tile Levels: pyramid level gating for deep-zoom viewers.
//!
//! A deep-zoom viewer draws tiles from several resolution levels of an image
//! pyramid at once. At low zoom some engines pick a very wide band of levels,
//! which loads and overdraws many redundant tiles and shows dark, incomplete
//! regions while they arrive. This crate narrows that band.
//!
//! The core concepts are:
//!
//! - [`ZoomLevelInterval`]: an inclusive `[lowest, highest]` level range.
//! - [`compute_adjusted_interval`]: the narrowing rule, driven by
//!   [`LevelSelectionConfig`]. Above the zoom threshold the native interval is
//!   returned unchanged.
//! - [`filter_drawable_tiles`] / [`retain_drawable_tiles`]: drop tiles whose
//!   [`PyramidTile::level`] is outside an interval, preserving order.
//! - [`LevelSelectionPolicy`]: a per-viewer capability. [`NativeLevels`] defers
//!   to the engine; [`TileCascadeFix`] applies the narrowing rule.
//!   [`LevelGate`] carries a policy and the interval it picked for the frame.
//! - [`install`] / [`uninstall`]: for engines that expose replaceable hooks
//!   ([`EngineHooks`]) rather than taking a policy, wrap the native hooks and
//!   later restore them by reference.
//!
//! This crate does not fetch, decode, or cache tiles.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use understory_tile_levels::{
//!     EngineHooks, LevelContext, LevelSelectionConfig, TileCoord, ZoomLevelInterval, install,
//!     uninstall,
//! };
//!
//! let mut hooks: EngineHooks<TileCoord> = EngineHooks::new(
//!     Rc::new(|_ctx: &LevelContext| ZoomLevelInterval::new(0, 14)),
//!     Rc::new(|_ctx: &LevelContext, tiles: &mut Vec<TileCoord>| {
//!         *tiles = (0..=14).map(|level| TileCoord::new(level, 0, 0)).collect();
//!     }),
//! );
//!
//! let installation = install(&mut hooks, LevelSelectionConfig::default()).unwrap();
//!
//! // One frame of the engine's render cycle.
//! let ctx = LevelContext { zoom: 1.0, max_level: 14 };
//! let interval = hooks.compute_level_interval(&ctx).unwrap();
//! let mut tiles = Vec::new();
//! hooks.update_drawable_tiles(&ctx, &mut tiles);
//! assert!(interval.spread() <= 2);
//! assert!(tiles.iter().all(|t| interval.contains(t.level)));
//!
//! uninstall(&mut hooks, installation);
//! assert_eq!(hooks.compute_level_interval(&ctx), Some(ZoomLevelInterval::new(0, 14)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod hooks;
mod interval;
mod policy;
mod select;

pub use config::LevelSelectionConfig;
pub use hooks::{
    DrawableTilesHook, EngineHooks, HookedEngine, Installation, LevelContext, LevelIntervalHook,
    MissingHookError, install, install_policy, uninstall,
};
pub use interval::ZoomLevelInterval;
pub use policy::{LevelGate, LevelSelectionPolicy, NativeLevels, TileCascadeFix};
pub use select::{
    PyramidTile, TileCoord, compute_adjusted_interval, filter_drawable_tiles,
    retain_drawable_tiles,
};

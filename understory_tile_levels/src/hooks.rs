// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interception of a tile engine's level-selection extension points.
//!
//! Engines that are not built around [`LevelGate`](crate::LevelGate) expose
//! two replaceable hooks instead: one computing the level interval for the
//! frame and one rebuilding the list of drawable tiles. [`install`] wraps both
//! so a [`LevelSelectionPolicy`] runs after the native code, and
//! [`uninstall`] puts the original hooks back, reference for reference.
//!
//! The hook table belongs to one engine instance. Two viewers only share an
//! override if they share the same table.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::fmt;

use crate::config::LevelSelectionConfig;
use crate::interval::ZoomLevelInterval;
use crate::policy::{LevelSelectionPolicy, TileCascadeFix};
use crate::select::{PyramidTile, retain_drawable_tiles};

/// Per-frame state the engine passes to its hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelContext {
    /// Live zoom of the viewer.
    pub zoom: f64,
    /// Highest level present in the pyramid.
    pub max_level: u32,
}

/// Hook computing the level interval for a frame.
pub type LevelIntervalHook = Rc<dyn Fn(&LevelContext) -> ZoomLevelInterval>;

/// Hook rebuilding the drawable tile list for a frame.
pub type DrawableTilesHook<T> = Rc<dyn Fn(&LevelContext, &mut Vec<T>)>;

/// The two replaceable level-selection hooks of an engine.
///
/// A missing hook means the engine does not offer that extension point.
pub struct EngineHooks<T> {
    /// Computes the `[lowest, highest]` levels to draw.
    pub compute_level_interval: Option<LevelIntervalHook>,
    /// Rebuilds the list of tiles to draw this frame.
    pub update_drawable_tiles: Option<DrawableTilesHook<T>>,
}

impl<T> EngineHooks<T> {
    /// Creates a table with both hooks present.
    #[must_use]
    pub fn new(
        compute_level_interval: LevelIntervalHook,
        update_drawable_tiles: DrawableTilesHook<T>,
    ) -> Self {
        Self {
            compute_level_interval: Some(compute_level_interval),
            update_drawable_tiles: Some(update_drawable_tiles),
        }
    }

    /// Runs the level interval hook, if present.
    pub fn compute_level_interval(&self, ctx: &LevelContext) -> Option<ZoomLevelInterval> {
        self.compute_level_interval.as_ref().map(|hook| hook(ctx))
    }

    /// Runs the drawable tiles hook, if present.
    pub fn update_drawable_tiles(&self, ctx: &LevelContext, tiles: &mut Vec<T>) {
        if let Some(hook) = &self.update_drawable_tiles {
            hook(ctx, tiles);
        }
    }
}

impl<T> Default for EngineHooks<T> {
    fn default() -> Self {
        Self {
            compute_level_interval: None,
            update_drawable_tiles: None,
        }
    }
}

impl<T> Clone for EngineHooks<T> {
    fn clone(&self) -> Self {
        Self {
            compute_level_interval: self.compute_level_interval.clone(),
            update_drawable_tiles: self.update_drawable_tiles.clone(),
        }
    }
}

impl<T> fmt::Debug for EngineHooks<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHooks")
            .field(
                "compute_level_interval",
                &self.compute_level_interval.as_ref().map(|_| ".."),
            )
            .field(
                "update_drawable_tiles",
                &self.update_drawable_tiles.as_ref().map(|_| ".."),
            )
            .finish()
    }
}

/// An engine instance whose level hooks can be replaced.
pub trait HookedEngine<T> {
    /// Returns the engine's hook table.
    fn hooks_mut(&mut self) -> &mut EngineHooks<T>;
}

impl<T> HookedEngine<T> for EngineHooks<T> {
    fn hooks_mut(&mut self) -> &mut EngineHooks<T> {
        self
    }
}

/// The native hooks saved by [`install`], needed by [`uninstall`].
#[must_use = "dropping the installation makes the native hooks unrecoverable"]
pub struct Installation<T> {
    native_interval: LevelIntervalHook,
    native_tiles: DrawableTilesHook<T>,
}

impl<T> Installation<T> {
    /// The native level interval hook that was replaced.
    #[must_use]
    pub fn native_interval(&self) -> &LevelIntervalHook {
        &self.native_interval
    }

    /// The native drawable tiles hook that was replaced.
    #[must_use]
    pub fn native_tiles(&self) -> &DrawableTilesHook<T> {
        &self.native_tiles
    }
}

impl<T> fmt::Debug for Installation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Installation").finish_non_exhaustive()
    }
}

/// Error returned by [`install`] when the engine lacks a required hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingHookError {
    /// No level interval hook.
    ComputeLevelInterval,
    /// No drawable tiles hook.
    UpdateDrawableTiles,
}

impl fmt::Display for MissingHookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ComputeLevelInterval => "compute level interval",
            Self::UpdateDrawableTiles => "update drawable tiles",
        };
        write!(f, "engine has no native `{name}` hook")
    }
}

impl core::error::Error for MissingHookError {}

/// Installs the tile cascade fix with `config` on `engine`.
///
/// Shorthand for [`install_policy`] with [`TileCascadeFix`].
///
/// # Errors
///
/// See [`install_policy`].
pub fn install<T, E>(
    engine: &mut E,
    config: LevelSelectionConfig,
) -> Result<Installation<T>, MissingHookError>
where
    T: PyramidTile + 'static,
    E: HookedEngine<T> + ?Sized,
{
    install_policy(engine, TileCascadeFix::new(config))
}

/// Wraps the engine's level hooks with `policy`.
///
/// The wrapped interval hook runs the native hook, then passes its result and
/// the live zoom through the policy, clamped to the pyramid's
/// `[0, max_level]`. The wrapped tiles hook runs the native hook, then drops
/// tiles outside the interval just chosen for that zoom.
///
/// # Errors
///
/// Returns [`MissingHookError`] if either native hook is absent. The engine is
/// left untouched in that case.
pub fn install_policy<T, E, P>(
    engine: &mut E,
    policy: P,
) -> Result<Installation<T>, MissingHookError>
where
    T: PyramidTile + 'static,
    E: HookedEngine<T> + ?Sized,
    P: LevelSelectionPolicy + 'static,
{
    let hooks = engine.hooks_mut();
    let native_interval = hooks.compute_level_interval.clone().ok_or_else(|| {
        tracing::debug!("level hook install aborted: no compute level interval hook");
        MissingHookError::ComputeLevelInterval
    })?;
    let native_tiles = hooks.update_drawable_tiles.clone().ok_or_else(|| {
        tracing::debug!("level hook install aborted: no update drawable tiles hook");
        MissingHookError::UpdateDrawableTiles
    })?;

    let filters_tiles = policy.filters_tiles();
    let selector = Rc::new(IntervalSelector {
        native: native_interval.clone(),
        policy,
        last: Cell::new(None),
    });

    let interval_selector = Rc::clone(&selector);
    hooks.compute_level_interval = Some(Rc::new(move |ctx: &LevelContext| {
        interval_selector.select(ctx)
    }));

    let tiles_native = Rc::clone(&native_tiles);
    hooks.update_drawable_tiles = Some(Rc::new(move |ctx: &LevelContext, tiles: &mut Vec<T>| {
        tiles_native(ctx, tiles);
        if filters_tiles {
            retain_drawable_tiles(tiles, selector.interval_for(ctx));
        }
    }));

    tracing::debug!(filters_tiles, "installed level selection hooks");
    Ok(Installation {
        native_interval,
        native_tiles,
    })
}

/// Restores the native hooks saved by [`install`].
///
/// Afterwards the engine holds the very same hook references it had before
/// installation.
pub fn uninstall<T, E>(engine: &mut E, installation: Installation<T>)
where
    E: HookedEngine<T> + ?Sized,
{
    let hooks = engine.hooks_mut();
    hooks.compute_level_interval = Some(installation.native_interval);
    hooks.update_drawable_tiles = Some(installation.native_tiles);
    tracing::debug!("restored native level selection hooks");
}

/// Shared state between the two wrapped hooks.
struct IntervalSelector<P> {
    native: LevelIntervalHook,
    policy: P,
    /// Interval chosen most recently, with the context it was chosen for.
    last: Cell<Option<(LevelContext, ZoomLevelInterval)>>,
}

impl<P: LevelSelectionPolicy> IntervalSelector<P> {
    fn select(&self, ctx: &LevelContext) -> ZoomLevelInterval {
        let native = (self.native)(ctx);
        let interval = self
            .policy
            .select_levels(native, ctx.zoom)
            .clamp_to(ctx.max_level);
        self.last.set(Some((*ctx, interval)));
        interval
    }

    /// Returns the interval chosen for `ctx`, recomputing it if the engine
    /// rebuilt its tile list without asking for levels first.
    fn interval_for(&self, ctx: &LevelContext) -> ZoomLevelInterval {
        match self.last.get() {
            Some((last_ctx, interval)) if last_ctx == *ctx => interval,
            _ => self.select(ctx),
        }
    }
}

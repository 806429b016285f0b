// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_oriented_bounds --heading-base-level=0

//! Understory Oriented Bounds: tight rotated boxes around transformed 2D objects.
//!
//! This crate measures objects that live in a scene graph under arbitrary
//! affine transforms and describes them with rectangles that can be drawn and
//! dragged by an interactive tool.
//!
//! - [`AxisAlignedBounds`]: origin + size rectangle with lazily cached corners.
//! - [`OrientedBounds`]: an inner rectangle rotated about its center, cached
//!   the same way.
//! - [`BoundsCalculator`]: tight oriented bounds for one object or a group,
//!   aligned to any angle, gathered in a reusable scratch buffer.
//! - [`rotation_of`], [`axis_angles`] and [`AffineParts`]: recover rotation,
//!   skew and scale from a 2×3 affine.
//! - [`SceneAccess`]: the handful of scene-graph operations the calculator
//!   needs, so any scene can be measured.
//!
//! ## Caching
//!
//! Every mutator bumps a generation counter and every derived read compares
//! that counter against the generation the cache was filled at. Reads take
//! `&self`; corners are recomputed at most once per mutation no matter how
//! many times they are read.
//!
//! ## Features
//!
//! - `std` *(default)*: use `std` float math through Kurbo.
//! - `libm`: use `libm` float math for `no_std` targets.
//! - `scene_adapter`: implement [`SceneAccess`] for `understory_scene::Scene`.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Affine, Rect};
//! use understory_oriented_bounds::{BoundsCalculator, OrientedBounds, SceneAccess};
//!
//! // A scene of two free-standing objects.
//! struct Pair([(Rect, Affine); 2]);
//!
//! impl SceneAccess for Pair {
//!     type Key = usize;
//!     fn local_bounds(&self, k: usize) -> Option<Rect> { self.0.get(k).map(|o| o.0) }
//!     fn local_transform(&self, k: usize) -> Option<Affine> { self.0.get(k).map(|o| o.1) }
//!     fn set_local_transform(&mut self, k: usize, t: Affine) {
//!         if let Some(o) = self.0.get_mut(k) { o.1 = t; }
//!     }
//!     fn world_transform(&self, k: usize) -> Option<Affine> { self.local_transform(k) }
//!     fn parent_world_transform(&self, k: usize) -> Option<Affine> {
//!         self.0.get(k).map(|_| Affine::IDENTITY)
//!     }
//!     fn refresh_world_transform(&mut self, k: usize) -> Option<Affine> { self.local_transform(k) }
//! }
//!
//! let unit = Rect::new(0.0, 0.0, 1.0, 1.0);
//! let mut scene = Pair([(unit, Affine::IDENTITY), (unit, Affine::translate((10.0, 0.0)))]);
//!
//! let mut calc = BoundsCalculator::new();
//! let mut bounds = OrientedBounds::default();
//! assert!(calc.group_oriented_bounds_at(&mut scene, &[0, 1], 0.0, true, &mut bounds));
//! assert_eq!(bounds.inner().rect(), Rect::new(0.0, 0.0, 11.0, 1.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod access;
pub mod adapters;
mod axis_aligned;
mod corners;
mod decompose;
mod oriented;

pub use access::SceneAccess;
pub use axis_aligned::AxisAlignedBounds;
pub use corners::{BoundsCalculator, transformed_corners};
pub use decompose::{AffineParts, axis_angles, normalize_angle, rotation_of};
pub use oriented::OrientedBounds;

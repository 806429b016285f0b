// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_transformer --heading-base-level=0

//! Understory Transformer: a transform gizmo for groups of scene objects.
//!
//! A [`Transformer`] draws oriented bounds around a group of objects and lets
//! a pointer translate, rotate, scale and skew the whole group through
//! handles. Every drag becomes a single world-space affine that is applied to
//! each member's transform, so the bounds and the objects never drift apart.
//!
//! - Rotation pivots on the bounds center.
//! - Scaling pivots on the corner or edge opposite the dragged handle (or on
//!   the center), measured along the bounds' own axes.
//! - Skewing pivots on the center and tracks each axis angle separately.
//! - Groups of several objects tilt while being rotated and settle back to
//!   axis-aligned bounds when the gesture ends; single objects keep their
//!   own orientation.
//!
//! The scene is reached through [`understory_oriented_bounds::SceneAccess`],
//! so any scene graph with local and world transforms can be driven.
//!
//! ## Gestures
//!
//! Feed pointer events to [`Transformer::on_pointer_down`],
//! [`Transformer::on_pointer_move`] and [`Transformer::on_pointer_up`]. A
//! press grabs one [`Target`], moves transform the group, and a release
//! commits. A press released without moving changes nothing.
//!
//! The same operations are available directly as
//! [`Transformer::translate_group`], [`Transformer::rotate_group`],
//! [`Transformer::scale_group`], [`Transformer::skew_group`] and
//! [`Transformer::commit_group`].
//!
//! ## Logging
//!
//! Gesture boundaries are logged with `tracing` at `debug`, per-move deltas
//! at `trace`, and refused degenerate input at `warn`. No subscriber is
//! installed.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Affine, Point, Rect};
//! use understory_scene::{LocalNode, Scene};
//! use understory_transformer::{Handle, ScaleHandle, Target, Transformer};
//!
//! let mut scene = Scene::new();
//! let local_bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let id = scene.insert(None, LocalNode { local_bounds, local_transform: Affine::IDENTITY });
//!
//! let mut gizmo = Transformer::default();
//! gizmo.set_group(&mut scene, &[id]);
//!
//! // Grab the right edge and pull it out by 20.
//! let grab = Point::new(100.0, 25.0);
//! assert_eq!(
//!     gizmo.on_pointer_down(&mut scene, grab),
//!     Some(Target::Handle(Handle::Scale(ScaleHandle::Right)))
//! );
//! gizmo.on_pointer_move(&mut scene, Point::new(120.0, 25.0));
//! gizmo.on_pointer_up(&mut scene);
//!
//! assert!((gizmo.bounds().inner().width() - 120.0).abs() < 1e-9);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod gesture;
mod handle;
mod transformer;

pub use config::{HandleSet, TransformerConfig};
pub use gesture::{Gesture, Target};
pub use handle::{Handle, ScaleHandle, SkewAxis};
pub use transformer::Transformer;

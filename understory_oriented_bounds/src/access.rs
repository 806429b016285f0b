// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between bounds computation and a host scene graph.

use core::fmt::Debug;

use kurbo::{Affine, Rect};

/// Read and write access to positioned objects in a scene graph.
///
/// Objects are named by a lightweight [`Key`](Self::Key). Lookups return
/// `None` for keys that no longer refer to a live object; callers skip those.
///
/// World transforms are expected to be cached by the scene. Writing a local
/// transform may leave the cached world transform stale until
/// [`refresh_world_transform`](Self::refresh_world_transform) is called.
pub trait SceneAccess {
    /// Handle to an object in the scene.
    type Key: Copy + PartialEq + Debug;

    /// Untransformed bounds of the object's content.
    fn local_bounds(&self, key: Self::Key) -> Option<Rect>;

    /// Transform from the object's space to its parent's space.
    fn local_transform(&self, key: Self::Key) -> Option<Affine>;

    /// Replace the object's local transform.
    ///
    /// Writes to stale keys are ignored.
    fn set_local_transform(&mut self, key: Self::Key, transform: Affine);

    /// Cached transform from the object's space to world space.
    fn world_transform(&self, key: Self::Key) -> Option<Affine>;

    /// Cached world transform of the object's parent, or identity for roots.
    fn parent_world_transform(&self, key: Self::Key) -> Option<Affine>;

    /// Bring the object's world transform up to date and return it.
    ///
    /// Objects that are not attached to anything resolve as if their parent
    /// were the identity. Refreshing never changes an object's attachment.
    fn refresh_world_transform(&mut self, key: Self::Key) -> Option<Affine>;
}

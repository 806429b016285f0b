// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! Forced refreshes map to [`Scene::resolve_world_transform`], which resolves
//! the node together with any stale ancestors and leaves the rest of the scene
//! for the next [`Scene::commit`].

use kurbo::{Affine, Rect};
use understory_scene::{NodeId, Scene};

use crate::SceneAccess;

impl SceneAccess for Scene {
    type Key = NodeId;

    fn local_bounds(&self, key: NodeId) -> Option<Rect> {
        Self::local_bounds(self, key)
    }

    fn local_transform(&self, key: NodeId) -> Option<Affine> {
        Self::local_transform(self, key)
    }

    fn set_local_transform(&mut self, key: NodeId, transform: Affine) {
        Self::set_local_transform(self, key, transform);
    }

    fn world_transform(&self, key: NodeId) -> Option<Affine> {
        Self::world_transform(self, key)
    }

    fn parent_world_transform(&self, key: NodeId) -> Option<Affine> {
        Self::parent_world_transform(self, key)
    }

    fn refresh_world_transform(&mut self, key: NodeId) -> Option<Affine> {
        self.resolve_world_transform(key)
    }
}

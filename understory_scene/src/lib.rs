// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: a minimal, Kurbo-native scene graph.
//!
//! Understory Scene holds a forest of positioned objects, each with local
//! bounds and a local transform relative to its parent. World transforms are
//! derived on demand.
//!
//! - Generational [`NodeId`] handles; stale handles are rejected rather than aliased.
//! - Local edits mark the affected subtree stale; nothing is recomputed eagerly.
//! - [`Scene::commit`] resolves every stale node in one depth-first pass.
//! - [`Scene::resolve_world_transform`] resolves a single node and the stale
//!   ancestors it depends on, which is what interactive tools need between
//!   frames.
//!
//! Nodes without a parent resolve against an identity parent, so a detached
//! object can be measured without attaching it anywhere.
//!
//! This crate does not index, hit test, clip, or paint. It is the smallest
//! scene that the transform tooling in `understory_transformer` can drive; a
//! host toolkit's own scene graph can take its place.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scene;
mod types;

pub use scene::Scene;
pub use types::{LocalNode, NodeId};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`SceneAccess`](crate::SceneAccess) implementations for other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the core stays free of scene
//! dependencies.
//!
//! ## Available Adapters
//!
//! - [`scene`] (`scene_adapter` feature): drives [`understory_scene::Scene`]
//!   through its generational node ids.

#[cfg(feature = "scene_adapter")]
pub mod scene;

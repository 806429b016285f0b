// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transformer configuration.

use crate::{Handle, Target};

bitflags::bitflags! {
    /// Which kinds of handle a transformer offers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HandleSet: u8 {
        /// The rotator above the top edge.
        const ROTATOR   = 0b0000_0001;
        /// Corner and edge scale handles.
        const SCALE     = 0b0000_0010;
        /// The two skew handles.
        const SKEW      = 0b0000_0100;
        /// Dragging the body to translate.
        const TRANSLATE = 0b0000_1000;
    }
}

impl Default for HandleSet {
    fn default() -> Self {
        Self::all()
    }
}

impl HandleSet {
    /// Whether gestures on `target` are allowed.
    pub fn enables(self, target: Target) -> bool {
        let needed = match target {
            Target::Body => Self::TRANSLATE,
            Target::Handle(Handle::Rotator) => Self::ROTATOR,
            Target::Handle(Handle::Scale(_)) => Self::SCALE,
            Target::Handle(Handle::Skew(_)) => Self::SKEW,
        };
        self.contains(needed)
    }
}

/// Behaviour and handle layout of a [`Transformer`](crate::Transformer).
///
/// Lengths are in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformerConfig {
    /// Handles offered for hit testing and gestures.
    pub handles: HandleSet,
    /// Rotating a group of several objects tilts the group bounds only until
    /// the gesture ends; on commit the bounds return to axis-aligned.
    pub transient_group_tilt: bool,
    /// Scale about the center instead of the opposite corner or edge.
    pub centered_scaling: bool,
    /// Scale both axes by the same factor.
    pub lock_aspect_ratio: bool,
    /// Pick distance around each handle.
    pub handle_radius: f64,
    /// Distance of the rotator outward from the top edge.
    pub rotator_offset: f64,
    /// Distance of the skew handles from the center.
    pub skew_radius: f64,
}

impl Default for TransformerConfig {
    fn default() -> Self {
        Self {
            handles: HandleSet::default(),
            transient_group_tilt: true,
            centered_scaling: false,
            lock_aspect_ratio: false,
            handle_radius: 8.0,
            rotator_offset: 32.0,
            skew_radius: 64.0,
        }
    }
}

impl TransformerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer only `handles`.
    pub fn with_handles(mut self, handles: HandleSet) -> Self {
        self.handles = handles;
        self
    }

    /// Keep a rotated group tilted after the gesture ends.
    pub fn persistent_group_tilt(mut self) -> Self {
        self.transient_group_tilt = false;
        self
    }

    /// Scale about the center.
    pub fn centered_scaling(mut self) -> Self {
        self.centered_scaling = true;
        self
    }

    /// Scale both axes uniformly.
    pub fn lock_aspect_ratio(mut self) -> Self {
        self.lock_aspect_ratio = true;
        self
    }

    /// Set the pick distance around handles.
    pub fn with_handle_radius(mut self, radius: f64) -> Self {
        self.handle_radius = radius;
        self
    }

    /// Set the rotator's distance from the top edge.
    pub fn with_rotator_offset(mut self, offset: f64) -> Self {
        self.rotator_offset = offset;
        self
    }

    /// Set the skew handles' distance from the center.
    pub fn with_skew_radius(mut self, radius: f64) -> Self {
        self.skew_radius = radius;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScaleHandle, SkewAxis};

    #[test]
    fn defaults_enable_everything() {
        let config = TransformerConfig::default();
        assert_eq!(config.handles, HandleSet::all());
        assert!(config.transient_group_tilt);
        assert!(!config.centered_scaling);
        assert!(!config.lock_aspect_ratio);
        assert_eq!(config.handle_radius, 8.0);
        assert_eq!(config.rotator_offset, 32.0);
        assert_eq!(config.skew_radius, 64.0);
    }

    #[test]
    fn handle_set_gates_targets() {
        let set = HandleSet::SCALE | HandleSet::TRANSLATE;
        assert!(set.enables(Target::Body));
        assert!(set.enables(Target::Handle(Handle::Scale(ScaleHandle::Top))));
        assert!(!set.enables(Target::Handle(Handle::Rotator)));
        assert!(!set.enables(Target::Handle(Handle::Skew(SkewAxis::Horizontal))));
    }

    #[test]
    fn builder_chains() {
        let config = TransformerConfig::new()
            .with_handles(HandleSet::ROTATOR)
            .persistent_group_tilt()
            .centered_scaling()
            .lock_aspect_ratio()
            .with_handle_radius(4.0)
            .with_rotator_offset(20.0)
            .with_skew_radius(50.0);
        assert_eq!(config.handles, HandleSet::ROTATOR);
        assert!(!config.transient_group_tilt);
        assert!(config.centered_scaling && config.lock_aspect_ratio);
        assert_eq!(
            (config.handle_radius, config.rotator_offset, config.skew_radius),
            (4.0, 20.0, 50.0)
        );
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The group transform engine.

use core::f64::consts::FRAC_PI_2;
use core::fmt::Debug;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Point, Vec2};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};
use understory_oriented_bounds::{
    BoundsCalculator, OrientedBounds, SceneAccess, axis_angles, normalize_angle,
};

use crate::{Gesture, Handle, ScaleHandle, SkewAxis, Target, TransformerConfig};

/// Lengths below this are treated as zero.
const DEGENERATE_LENGTH: f64 = 1e-9;

/// Scale factors closer to zero than this would collapse the group.
const MIN_SCALE: f64 = 1e-6;

/// Shear bases with a smaller determinant are treated as singular.
const MIN_BASIS_DETERMINANT: f64 = 1e-6;

/// Transforms a group of scene objects as one unit through draggable handles.
///
/// The transformer keeps [`OrientedBounds`] around its group and turns pointer
/// motion on a handle into one world-space affine that is pre-applied to every
/// member: `new_world = delta * old_world`, written back as
/// `new_local = parent_world⁻¹ * delta * old_world`.
///
/// Rotation pivots on the bounds center, scaling on the corner or edge
/// opposite the dragged handle, and skewing on the center, whatever rotation
/// and skew the group already carries.
///
/// Groups hold keys, not objects; the scene stays owned by the caller and is
/// passed to every call that reads or writes it. Members are expected to be
/// disjoint subtrees: a member nested under another member would receive the
/// delta twice.
#[derive(Clone, Debug)]
pub struct Transformer<K> {
    config: TransformerConfig,
    group: SmallVec<[K; 8]>,
    bounds: OrientedBounds,
    calculator: BoundsCalculator,
    /// Angle of the skew handle that tilts the vertical axis; that axis points
    /// along `skew_x + π/2`.
    skew_x: f64,
    /// Angle of the horizontal axis.
    skew_y: f64,
    gesture: Gesture,
}

impl<K> Default for Transformer<K> {
    fn default() -> Self {
        Self::new(TransformerConfig::default())
    }
}

impl<K> Transformer<K> {
    /// Create a transformer with an empty group.
    pub fn new(config: TransformerConfig) -> Self {
        Self {
            config,
            group: SmallVec::new(),
            bounds: OrientedBounds::default(),
            calculator: BoundsCalculator::new(),
            skew_x: 0.0,
            skew_y: 0.0,
            gesture: Gesture::Idle,
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &TransformerConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// Takes effect from the next operation; the bounds are not recomputed.
    pub fn set_config(&mut self, config: TransformerConfig) {
        self.config = config;
    }

    /// The members of the group, in the order they were given.
    pub fn group(&self) -> &[K] {
        &self.group
    }

    /// Bounds around the group as of the last refresh.
    pub const fn bounds(&self) -> &OrientedBounds {
        &self.bounds
    }

    /// The skew handle angles `(skew_x, skew_y)` in radians.
    ///
    /// `skew_y` is the angle of the group's horizontal axis and `skew_x + π/2`
    /// the angle of its vertical axis. An unskewed group rotated by `θ` has
    /// both equal to `θ`.
    pub const fn skew_angles(&self) -> (f64, f64) {
        (self.skew_x, self.skew_y)
    }

    /// The pointer gesture in progress.
    pub const fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Drop every member and end any gesture.
    pub fn clear_group(&mut self) {
        self.group.clear();
        self.bounds = OrientedBounds::default();
        self.skew_x = 0.0;
        self.skew_y = 0.0;
        self.gesture = Gesture::Idle;
        debug!("group cleared");
    }

    /// Where `handle` is drawn, or `None` when the group is empty or the
    /// handle is disabled.
    pub fn handle_position(&self, handle: Handle) -> Option<Point> {
        if self.group.is_empty() || !self.config.handles.enables(Target::Handle(handle)) {
            return None;
        }
        let [tl, tr, br, bl] = self.bounds.hull();
        Some(match handle {
            Handle::Scale(scale) => match scale {
                ScaleHandle::TopLeft => tl,
                ScaleHandle::Top => tl.midpoint(tr),
                ScaleHandle::TopRight => tr,
                ScaleHandle::Right => tr.midpoint(br),
                ScaleHandle::BottomRight => br,
                ScaleHandle::Bottom => br.midpoint(bl),
                ScaleHandle::BottomLeft => bl,
                ScaleHandle::Left => bl.midpoint(tl),
                ScaleHandle::Center => self.bounds.center(),
            },
            Handle::Rotator => {
                let down = Vec2::from_angle(self.bounds.rotation() + FRAC_PI_2);
                tl.midpoint(tr) - down * self.config.rotator_offset
            }
            Handle::Skew(SkewAxis::Horizontal) => {
                self.bounds.center() + Vec2::from_angle(self.skew_x) * self.config.skew_radius
            }
            Handle::Skew(SkewAxis::Vertical) => {
                self.bounds.center()
                    + Vec2::from_angle(self.skew_y + FRAC_PI_2) * self.config.skew_radius
            }
        })
    }

    /// What a press at `position` would grab.
    ///
    /// Handles win over the body: the rotator first, then the skew handles,
    /// then the eight scale handles, each within
    /// [`handle_radius`](TransformerConfig::handle_radius). Disabled handles
    /// are never hit.
    pub fn hit_test(&self, position: Point) -> Option<Target> {
        if self.group.is_empty() {
            return None;
        }
        let radius = self.config.handle_radius;
        let hit = [
            Handle::Rotator,
            Handle::Skew(SkewAxis::Horizontal),
            Handle::Skew(SkewAxis::Vertical),
        ]
        .into_iter()
        .chain(ScaleHandle::DIRECTIONAL.into_iter().map(Handle::Scale))
        .find(|&handle| {
            self.handle_position(handle)
                .is_some_and(|p| (position - p).hypot() <= radius)
        });
        if let Some(handle) = hit {
            return Some(Target::Handle(handle));
        }
        (self.config.handles.enables(Target::Body) && self.bounds.contains(position))
            .then_some(Target::Body)
    }
}

impl<K: Copy + PartialEq + Debug> Transformer<K> {
    /// Make `keys` the group and measure it.
    ///
    /// A single object gets bounds aligned to its own rotation and skew state
    /// read from its axes. A group of several starts axis-aligned. Any gesture
    /// in progress is dropped.
    pub fn set_group<S: SceneAccess<Key = K>>(&mut self, scene: &mut S, keys: &[K]) {
        self.group = SmallVec::from_slice(keys);
        self.bounds = OrientedBounds::default();
        self.gesture = Gesture::Idle;
        self.refresh(scene);
        self.seed_skew(scene);
        debug!(members = keys.len(), "group set");
    }

    /// Recompute the bounds from the members' current world transforms.
    ///
    /// A single object is measured at its own rotation; a group of several at
    /// the rotation the bounds already have. Returns `false` when no member
    /// could be measured.
    pub fn refresh<S: SceneAccess<Key = K>>(&mut self, scene: &mut S) -> bool {
        let rotation = self.bounds.rotation();
        match self.group.as_slice() {
            [] => false,
            [single] => BoundsCalculator::oriented_bounds_of(scene, *single, &mut self.bounds),
            group => self.calculator.group_oriented_bounds_at(
                scene,
                group,
                rotation,
                true,
                &mut self.bounds,
            ),
        }
    }

    /// Move every member by `delta` in world space.
    pub fn translate_group<S: SceneAccess<Key = K>>(&mut self, scene: &mut S, delta: Vec2) {
        if self.group.is_empty() {
            return;
        }
        let m = Affine::translate(delta);
        trace!(?delta, "translate");
        apply_world_delta(scene, self.group.as_slice(), m);
        self.refresh(scene);
    }

    /// Rotate the group about its center by the angle swept from `origin` to
    /// `destination`.
    ///
    /// Both skew angles follow the rotation.
    pub fn rotate_group<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        origin: Point,
        destination: Point,
    ) {
        if self.group.is_empty() {
            return;
        }
        let center = self.bounds.center();
        let from = origin - center;
        let to = destination - center;
        if from.hypot() < DEGENERATE_LENGTH || to.hypot() < DEGENERATE_LENGTH {
            return;
        }
        let angle = normalize_angle(to.atan2() - from.atan2());
        let m = Affine::rotate_about(angle, center);
        trace!(angle, ?center, "rotate");
        apply_world_delta(scene, self.group.as_slice(), m);
        self.skew_x += angle;
        self.skew_y += angle;
        self.bounds.rotate_by(angle);
        self.refresh(scene);
    }

    /// Scale the group by dragging `handle` by `delta`.
    ///
    /// The drag is projected onto the bounds' own axes, so it works the same at
    /// any rotation. The pivot is the opposite corner or edge, or the center
    /// with [`centered_scaling`](TransformerConfig::centered_scaling).
    /// [`ScaleHandle::Center`] does nothing.
    pub fn scale_group<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        handle: ScaleHandle,
        delta: Vec2,
    ) {
        let dir = handle.direction();
        if self.group.is_empty() || dir == Vec2::ZERO {
            return;
        }
        let rotation = self.bounds.rotation();
        let u = Vec2::from_angle(rotation);
        let v = Vec2::new(-u.y, u.x);
        let width = self.bounds.inner().width();
        let height = self.bounds.inner().height();
        let centered = self.config.centered_scaling;
        let reach = if centered { 2.0 } else { 1.0 };

        let mut sx = if dir.x == 0.0 {
            1.0
        } else {
            scale_factor(delta.dot(u) * dir.x * reach, width)
        };
        let mut sy = if dir.y == 0.0 {
            1.0
        } else {
            scale_factor(delta.dot(v) * dir.y * reach, height)
        };
        if self.config.lock_aspect_ratio {
            let s = if (sx - 1.0).abs() >= (sy - 1.0).abs() { sx } else { sy };
            sx = s;
            sy = s;
        }
        if sx == 1.0 && sy == 1.0 {
            return;
        }

        let center = self.bounds.center();
        let pivot = if centered {
            center
        } else {
            let anchor = handle.opposite().direction();
            center + u * (anchor.x * width * 0.5) + v * (anchor.y * height * 0.5)
        };
        let m = Affine::translate(pivot.to_vec2())
            * Affine::rotate(rotation)
            * Affine::scale_non_uniform(sx, sy)
            * Affine::rotate(-rotation)
            * Affine::translate(-pivot.to_vec2());
        trace!(sx, sy, ?pivot, "scale");
        apply_world_delta(scene, self.group.as_slice(), m);
        self.refresh(scene);
        if self.group.len() == 1 {
            // Non-uniform scale changes a skewed object's axis angles.
            self.seed_skew(scene);
        }
    }

    /// Skew the group about its center so that the `axis` skew handle points
    /// at `destination`.
    ///
    /// A horizontal skew tilts the vertical axis and leaves the bounds
    /// rotation alone. A vertical skew tilts the horizontal axis, and the
    /// bounds turn with it.
    pub fn skew_group<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        axis: SkewAxis,
        destination: Point,
    ) {
        if self.group.is_empty() {
            return;
        }
        let center = self.bounds.center();
        let reach = destination - center;
        if reach.hypot() < DEGENERATE_LENGTH {
            return;
        }
        let angle = reach.atan2();
        let (skew_x, skew_y) = match axis {
            SkewAxis::Horizontal => (angle, self.skew_y),
            SkewAxis::Vertical => (self.skew_x, angle - FRAC_PI_2),
        };
        let old = skew_basis(self.skew_x, self.skew_y);
        let new = skew_basis(skew_x, skew_y);
        if old.determinant().abs() < MIN_BASIS_DETERMINANT
            || new.determinant().abs() < MIN_BASIS_DETERMINANT
        {
            warn!(skew_x, skew_y, "singular skew basis; skew ignored");
            return;
        }
        let m = Affine::translate(center.to_vec2())
            * new
            * old.inverse()
            * Affine::translate(-center.to_vec2());
        trace!(?axis, skew_x, skew_y, "skew");
        apply_world_delta(scene, self.group.as_slice(), m);
        if axis == SkewAxis::Vertical {
            self.bounds.rotate_by(normalize_angle(skew_y - self.skew_y));
        }
        self.skew_x = skew_x;
        self.skew_y = skew_y;
        self.refresh(scene);
    }

    /// Finish a transform.
    ///
    /// With [`transient_group_tilt`](TransformerConfig::transient_group_tilt)
    /// a group of several objects drops its tilt and is measured axis-aligned
    /// again. A single object always keeps its own rotation. Skew angles are
    /// left as they are.
    pub fn commit_group<S: SceneAccess<Key = K>>(&mut self, scene: &mut S) {
        if self.group.len() > 1
            && self.config.transient_group_tilt
            && self.bounds.rotation() != 0.0
        {
            debug!(rotation = self.bounds.rotation(), "untilting group bounds");
            self.bounds.set_rotation(0.0);
        }
        self.refresh(scene);
    }

    /// Press at `position`, grabbing whatever [`hit_test`](Self::hit_test)
    /// finds there.
    ///
    /// The bounds are refreshed first so the press is tested against where
    /// the group is now. Returns the grabbed target.
    pub fn on_pointer_down<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        position: Point,
    ) -> Option<Target> {
        if self.group.is_empty() {
            return None;
        }
        self.refresh(scene);
        let Some(target) = self.hit_test(position) else {
            self.gesture = Gesture::Idle;
            return None;
        };
        self.gesture.press(target, position);
        debug!(?target, "gesture started");
        Some(target)
    }

    /// Press at `position`, grabbing `target` without hit testing.
    ///
    /// Returns `false` if the group is empty or `target` is disabled.
    pub fn on_pointer_down_on<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        target: Target,
        position: Point,
    ) -> bool {
        if self.group.is_empty() || !self.config.handles.enables(target) {
            return false;
        }
        self.refresh(scene);
        self.gesture.press(target, position);
        debug!(?target, "gesture started");
        true
    }

    /// Move the pointer to `position`, transforming the group if a gesture is
    /// in progress.
    ///
    /// Returns `true` if the move was applied.
    pub fn on_pointer_move<S: SceneAccess<Key = K>>(
        &mut self,
        scene: &mut S,
        position: Point,
    ) -> bool {
        let Some((target, last)) = self.gesture.drag(position) else {
            return false;
        };
        match target {
            Target::Body => self.translate_group(scene, position - last),
            Target::Handle(Handle::Rotator) => self.rotate_group(scene, last, position),
            Target::Handle(Handle::Scale(handle)) => {
                self.scale_group(scene, handle, position - last);
            }
            Target::Handle(Handle::Skew(axis)) => self.skew_group(scene, axis, position),
        }
        true
    }

    /// Release the pointer, ending any gesture.
    ///
    /// The transform is committed only if the pointer moved while pressed.
    /// Returns `true` if it was.
    pub fn on_pointer_up<S: SceneAccess<Key = K>>(&mut self, scene: &mut S) -> bool {
        let Some(target) = self.gesture.release() else {
            return false;
        };
        self.commit_group(scene);
        debug!(?target, "gesture committed");
        true
    }

    fn seed_skew<S: SceneAccess<Key = K>>(&mut self, scene: &S) {
        let axes = match self.group.as_slice() {
            [single] => scene.world_transform(*single).map(axis_angles),
            _ => None,
        };
        match axes {
            Some((x_angle, y_angle)) => {
                self.skew_y = x_angle;
                self.skew_x = y_angle - FRAC_PI_2;
            }
            None => {
                self.skew_x = self.bounds.rotation();
                self.skew_y = self.bounds.rotation();
            }
        }
    }
}

/// Pre-apply the world-space `delta` to every member of `group`.
fn apply_world_delta<S: SceneAccess>(scene: &mut S, group: &[S::Key], delta: Affine) {
    for &key in group {
        let Some(world) = scene.refresh_world_transform(key) else {
            continue;
        };
        let Some(parent) = scene.parent_world_transform(key) else {
            continue;
        };
        if parent.determinant().abs() < DEGENERATE_LENGTH {
            warn!(?key, "parent transform is not invertible; member skipped");
            continue;
        }
        let local = parent.inverse() * delta * world;
        if !local.is_finite() {
            warn!(?key, "transform update is not finite; member skipped");
            continue;
        }
        scene.set_local_transform(key, local);
    }
}

/// Scale factor for growing a side of length `extent` by `grow`.
fn scale_factor(grow: f64, extent: f64) -> f64 {
    if extent.abs() < DEGENERATE_LENGTH {
        warn!(extent, "zero extent; scale ignored");
        return 1.0;
    }
    let factor = 1.0 + grow / extent;
    if !factor.is_finite() || factor.abs() < MIN_SCALE {
        warn!(factor, "collapsing scale ignored");
        return 1.0;
    }
    factor
}

/// Basis whose columns are the horizontal and vertical axes for the given skew
/// angles.
fn skew_basis(skew_x: f64, skew_y: f64) -> Affine {
    let u = Vec2::from_angle(skew_y);
    let v = Vec2::from_angle(skew_x + FRAC_PI_2);
    Affine::new([u.x, u.y, v.x, v.y, 0.0, 0.0])
}

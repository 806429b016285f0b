// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rotated rectangle built on [`AxisAlignedBounds`].

use core::cell::Cell;

use kurbo::{Affine, Point, Rect};

use crate::AxisAlignedBounds;

/// A rectangle rotated about its own center.
///
/// The geometry is an *inner* [`AxisAlignedBounds`] plus a rotation in radians.
/// The center is always the inner rectangle's midpoint. The [hull](Self::hull)
/// is the inner rectangle's corners rotated about that center, in the same
/// order as the inner hull: top-left, top-right, bottom-right, bottom-left of
/// the unrotated frame.
///
/// Like the inner rectangle, the derived values are cached. The cache is keyed
/// on both this value's generation and the inner rectangle's, so edits made
/// through [`inner_mut`](Self::inner_mut) invalidate it too.
///
/// ```
/// use core::f64::consts::FRAC_PI_2;
/// use kurbo::{Point, Rect};
/// use understory_oriented_bounds::OrientedBounds;
///
/// let mut bounds = OrientedBounds::from_rect(Rect::new(-2.0, -1.0, 2.0, 1.0));
/// bounds.set_rotation(FRAC_PI_2);
/// let tl = bounds.top_left();
/// assert!((tl - Point::new(1.0, -2.0)).hypot() < 1e-12);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OrientedBounds {
    inner: AxisAlignedBounds,
    rotation: f64,
    dirty_id: u32,
    current_id: Cell<Option<u32>>,
    center: Cell<Point>,
    hull: Cell<[Point; 4]>,
    hull_updates: Cell<u64>,
}

impl PartialEq for OrientedBounds {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner && self.rotation == other.rotation
    }
}

impl OrientedBounds {
    /// Create bounds from an inner rectangle and a rotation in radians.
    pub const fn new(inner: AxisAlignedBounds, rotation: f64) -> Self {
        Self {
            inner,
            rotation,
            dirty_id: 0,
            current_id: Cell::new(None),
            center: Cell::new(Point::ORIGIN),
            hull: Cell::new([Point::ORIGIN; 4]),
            hull_updates: Cell::new(0),
        }
    }

    /// Unrotated bounds covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(AxisAlignedBounds::from_rect(rect), 0.0)
    }

    /// The unrotated rectangle.
    pub const fn inner(&self) -> &AxisAlignedBounds {
        &self.inner
    }

    /// Mutable access to the unrotated rectangle.
    ///
    /// The cached center and hull are dropped, since the rectangle may be
    /// replaced wholesale along with its generation counter.
    pub fn inner_mut(&mut self) -> &mut AxisAlignedBounds {
        self.current_id.set(None);
        &mut self.inner
    }

    /// Rotation about the center, in radians.
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Set the rotation about the center.
    pub fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.mark_dirty();
    }

    /// Add `delta` radians to the rotation.
    pub fn rotate_by(&mut self, delta: f64) {
        self.set_rotation(self.rotation + delta);
    }

    /// Replace both the inner rectangle and the rotation.
    ///
    /// Writing the frame the bounds already have keeps the cache.
    pub fn set_frame(&mut self, inner: Rect, rotation: f64) {
        self.inner.set_rect(inner);
        if self.rotation != rotation {
            self.set_rotation(rotation);
        }
    }

    /// Midpoint of the inner rectangle, which is also the pivot of the rotation.
    pub fn center(&self) -> Point {
        self.ensure_current();
        self.center.get()
    }

    /// Move the inner rectangle so that its midpoint is `center`.
    pub fn set_center(&mut self, center: Point) {
        let half_w = self.inner.width() * 0.5;
        let half_h = self.inner.height() * 0.5;
        self.inner.set_x(center.x - half_w);
        self.inner.set_y(center.y - half_h);
    }

    /// Mapping from the inner rectangle's frame to world space.
    pub fn frame(&self) -> Affine {
        Affine::rotate_about(self.rotation, self.inner.center())
    }

    /// Map a world point into the inner rectangle's frame.
    pub fn to_local(&self, point: Point) -> Point {
        Affine::rotate_about(-self.rotation, self.inner.center()) * point
    }

    /// Whether `point` lies inside the rotated rectangle.
    pub fn contains(&self, point: Point) -> bool {
        self.inner.contains(self.to_local(point))
    }

    /// The four rotated corners.
    pub fn hull(&self) -> [Point; 4] {
        self.ensure_current();
        self.hull.get()
    }

    /// Rotated top-left corner.
    pub fn top_left(&self) -> Point {
        self.hull()[0]
    }

    /// Rotated top-right corner.
    pub fn top_right(&self) -> Point {
        self.hull()[1]
    }

    /// Rotated bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.hull()[2]
    }

    /// Rotated bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        self.hull()[3]
    }

    /// How many times the rotated hull has been recomputed.
    pub fn hull_updates(&self) -> u64 {
        self.hull_updates.get()
    }

    /// Recompute the center and rotated hull now.
    ///
    /// Reads call this on demand; it only needs calling directly to move the
    /// work to a predictable point in a frame.
    pub fn update(&self) {
        let center = self.inner.center();
        let frame = Affine::rotate_about(self.rotation, center);
        self.center.set(center);
        self.hull.set(self.inner.hull().map(|p| frame * p));
        self.current_id.set(Some(self.composite_id()));
        self.hull_updates.set(self.hull_updates.get() + 1);
    }

    fn composite_id(&self) -> u32 {
        self.dirty_id.wrapping_add(self.inner.generation())
    }

    fn ensure_current(&self) {
        if self.current_id.get() != Some(self.composite_id()) {
            self.update();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty_id = self.dirty_id.wrapping_add(1);
    }
}

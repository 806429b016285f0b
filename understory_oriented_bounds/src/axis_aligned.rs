// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned rectangle with a lazily recomputed corner hull.

use core::cell::Cell;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Rect};

/// An axis-aligned rectangle stored as origin and size, with a cached hull.
///
/// Every mutator bumps a generation counter. The four-corner [hull](Self::hull)
/// is recomputed on the first read after a mutation and served from the cache
/// until the next one, so reading it every frame is free when nothing moved.
///
/// Hull order is fixed: top-left, top-right, bottom-right, bottom-left.
///
/// A rectangle with `width <= 0` or `height <= 0` is valid but contains no
/// points.
///
/// ```
/// use kurbo::Point;
/// use understory_oriented_bounds::AxisAlignedBounds;
///
/// let mut bounds = AxisAlignedBounds::new(0.0, 0.0, 10.0, 5.0);
/// bounds.pad(1.0);
/// assert_eq!(bounds.top_left(), Point::new(-1.0, -1.0));
/// assert_eq!(bounds.bottom_right(), Point::new(11.0, 6.0));
/// ```
#[derive(Clone, Debug)]
pub struct AxisAlignedBounds {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    /// Bumped by every mutation.
    dirty_id: u32,
    /// Generation the cached hull was computed at.
    current_id: Cell<Option<u32>>,
    hull: Cell<[Point; 4]>,
    hull_updates: Cell<u64>,
}

impl Default for AxisAlignedBounds {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Equality compares geometry only; cache state is ignored.
impl PartialEq for AxisAlignedBounds {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
    }
}

impl From<Rect> for AxisAlignedBounds {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl AxisAlignedBounds {
    /// Create bounds from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            dirty_id: 0,
            current_id: Cell::new(None),
            hull: Cell::new([Point::ORIGIN; 4]),
            hull_updates: Cell::new(0),
        }
    }

    /// Create bounds covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.width(), rect.height())
    }

    /// The bounds as a [`Rect`].
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Replace the geometry with `rect`.
    ///
    /// Writing the rectangle the bounds already cover is not a mutation.
    pub fn set_rect(&mut self, rect: Rect) {
        if rect == self.rect() {
            return;
        }
        self.x = rect.x0;
        self.y = rect.y0;
        self.width = rect.width();
        self.height = rect.height();
        self.mark_dirty();
    }

    /// Left edge.
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Sets the left edge, keeping the width.
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
        self.mark_dirty();
    }

    /// Top edge.
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Sets the top edge, keeping the height.
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
        self.mark_dirty();
    }

    /// Horizontal extent.
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Sets the horizontal extent.
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.mark_dirty();
    }

    /// Vertical extent.
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Sets the vertical extent.
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.mark_dirty();
    }

    /// Mutation counter; changes whenever the geometry is written.
    pub const fn generation(&self) -> u32 {
        self.dirty_id
    }

    /// How many times the hull has been recomputed.
    pub fn hull_updates(&self) -> u64 {
        self.hull_updates.get()
    }

    /// Midpoint of the rectangle.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether `point` lies inside the rectangle.
    ///
    /// The left and top edges are inside, the right and bottom edges are not.
    /// Degenerate rectangles contain nothing.
    pub fn contains(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Grow by `padding` on every side.
    pub fn pad(&mut self, padding: f64) -> &mut Self {
        self.pad_xy(padding, padding)
    }

    /// Grow by `dx` on the left and right and by `dy` on the top and bottom.
    pub fn pad_xy(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.x -= dx;
        self.y -= dy;
        self.width += dx * 2.0;
        self.height += dy * 2.0;
        self.mark_dirty();
        self
    }

    /// Shrink to the intersection with `other`.
    ///
    /// Disjoint inputs yield a zero-sized rectangle rather than a negative one.
    pub fn fit(&mut self, other: &Self) -> &mut Self {
        let x0 = self.x.max(other.x);
        let x1 = (self.x + self.width).min(other.x + other.width);
        let y0 = self.y.max(other.y);
        let y1 = (self.y + self.height).min(other.y + other.height);
        self.x = x0;
        self.width = (x1 - x0).max(0.0);
        self.y = y0;
        self.height = (y1 - y0).max(0.0);
        self.mark_dirty();
        self
    }

    /// Snap the edges outward onto a grid of `1 / resolution` cells.
    ///
    /// `epsilon` is subtracted (or added) before rounding so that values a hair
    /// past a grid line because of float error do not grow a whole cell.
    pub fn ceil(&mut self, resolution: f64, epsilon: f64) -> &mut Self {
        let x1 = ((self.x + self.width - epsilon) * resolution).ceil() / resolution;
        let y1 = ((self.y + self.height - epsilon) * resolution).ceil() / resolution;
        self.x = ((self.x + epsilon) * resolution).floor() / resolution;
        self.y = ((self.y + epsilon) * resolution).floor() / resolution;
        self.width = x1 - self.x;
        self.height = y1 - self.y;
        self.mark_dirty();
        self
    }

    /// Grow to the union with `other`.
    pub fn enlarge(&mut self, other: &Self) -> &mut Self {
        let x0 = self.x.min(other.x);
        let x1 = (self.x + self.width).max(other.x + other.width);
        let y0 = self.y.min(other.y);
        let y1 = (self.y + self.height).max(other.y + other.height);
        self.x = x0;
        self.width = x1 - x0;
        self.y = y0;
        self.height = y1 - y0;
        self.mark_dirty();
        self
    }

    /// The four corners: top-left, top-right, bottom-right, bottom-left.
    pub fn hull(&self) -> [Point; 4] {
        if self.current_id.get() != Some(self.dirty_id) {
            self.update();
        }
        self.hull.get()
    }

    /// Top-left corner.
    pub fn top_left(&self) -> Point {
        self.hull()[0]
    }

    /// Top-right corner.
    pub fn top_right(&self) -> Point {
        self.hull()[1]
    }

    /// Bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        self.hull()[2]
    }

    /// Bottom-left corner.
    pub fn bottom_left(&self) -> Point {
        self.hull()[3]
    }

    fn mark_dirty(&mut self) {
        self.dirty_id = self.dirty_id.wrapping_add(1);
    }

    fn update(&self) {
        let x1 = self.x + self.width;
        let y1 = self.y + self.height;
        self.hull.set([
            Point::new(self.x, self.y),
            Point::new(x1, self.y),
            Point::new(x1, y1),
            Point::new(self.x, y1),
        ]);
        self.current_id.set(Some(self.dirty_id));
        self.hull_updates.set(self.hull_updates.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hull_order_matches_geometry() {
        let b = AxisAlignedBounds::new(2.0, 3.0, 4.0, 5.0);
        assert_eq!(
            b.hull(),
            [
                Point::new(2.0, 3.0),
                Point::new(6.0, 3.0),
                Point::new(6.0, 8.0),
                Point::new(2.0, 8.0),
            ]
        );
    }

    #[test]
    fn hull_is_cached_until_mutation() {
        let mut b = AxisAlignedBounds::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(b.hull_updates(), 0, "nothing computed before the first read");
        let _ = b.hull();
        let _ = b.top_right();
        assert_eq!(b.hull_updates(), 1, "two reads recompute once");

        let mutations: [fn(&mut AxisAlignedBounds); 4] = [
            |b| b.set_x(1.0),
            |b| b.set_y(1.0),
            |b| b.set_width(2.0),
            |b| b.set_height(2.0),
        ];
        for mutate in mutations {
            let before = b.hull_updates();
            mutate(&mut b);
            let _ = b.hull();
            let _ = b.hull();
            assert_eq!(b.hull_updates(), before + 1, "one recompute per mutation");
        }
        assert_eq!(b.bottom_right(), Point::new(3.0, 3.0));
    }

    #[test]
    fn contains_is_half_open() {
        let b = AxisAlignedBounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(Point::new(0.0, 0.0)));
        assert!(b.contains(Point::new(9.99, 5.0)));
        assert!(!b.contains(Point::new(10.0, 5.0)));
        assert!(!b.contains(Point::new(5.0, 10.0)));
        assert!(!b.contains(Point::new(-0.1, 5.0)));
    }

    #[test]
    fn degenerate_contains_nothing() {
        let flat = AxisAlignedBounds::new(0.0, 0.0, 10.0, 0.0);
        assert!(flat.is_empty());
        assert!(!flat.contains(Point::new(0.0, 0.0)));
        let inverted = AxisAlignedBounds::new(0.0, 0.0, -3.0, 4.0);
        assert!(!inverted.contains(Point::new(-1.0, 1.0)));
    }

    #[test]
    fn pad_defaults_to_both_axes() {
        let mut a = AxisAlignedBounds::new(0.0, 0.0, 4.0, 4.0);
        a.pad(1.0);
        assert_eq!(a, AxisAlignedBounds::new(-1.0, -1.0, 6.0, 6.0));
        let mut b = AxisAlignedBounds::new(0.0, 0.0, 4.0, 4.0);
        b.pad_xy(1.0, 0.5);
        assert_eq!(b, AxisAlignedBounds::new(-1.0, -0.5, 6.0, 5.0));
    }

    #[test]
    fn fit_intersects_and_clamps() {
        let mut a = AxisAlignedBounds::new(0.0, 0.0, 10.0, 10.0);
        a.fit(&AxisAlignedBounds::new(5.0, -5.0, 10.0, 10.0));
        assert_eq!(a, AxisAlignedBounds::new(5.0, 0.0, 5.0, 5.0));

        let mut disjoint = AxisAlignedBounds::new(0.0, 0.0, 1.0, 1.0);
        disjoint.fit(&AxisAlignedBounds::new(5.0, 5.0, 1.0, 1.0));
        assert_eq!(disjoint.width(), 0.0);
        assert_eq!(disjoint.height(), 0.0);
    }

    #[test]
    fn enlarge_is_union() {
        let mut a = AxisAlignedBounds::new(0.0, 0.0, 1.0, 1.0);
        a.enlarge(&AxisAlignedBounds::new(10.0, -2.0, 1.0, 1.0));
        assert_eq!(a, AxisAlignedBounds::new(0.0, -2.0, 11.0, 3.0));
    }

    #[test]
    fn ceil_snaps_outward_and_absorbs_jitter() {
        let mut a = AxisAlignedBounds::new(0.2, 0.7, 1.5, 1.1);
        a.ceil(1.0, 0.001);
        assert_eq!(a, AxisAlignedBounds::new(0.0, 0.0, 2.0, 2.0));

        // 3.0000000001 is 3 as far as the grid is concerned.
        let mut b = AxisAlignedBounds::new(1.0, 1.0, 2.000_000_000_1, 2.0);
        b.ceil(1.0, 0.001);
        assert_eq!(b, AxisAlignedBounds::new(1.0, 1.0, 2.0, 2.0));

        let mut half = AxisAlignedBounds::new(0.3, 0.3, 0.3, 0.3);
        half.ceil(2.0, 0.001);
        assert_eq!(half, AxisAlignedBounds::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn chained_ops_mark_dirty() {
        let mut a = AxisAlignedBounds::new(0.0, 0.0, 2.0, 2.0);
        let g = a.generation();
        a.pad(1.0).enlarge(&AxisAlignedBounds::new(0.0, 0.0, 8.0, 8.0));
        assert_ne!(a.generation(), g);
        assert_eq!(a.bottom_right(), Point::new(8.0, 8.0));
    }

    #[test]
    fn set_rect_skips_unchanged_geometry() {
        let mut a = AxisAlignedBounds::new(1.0, 2.0, 3.0, 4.0);
        let _ = a.hull();
        let g = a.generation();
        a.set_rect(Rect::new(1.0, 2.0, 4.0, 6.0));
        assert_eq!(a.generation(), g);
        let _ = a.hull();
        assert_eq!(a.hull_updates(), 1);
        a.set_rect(Rect::new(0.0, 2.0, 4.0, 6.0));
        assert_ne!(a.generation(), g);
        assert_eq!(a.top_left(), Point::new(0.0, 2.0));
        assert_eq!(a.hull_updates(), 2);
    }

    #[test]
    fn rect_round_trip() {
        let r = Rect::new(1.0, 2.0, 4.0, 8.0);
        let b = AxisAlignedBounds::from(r);
        assert_eq!(b.rect(), r);
        assert_eq!(b.center(), Point::new(2.5, 5.0));
    }
}

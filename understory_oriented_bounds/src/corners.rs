// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Corner gathering and oriented bounds for single objects and groups.

use kurbo::{Affine, Point, Rect};
use smallvec::SmallVec;

use crate::{OrientedBounds, SceneAccess, rotation_of};

/// Map the corners of `bounds` through `transform`.
///
/// The corners come back in hull order: top-left, top-right, bottom-right,
/// bottom-left of the untransformed rectangle.
///
/// ```
/// use kurbo::{Affine, Point, Rect};
/// use understory_oriented_bounds::transformed_corners;
///
/// let corners = transformed_corners(Rect::new(0.0, 0.0, 2.0, 1.0), Affine::translate((5.0, 5.0)));
/// assert_eq!(corners[2], Point::new(7.0, 6.0));
/// ```
pub fn transformed_corners(bounds: Rect, transform: Affine) -> [Point; 4] {
    [
        transform * Point::new(bounds.x0, bounds.y0),
        transform * Point::new(bounds.x1, bounds.y0),
        transform * Point::new(bounds.x1, bounds.y1),
        transform * Point::new(bounds.x0, bounds.y1),
    ]
}

/// Bounding rectangle of `points` after mapping each through `transform`.
fn frame_extent(points: impl IntoIterator<Item = Point>, transform: Affine) -> Option<Rect> {
    let mut points = points.into_iter().map(|p| transform * p);
    let first = points.next()?;
    let mut extent = Rect::from_points(first, first);
    for p in points {
        extent = extent.union_pt(p);
    }
    Some(extent)
}

/// Computes oriented bounds for objects and groups of objects.
///
/// The calculator owns the scratch buffer that corner points are gathered
/// into, so repeated group computations do not allocate once the buffer has
/// grown to fit the largest group seen. Keep one per tool.
#[derive(Clone, Debug, Default)]
pub struct BoundsCalculator {
    scratch: SmallVec<[Point; 32]>,
}

impl BoundsCalculator {
    /// Create a calculator with an empty scratch buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// The angle an object's own transform is turned by.
    ///
    /// Reads the cached world transform; returns `None` for stale keys.
    pub fn natural_rotation<S: SceneAccess>(scene: &S, key: S::Key) -> Option<f64> {
        scene.world_transform(key).map(rotation_of)
    }

    /// Tight oriented bounds of a single object, aligned to its own rotation.
    ///
    /// The object's world transform is refreshed first. Returns `false` and
    /// leaves `out` untouched if `key` is stale.
    pub fn oriented_bounds_of<S: SceneAccess>(
        scene: &mut S,
        key: S::Key,
        out: &mut OrientedBounds,
    ) -> bool {
        let Some(world) = scene.refresh_world_transform(key) else {
            return false;
        };
        let Some(local) = scene.local_bounds(key) else {
            return false;
        };
        let rotation = rotation_of(world);
        let corners = transformed_corners(local, world);
        let centroid = corners
            .iter()
            .fold(Point::ZERO, |acc, p| acc + p.to_vec2() * 0.25);
        let unrotate = Affine::rotate_about(-rotation, centroid);
        let Some(extent) = frame_extent(corners, unrotate) else {
            return false;
        };
        out.set_frame(extent, rotation);
        true
    }

    /// Oriented bounds enclosing every member of `group`, aligned to `rotation`.
    ///
    /// When `refresh` is set each member's world transform is brought up to
    /// date first; otherwise cached world transforms are used. Stale keys are
    /// skipped. Returns `false` and leaves `out` untouched when no member
    /// contributed.
    ///
    /// `group` must not be empty.
    pub fn group_oriented_bounds_at<S: SceneAccess>(
        &mut self,
        scene: &mut S,
        group: &[S::Key],
        rotation: f64,
        refresh: bool,
        out: &mut OrientedBounds,
    ) -> bool {
        debug_assert!(!group.is_empty(), "group bounds need at least one member");
        self.scratch.clear();
        for &key in group {
            let world = if refresh {
                scene.refresh_world_transform(key)
            } else {
                scene.world_transform(key)
            };
            let (Some(world), Some(local)) = (world, scene.local_bounds(key)) else {
                continue;
            };
            self.scratch.extend(transformed_corners(local, world));
        }

        let Some(extent) = frame_extent(self.scratch.iter().copied(), Affine::rotate(-rotation))
        else {
            return false;
        };
        let center = Affine::rotate(rotation) * extent.center();
        out.set_frame(Rect::from_center_size(center, extent.size()), rotation);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::f64::consts::FRAC_PI_4;

    /// Flat scene: every object is a root.
    #[derive(Default)]
    struct FlatScene {
        objects: Vec<(Rect, Affine)>,
        refreshes: usize,
    }

    impl FlatScene {
        fn add(&mut self, bounds: Rect, transform: Affine) -> usize {
            self.objects.push((bounds, transform));
            self.objects.len() - 1
        }
    }

    impl SceneAccess for FlatScene {
        type Key = usize;

        fn local_bounds(&self, key: usize) -> Option<Rect> {
            self.objects.get(key).map(|o| o.0)
        }

        fn local_transform(&self, key: usize) -> Option<Affine> {
            self.objects.get(key).map(|o| o.1)
        }

        fn set_local_transform(&mut self, key: usize, transform: Affine) {
            if let Some(o) = self.objects.get_mut(key) {
                o.1 = transform;
            }
        }

        fn world_transform(&self, key: usize) -> Option<Affine> {
            self.local_transform(key)
        }

        fn parent_world_transform(&self, key: usize) -> Option<Affine> {
            self.objects.get(key).map(|_| Affine::IDENTITY)
        }

        fn refresh_world_transform(&mut self, key: usize) -> Option<Affine> {
            self.refreshes += 1;
            self.local_transform(key)
        }
    }

    fn approx_eq(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    fn unit() -> Rect {
        Rect::new(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn corners_follow_hull_order() {
        let c = transformed_corners(Rect::new(0.0, 0.0, 2.0, 1.0), Affine::rotate(FRAC_PI_4 * 2.0));
        assert!(approx_eq(c[0], Point::new(0.0, 0.0)));
        assert!(approx_eq(c[1], Point::new(0.0, 2.0)));
        assert!(approx_eq(c[2], Point::new(-1.0, 2.0)));
        assert!(approx_eq(c[3], Point::new(-1.0, 0.0)));
    }

    #[test]
    fn group_of_unit_squares_unions() {
        let mut scene = FlatScene::default();
        let a = scene.add(unit(), Affine::IDENTITY);
        let b = scene.add(unit(), Affine::translate((10.0, 0.0)));
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &[a, b], 0.0, true, &mut out));
        assert_eq!(out.inner().rect(), Rect::new(0.0, 0.0, 11.0, 1.0));
        assert_eq!(out.rotation(), 0.0);
        assert_eq!(scene.refreshes, 2, "refresh requested for every member");
    }

    #[test]
    fn cached_transforms_used_without_refresh() {
        let mut scene = FlatScene::default();
        let a = scene.add(unit(), Affine::IDENTITY);
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &[a], 0.0, false, &mut out));
        assert_eq!(scene.refreshes, 0);
    }

    #[test]
    fn single_object_group_reduces_to_object_bounds() {
        let mut scene = FlatScene::default();
        let world = Affine::translate((30.0, -12.0))
            * Affine::rotate(0.8)
            * Affine::scale_non_uniform(3.0, 0.5);
        let key = scene.add(Rect::new(-4.0, 2.0, 6.0, 9.0), world);

        let mut single = OrientedBounds::default();
        assert!(BoundsCalculator::oriented_bounds_of(&mut scene, key, &mut single));
        let natural = BoundsCalculator::natural_rotation(&scene, key).unwrap_or_default();
        assert!((natural - 0.8).abs() < 1e-12);

        let mut calc = BoundsCalculator::new();
        let mut group = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &[key], natural, true, &mut group));

        assert!((single.rotation() - group.rotation()).abs() < 1e-12);
        for (s, g) in single.hull().iter().zip(group.hull().iter()) {
            assert!(approx_eq(*s, *g), "{s:?} != {g:?}");
        }
        // With no skew the oriented hull is exactly the transformed rectangle.
        let corners = transformed_corners(Rect::new(-4.0, 2.0, 6.0, 9.0), world);
        for (h, c) in single.hull().iter().zip(corners.iter()) {
            assert!(approx_eq(*h, *c), "{h:?} != {c:?}");
        }
    }

    #[test]
    fn skewed_object_is_enclosed() {
        let mut scene = FlatScene::default();
        let world = Affine::rotate(0.3) * Affine::skew(0.5, 0.0);
        let key = scene.add(Rect::new(0.0, 0.0, 4.0, 4.0), world);
        let mut out = OrientedBounds::default();
        assert!(BoundsCalculator::oriented_bounds_of(&mut scene, key, &mut out));
        assert!((out.rotation() - 0.3).abs() < 1e-12);
        let mut inflated = out.clone();
        inflated.inner_mut().pad(1e-9);
        for c in transformed_corners(Rect::new(0.0, 0.0, 4.0, 4.0), world) {
            assert!(inflated.contains(c), "{c:?} escapes the bounds");
        }
        // Sheared along its own x axis the box widens but keeps the height.
        assert!((out.inner().height() - 4.0).abs() < 1e-9);
        assert!((out.inner().width() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn rotated_group_is_tight_in_its_frame() {
        let mut scene = FlatScene::default();
        let tilt = Affine::rotate(FRAC_PI_4);
        let a = scene.add(unit(), tilt);
        let b = scene.add(unit(), tilt * Affine::translate((3.0, 0.0)));
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &[a, b], FRAC_PI_4, true, &mut out));
        assert!((out.inner().width() - 4.0).abs() < 1e-9);
        assert!((out.inner().height() - 1.0).abs() < 1e-9);
        assert!(approx_eq(out.top_left(), Point::ORIGIN));
        assert!(approx_eq(out.bottom_right(), tilt * Point::new(4.0, 1.0)));
    }

    #[test]
    fn stale_members_are_skipped() {
        let mut scene = FlatScene::default();
        let a = scene.add(unit(), Affine::translate((2.0, 2.0)));
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &[a, 99], 0.0, true, &mut out));
        assert_eq!(out.inner().rect(), Rect::new(2.0, 2.0, 3.0, 3.0));

        let before = out.clone();
        let generation = out.inner().generation();
        assert!(!calc.group_oriented_bounds_at(&mut scene, &[7, 8], 0.3, true, &mut out));
        assert_eq!(out, before, "no contributing member leaves out untouched");
        assert_eq!(out.inner().generation(), generation);
        assert!(!BoundsCalculator::oriented_bounds_of(&mut scene, 42, &mut out));
        assert_eq!(BoundsCalculator::natural_rotation(&scene, 42), None);
    }

    #[test]
    fn scratch_is_reused() {
        let mut scene = FlatScene::default();
        let keys: Vec<usize> = (0..20)
            .map(|i| scene.add(unit(), Affine::translate((f64::from(i), 0.0))))
            .collect();
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        assert!(calc.group_oriented_bounds_at(&mut scene, &keys, 0.0, false, &mut out));
        let capacity = calc.scratch.capacity();
        assert!(calc.group_oriented_bounds_at(&mut scene, &keys[..3], 0.0, false, &mut out));
        assert_eq!(calc.scratch.capacity(), capacity);
        assert_eq!(out.inner().rect(), Rect::new(0.0, 0.0, 3.0, 1.0));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "group bounds need at least one member")]
    fn empty_group_is_rejected() {
        let mut scene = FlatScene::default();
        let mut calc = BoundsCalculator::new();
        let mut out = OrientedBounds::default();
        let _ = calc.group_oriented_bounds_at(&mut scene, &[], 0.0, true, &mut out);
    }

    #[test]
    fn flat_scene_writes_round_trip() {
        let mut scene = FlatScene::default();
        let a = scene.add(unit(), Affine::IDENTITY);
        scene.set_local_transform(a, Affine::scale(2.0));
        assert_eq!(scene.parent_world_transform(a), Some(Affine::IDENTITY));
        assert_eq!(scene.world_transform(a), Some(Affine::scale(2.0)));
    }
}

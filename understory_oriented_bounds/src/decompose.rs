// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recovering rotation, skew and scale from a 2×3 affine.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Affine, Vec2};

/// Basis vectors shorter than this are treated as collapsed.
const DEGENERATE_LENGTH: f64 = 1e-12;

/// Wrap an angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle - TAU * ((angle + PI) / TAU).floor();
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// World angles of the transformed x and y basis vectors.
///
/// A collapsed basis vector borrows its angle from the other one, offset by a
/// quarter turn, so an object squashed flat along one axis still reports a
/// usable orientation. When both collapse the result is `(0, π/2)`.
pub fn axis_angles(affine: Affine) -> (f64, f64) {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    let x_ok = a.hypot(b) > DEGENERATE_LENGTH;
    let y_ok = c.hypot(d) > DEGENERATE_LENGTH;
    match (x_ok, y_ok) {
        (true, true) => (b.atan2(a), d.atan2(c)),
        (true, false) => {
            let x = b.atan2(a);
            (x, normalize_angle(x + FRAC_PI_2))
        }
        (false, true) => {
            let y = d.atan2(c);
            (normalize_angle(y - FRAC_PI_2), y)
        }
        (false, false) => (0.0, FRAC_PI_2),
    }
}

/// The rotation an affine applies, as the angle of its transformed x axis.
///
/// Falls back to the y axis, less a quarter turn, when the x axis has
/// collapsed, and to `0` when both have. The result is in `(-π, π]`.
///
/// ```
/// use kurbo::Affine;
/// use understory_oriented_bounds::rotation_of;
///
/// let m = Affine::translate((40.0, 2.0)) * Affine::rotate(0.5) * Affine::scale(3.0);
/// assert!((rotation_of(m) - 0.5).abs() < 1e-12);
/// ```
pub fn rotation_of(affine: Affine) -> f64 {
    axis_angles(affine).0
}

/// An affine split into translation, rotation, skew and scale.
///
/// Skew is expressed as independent axis angles: the transformed x axis points
/// along `rotation + skew.y` and the transformed y axis along
/// `rotation - skew.x + π/2`. `scale` holds the lengths of the two transformed
/// axes.
///
/// [`from_affine`](Self::from_affine) always attributes rotation to the x axis,
/// so it yields `skew.y == 0`; values with a non-zero `skew.y` are still
/// accepted by [`to_affine`](Self::to_affine).
///
/// ```
/// use kurbo::Affine;
/// use understory_oriented_bounds::AffineParts;
///
/// let m = Affine::new([2.0, 0.5, -0.3, 1.5, 10.0, -4.0]);
/// let back = AffineParts::from_affine(m).to_affine();
/// for (a, b) in m.as_coeffs().iter().zip(back.as_coeffs().iter()) {
///     assert!((a - b).abs() < 1e-9);
/// }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AffineParts {
    /// Offset of the origin.
    pub translation: Vec2,
    /// Angle of the x axis, in radians.
    pub rotation: f64,
    /// Deviation of each axis from the rotated frame, in radians.
    pub skew: Vec2,
    /// Length of each transformed axis.
    pub scale: Vec2,
}

impl Default for AffineParts {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            rotation: 0.0,
            skew: Vec2::ZERO,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl AffineParts {
    /// Decompose `affine`.
    pub fn from_affine(affine: Affine) -> Self {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        let (x_angle, y_angle) = axis_angles(affine);
        Self {
            translation: Vec2::new(e, f),
            rotation: x_angle,
            skew: Vec2::new(normalize_angle(x_angle + FRAC_PI_2 - y_angle), 0.0),
            scale: Vec2::new(a.hypot(b), c.hypot(d)),
        }
    }

    /// Rebuild the affine these parts describe.
    pub fn to_affine(&self) -> Affine {
        let x_angle = self.rotation + self.skew.y;
        let y_angle = self.rotation - self.skew.x + FRAC_PI_2;
        let x_axis = Vec2::from_angle(x_angle) * self.scale.x;
        let y_axis = Vec2::from_angle(y_angle) * self.scale.y;
        Affine::new([
            x_axis.x,
            x_axis.y,
            y_axis.x,
            y_axis.y,
            self.translation.x,
            self.translation.y,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_affine(a: Affine, b: Affine) -> bool {
        a.as_coeffs()
            .iter()
            .zip(b.as_coeffs().iter())
            .all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!((normalize_angle(3.0 * PI) - PI).abs() < 1e-12);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-12, "-π maps to π");
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-12);
        assert!((normalize_angle(-TAU - 0.25) + 0.25).abs() < 1e-12);
        assert_eq!(normalize_angle(0.0), 0.0);
    }

    #[test]
    fn rotation_is_stable_near_half_turn() {
        let just_under = rotation_of(Affine::rotate(PI - 1e-9));
        assert!((just_under - (PI - 1e-9)).abs() < 1e-12);
        let just_over = rotation_of(Affine::rotate(-PI + 1e-9));
        assert!((just_over - (-PI + 1e-9)).abs() < 1e-12);
        let near_zero = rotation_of(Affine::rotate(1e-10));
        assert!((near_zero - 1e-10).abs() < 1e-15);
    }

    #[test]
    fn rotation_ignores_scale_and_translation() {
        let m = Affine::translate((-7.0, 3.0)) * Affine::rotate(-2.0) * Affine::scale_non_uniform(0.1, 9.0);
        assert!((rotation_of(m) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn rotation_falls_back_to_y_axis() {
        let flat = Affine::rotate(0.3) * Affine::scale_non_uniform(0.0, 2.0);
        assert!((rotation_of(flat) - 0.3).abs() < 1e-12);
        assert_eq!(rotation_of(Affine::scale(0.0)), 0.0);
    }

    #[test]
    fn decomposition_recomposes() {
        let cases = [
            Affine::IDENTITY,
            Affine::rotate(1.1),
            Affine::scale_non_uniform(-1.0, 1.0),
            Affine::scale_non_uniform(1.0, -2.0) * Affine::rotate(-0.4),
            Affine::skew(0.3, 0.0),
            Affine::skew(0.0, -0.7) * Affine::rotate(2.9),
            Affine::new([2.0, 0.5, -0.3, 1.5, 10.0, -4.0]),
            Affine::translate((5.0, 5.0)) * Affine::rotate(PI) * Affine::scale(0.25),
        ];
        for m in cases {
            let parts = AffineParts::from_affine(m);
            assert_eq!(parts.skew.y, 0.0, "rotation is carried by the x axis");
            assert!(approx_affine(parts.to_affine(), m), "{m:?} -> {parts:?}");
        }
    }

    #[test]
    fn decomposition_reads_pure_components() {
        let m = Affine::translate((3.0, 4.0)) * Affine::rotate(0.6) * Affine::scale_non_uniform(2.0, 5.0);
        let parts = AffineParts::from_affine(m);
        assert!((parts.rotation - 0.6).abs() < 1e-12);
        assert!(parts.skew.x.abs() < 1e-12);
        assert!((parts.scale - Vec2::new(2.0, 5.0)).hypot() < 1e-12);
        assert_eq!(parts.translation, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn axis_angles_report_both_axes() {
        // Shear the y axis towards +x by 45 degrees.
        let m = Affine::new([1.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        let (x, y) = axis_angles(m);
        assert!(x.abs() < 1e-12);
        assert!((y - FRAC_PI_2 / 2.0).abs() < 1e-12);
        let parts = AffineParts::from_affine(m);
        assert!((parts.skew.x - FRAC_PI_2 / 2.0).abs() < 1e-12);
    }

    #[test]
    fn default_parts_are_identity() {
        assert!(approx_affine(AffineParts::default().to_affine(), Affine::IDENTITY));
    }
}

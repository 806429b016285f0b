// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle identities.

use kurbo::Vec2;

/// A scale handle on the oriented bounds.
///
/// Directional handles sit on the corners and edge midpoints; dragging one
/// scales away from the opposite corner or edge. [`Center`](Self::Center)
/// marks the middle of the bounds and never scales.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScaleHandle {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    Top,
    /// Top-right corner.
    TopRight,
    /// Right edge midpoint.
    Right,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom edge midpoint.
    Bottom,
    /// Bottom-left corner.
    BottomLeft,
    /// Left edge midpoint.
    Left,
    /// Center of the bounds.
    Center,
}

impl ScaleHandle {
    /// The eight handles that scale, clockwise from the top-left corner.
    pub const DIRECTIONAL: [Self; 8] = [
        Self::TopLeft,
        Self::Top,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Bottom,
        Self::BottomLeft,
        Self::Left,
    ];

    /// Outward direction in the bounds' own frame.
    ///
    /// Components are `-1`, `0` or `1`; `x` grows rightward and `y` downward.
    /// [`Center`](Self::Center) has no direction.
    pub const fn direction(self) -> Vec2 {
        let (x, y) = match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::Top => (0.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::Right => (1.0, 0.0),
            Self::BottomRight => (1.0, 1.0),
            Self::Bottom => (0.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Center => (0.0, 0.0),
        };
        Vec2::new(x, y)
    }

    /// The handle on the other side of the center.
    pub const fn opposite(self) -> Self {
        match self {
            Self::TopLeft => Self::BottomRight,
            Self::Top => Self::Bottom,
            Self::TopRight => Self::BottomLeft,
            Self::Right => Self::Left,
            Self::BottomRight => Self::TopLeft,
            Self::Bottom => Self::Top,
            Self::BottomLeft => Self::TopRight,
            Self::Left => Self::Right,
            Self::Center => Self::Center,
        }
    }

}

/// Which axis a skew handle shears.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkewAxis {
    /// Shifts content horizontally in proportion to its height, tilting the
    /// vertical axis.
    Horizontal,
    /// Shifts content vertically in proportion to its width, tilting the
    /// horizontal axis.
    Vertical,
}

/// Any handle drawn around the bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Rotates about the center.
    Rotator,
    /// Scales along one or both axes.
    Scale(ScaleHandle),
    /// Shears about the center.
    Skew(SkewAxis),
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer gesture tracking for a single drag.
//!
//! A gesture moves `Idle → PointerDown → Dragging → Idle`. Only one target is
//! tracked at a time, and a press followed by a release without any movement
//! never reaches `Dragging`.
//!
//! ```
//! use kurbo::Point;
//! use understory_transformer::{Gesture, Target};
//!
//! let mut gesture = Gesture::default();
//! gesture.press(Target::Body, Point::new(1.0, 1.0));
//! assert_eq!(gesture.drag(Point::new(4.0, 5.0)), Some((Target::Body, Point::new(1.0, 1.0))));
//! assert_eq!(gesture.drag(Point::new(6.0, 5.0)), Some((Target::Body, Point::new(4.0, 5.0))));
//! assert_eq!(gesture.release(), Some(Target::Body));
//! assert!(gesture.is_idle());
//! ```

use kurbo::Point;

use crate::Handle;

/// What a gesture acts on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The inside of the bounds; dragging translates.
    Body,
    /// One of the handles around the bounds.
    Handle(Handle),
}

/// State of the current pointer gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No pointer is pressed.
    #[default]
    Idle,
    /// Pressed on `target` at `origin`, not yet moved.
    PointerDown {
        /// What was pressed.
        target: Target,
        /// Where the press happened.
        origin: Point,
    },
    /// Moving with the pointer held.
    Dragging {
        /// What was pressed.
        target: Target,
        /// Where the press happened.
        origin: Point,
        /// Pointer position at the previous move.
        last: Point,
    },
}

impl Gesture {
    /// True when no pointer is pressed.
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True once the pointer has moved while pressed.
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// The target of the gesture in progress.
    pub const fn target(&self) -> Option<Target> {
        match self {
            Self::Idle => None,
            Self::PointerDown { target, .. } | Self::Dragging { target, .. } => Some(*target),
        }
    }

    /// Where the gesture in progress started.
    pub const fn origin(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::PointerDown { origin, .. } | Self::Dragging { origin, .. } => Some(*origin),
        }
    }

    /// Start a gesture on `target`, replacing any gesture in progress.
    pub fn press(&mut self, target: Target, position: Point) {
        *self = Self::PointerDown {
            target,
            origin: position,
        };
    }

    /// Record a pointer move.
    ///
    /// Returns the target and the previous pointer position, or `None` when no
    /// pointer is pressed.
    pub fn drag(&mut self, position: Point) -> Option<(Target, Point)> {
        let (target, origin, previous) = match *self {
            Self::Idle => return None,
            Self::PointerDown { target, origin } => (target, origin, origin),
            Self::Dragging {
                target,
                origin,
                last,
            } => (target, origin, last),
        };
        *self = Self::Dragging {
            target,
            origin,
            last: position,
        };
        Some((target, previous))
    }

    /// End the gesture.
    ///
    /// Returns the target if the pointer moved while pressed; a press and
    /// release in place returns `None`.
    pub fn release(&mut self) -> Option<Target> {
        let dragged = match *self {
            Self::Dragging { target, .. } => Some(target),
            _ => None,
        };
        *self = Self::Idle;
        dragged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ScaleHandle, SkewAxis};

    #[test]
    fn release_without_move_is_not_a_drag() {
        let mut g = Gesture::default();
        g.press(Target::Handle(Handle::Rotator), Point::new(3.0, 3.0));
        assert!(!g.is_dragging());
        assert_eq!(g.target(), Some(Target::Handle(Handle::Rotator)));
        assert_eq!(g.release(), None);
        assert!(g.is_idle());
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut g = Gesture::default();
        assert_eq!(g.drag(Point::new(1.0, 1.0)), None);
        assert!(g.is_idle());
        assert_eq!(g.release(), None);
    }

    #[test]
    fn drag_reports_previous_position() {
        let mut g = Gesture::default();
        let target = Target::Handle(Handle::Scale(ScaleHandle::Right));
        g.press(target, Point::new(0.0, 0.0));
        assert_eq!(g.drag(Point::new(2.0, 0.0)), Some((target, Point::new(0.0, 0.0))));
        assert_eq!(g.drag(Point::new(5.0, 1.0)), Some((target, Point::new(2.0, 0.0))));
        assert_eq!(g.origin(), Some(Point::new(0.0, 0.0)));
        assert_eq!(g.release(), Some(target));
        assert_eq!(g.target(), None);
    }

    #[test]
    fn press_replaces_gesture_in_progress() {
        let mut g = Gesture::default();
        g.press(Target::Body, Point::ORIGIN);
        let _ = g.drag(Point::new(1.0, 1.0));
        let skew = Target::Handle(Handle::Skew(SkewAxis::Vertical));
        g.press(skew, Point::new(9.0, 9.0));
        assert!(!g.is_dragging());
        assert_eq!(g.target(), Some(skew));
    }
}

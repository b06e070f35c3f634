// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer tracking: incremental deltas, total offset, and click tolerance.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on pointer-down (or touch-start).
//! 2) On each move, call [`DragState::update`] to get the movement since the previous event.
//! 3) On release, [`DragState::is_click`] tells whether the pointer stayed within a tolerance.
//! 4) Call [`DragState::end`] to reset.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use mockup_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.start(Point::new(10.0, 20.0));
//!
//! assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
//! assert_eq!(drag.update(Point::new(12.0, 25.0)), Some(Vec2::new(-3.0, 0.0)));
//! assert_eq!(drag.total_offset(Point::new(12.0, 25.0)), Some(Vec2::new(2.0, 5.0)));
//! assert!(drag.is_click(Point::new(12.0, 24.0), 5.0));
//! ```

use kurbo::{Point, Vec2};

/// Pointer track between a press and a release.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    origin: Option<Point>,
    last: Option<Point>,
}

impl DragState {
    /// Begins tracking at `pos`, discarding any previous track.
    pub fn start(&mut self, pos: Point) {
        self.origin = Some(pos);
        self.last = Some(pos);
    }

    /// Records `pos` and returns the movement since the previous position.
    ///
    /// Returns `None` when no track is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.origin?;
        let delta = self.last.map(|last| pos - last);
        self.last = Some(pos);
        delta
    }

    /// Offset of `pos` from the position passed to [`Self::start`].
    #[must_use]
    pub fn total_offset(&self, pos: Point) -> Option<Vec2> {
        self.origin.map(|origin| pos - origin)
    }

    /// Returns `true` if `pos` is within `tolerance` of the origin on both axes.
    ///
    /// Used to tell a click from a drag on release. Always `false` when no
    /// track is active.
    #[must_use]
    pub fn is_click(&self, pos: Point, tolerance: f64) -> bool {
        self.total_offset(pos)
            .is_some_and(|d| d.x.abs() < tolerance && d.y.abs() < tolerance)
    }

    /// Last recorded position, if tracking.
    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.last
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` while a track is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }
}

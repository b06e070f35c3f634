// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-finger pinch tracking.
//!
//! A pinch records the distance between the two touches and the zoom at the
//! moment the second finger lands. Each subsequent move yields
//! `baseline_zoom × (distance / baseline_distance)` together with the current
//! midpoint of the touches, which callers use as the zoom anchor.
//!
//! ```
//! use kurbo::Point;
//! use mockup_event_state::pinch::PinchState;
//!
//! let pinch = PinchState::begin([Point::new(0.0, 0.0), Point::new(100.0, 0.0)], 1.0).unwrap();
//! let step = pinch.update([Point::new(-50.0, 0.0), Point::new(150.0, 0.0)]).unwrap();
//! assert_eq!(step.zoom, 2.0);
//! assert_eq!(step.center, Point::new(50.0, 0.0));
//! ```

use kurbo::Point;

/// Baseline captured when a two-finger gesture starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchState {
    start_distance: f64,
    start_zoom: f64,
}

/// Zoom target produced by a pinch move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchStep {
    /// Requested zoom (not yet clamped).
    pub zoom: f64,
    /// Midpoint of the two touches, used as the zoom anchor.
    pub center: Point,
}

impl PinchState {
    /// Records a baseline from two touch positions and the current zoom.
    ///
    /// Returns `None` when the touches coincide, since no ratio can be derived.
    #[must_use]
    pub fn begin(touches: [Point; 2], zoom: f64) -> Option<Self> {
        let start_distance = touches[0].distance(touches[1]);
        (start_distance > 0.0 && start_distance.is_finite()).then_some(Self {
            start_distance,
            start_zoom: zoom,
        })
    }

    /// Distance between the touches when the pinch began.
    #[must_use]
    pub fn start_distance(&self) -> f64 {
        self.start_distance
    }

    /// Zoom when the pinch began.
    #[must_use]
    pub fn start_zoom(&self) -> f64 {
        self.start_zoom
    }

    /// Derives the zoom target for the current touch positions.
    #[must_use]
    pub fn update(&self, touches: [Point; 2]) -> Option<PinchStep> {
        let distance = touches[0].distance(touches[1]);
        if !distance.is_finite() {
            return None;
        }
        Some(PinchStep {
            zoom: self.start_zoom * (distance / self.start_distance),
            center: touches[0].midpoint(touches[1]),
        })
    }
}

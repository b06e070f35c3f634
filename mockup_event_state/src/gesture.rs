// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture arbitration for a single pan/zoom surface.
//!
//! [`GestureState`] holds one [`ActiveGesture`] at a time. Starting a gesture
//! while another is active is refused, except that a two-finger pinch may
//! replace a one-finger touch pan (the second finger lands after the first).
//!
//! The Space key is tracked separately as a "forced pan" flag: while held, a
//! primary-button press anywhere starts a pan instead of whatever the target
//! would normally do. The flag is independent of the active gesture so that
//! releasing Space mid-drag does not drop the drag.

use kurbo::{Point, Vec2};

use crate::drag::DragState;
use crate::pinch::{PinchState, PinchStep};

/// The gesture currently mutating a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ActiveGesture {
    /// Nothing in progress.
    #[default]
    Idle,
    /// Mouse drag pan.
    MousePan(DragState),
    /// One-finger touch pan.
    TouchPan(DragState),
    /// Two-finger pinch zoom.
    Pinch(PinchState),
}

/// Exclusive gesture plus the Space-held flag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureState {
    active: ActiveGesture,
    forced_pan: bool,
}

impl GestureState {
    /// Creates an idle state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the active gesture.
    #[must_use]
    pub fn active(&self) -> &ActiveGesture {
        &self.active
    }

    /// Returns `true` if no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.active, ActiveGesture::Idle)
    }

    /// Returns `true` for mouse or touch panning.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(
            self.active,
            ActiveGesture::MousePan(_) | ActiveGesture::TouchPan(_)
        )
    }

    /// Returns `true` while a pinch is in progress.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        matches!(self.active, ActiveGesture::Pinch(_))
    }

    /// Starts a mouse pan at `pos`. Refused unless idle.
    pub fn begin_mouse_pan(&mut self, pos: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        let mut drag = DragState::default();
        drag.start(pos);
        self.active = ActiveGesture::MousePan(drag);
        true
    }

    /// Reports mouse movement while a mouse pan is active.
    pub fn mouse_pan_delta(&mut self, pos: Point) -> Option<Vec2> {
        match &mut self.active {
            ActiveGesture::MousePan(drag) => drag.update(pos),
            _ => None,
        }
    }

    /// Ends a mouse pan. Returns `true` if one was active.
    pub fn end_mouse(&mut self) -> bool {
        if matches!(self.active, ActiveGesture::MousePan(_)) {
            self.active = ActiveGesture::Idle;
            true
        } else {
            false
        }
    }

    /// Starts a one-finger touch pan at `pos`. Refused unless idle.
    pub fn begin_touch_pan(&mut self, pos: Point) -> bool {
        if !self.is_idle() {
            return false;
        }
        let mut drag = DragState::default();
        drag.start(pos);
        self.active = ActiveGesture::TouchPan(drag);
        true
    }

    /// Reports finger movement while a touch pan is active.
    pub fn touch_pan_delta(&mut self, pos: Point) -> Option<Vec2> {
        match &mut self.active {
            ActiveGesture::TouchPan(drag) => drag.update(pos),
            _ => None,
        }
    }

    /// Starts a pinch from two touches and the current zoom.
    ///
    /// Replaces an idle state or a touch pan; refused during a mouse pan or
    /// when the touches coincide.
    pub fn begin_pinch(&mut self, touches: [Point; 2], zoom: f64) -> bool {
        if matches!(self.active, ActiveGesture::MousePan(_)) {
            return false;
        }
        match PinchState::begin(touches, zoom) {
            Some(pinch) => {
                self.active = ActiveGesture::Pinch(pinch);
                true
            }
            None => false,
        }
    }

    /// Derives a zoom target from the current touches while pinching.
    #[must_use]
    pub fn pinch_step(&self, touches: [Point; 2]) -> Option<PinchStep> {
        match &self.active {
            ActiveGesture::Pinch(pinch) => pinch.update(touches),
            _ => None,
        }
    }

    /// Handles a touch end with `remaining` fingers still down.
    ///
    /// A pinch ends once fewer than two fingers remain; a touch pan ends when
    /// none remain. A pinch that drops to one finger goes straight to idle
    /// rather than resuming a pan from a stale position.
    pub fn touch_end(&mut self, remaining: usize) {
        match self.active {
            ActiveGesture::Pinch(_) if remaining < 2 => self.active = ActiveGesture::Idle,
            ActiveGesture::TouchPan(_) if remaining == 0 => self.active = ActiveGesture::Idle,
            _ => {}
        }
    }

    /// Drops any active gesture. The forced-pan flag is left as is.
    pub fn cancel(&mut self) {
        self.active = ActiveGesture::Idle;
    }

    /// Marks Space as held. Returns `false` if it already was.
    pub fn hold_forced_pan(&mut self) -> bool {
        !core::mem::replace(&mut self.forced_pan, true)
    }

    /// Marks Space as released. Returns `true` if it was held.
    pub fn release_forced_pan(&mut self) -> bool {
        core::mem::replace(&mut self.forced_pan, false)
    }

    /// Returns `true` while Space is held.
    #[must_use]
    pub fn is_forced_pan(&self) -> bool {
        self.forced_pan
    }
}

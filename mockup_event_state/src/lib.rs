// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mockup Event State: transient gesture state for pan/zoom surfaces.
//!
//! A canvas can be driven by several input modalities at once: a mouse drag,
//! a one-finger touch drag, a two-finger pinch, and a held Space key that turns
//! any left-drag into a pan. This crate keeps the small amount of state needed
//! to turn those raw events into pan deltas and zoom targets, and arbitrates
//! between them so only one gesture can mutate a surface at a time.
//!
//! - [`drag`]: Track a single pointer and report movement deltas and total offsets
//! - [`pinch`]: Record a two-touch baseline and derive zoom from the distance ratio
//! - [`gesture`]: The exclusive [`gesture::ActiveGesture`] value plus the Space-held flag
//!
//! Nothing here is persisted; everything resets when a gesture ends.
//!
//! ## Arbitration
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use mockup_event_state::gesture::GestureState;
//!
//! let mut gestures = GestureState::new();
//!
//! // One finger lands and drags.
//! assert!(gestures.begin_touch_pan(Point::new(40.0, 40.0)));
//! assert_eq!(gestures.touch_pan_delta(Point::new(50.0, 45.0)), Some(Vec2::new(10.0, 5.0)));
//!
//! // A mouse press cannot steal the surface mid-gesture.
//! assert!(!gestures.begin_mouse_pan(Point::new(0.0, 0.0)));
//!
//! // A second finger upgrades the touch pan to a pinch.
//! assert!(gestures.begin_pinch([Point::new(0.0, 0.0), Point::new(100.0, 0.0)], 1.0));
//! let step = gestures.pinch_step([Point::new(0.0, 0.0), Point::new(200.0, 0.0)]).unwrap();
//! assert_eq!(step.zoom, 2.0);
//!
//! // Lifting one finger ends the pinch outright.
//! gestures.touch_end(1);
//! assert!(gestures.is_idle());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

pub mod drag;
pub mod gesture;
pub mod pinch;

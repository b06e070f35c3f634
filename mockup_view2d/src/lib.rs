// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mockup View 2D: pan/zoom state and the transform math shared by mockup canvases.
//!
//! This crate provides a small, headless model of a zoomable content surface
//! seen through a fixed-size container. It focuses on:
//! - The persisted view state (`zoom`, `panX`, `panY`).
//! - Anchored zoom: changing zoom while a chosen container point stays fixed
//!   over the same content point.
//! - Pan clamping so content can never be dragged entirely out of view.
//! - Producing the CSS `transform` string applied to the viewport node.
//!
//! It does **not** bind input events or own any DOM nodes. Callers are
//! expected to:
//! - Keep one [`ViewState`] per surface.
//! - Route gestures into [`ViewportTransform::anchored_zoom`] and
//!   [`ViewportTransform::clamp_pan`] at a higher layer (see `mockup_canvas`).
//! - Write [`ViewportTransform::to_css_transform`] to the viewport node.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use mockup_view2d::{ViewState, ViewportTransform, ZoomLimits};
//!
//! let transform = ViewportTransform::new(ZoomLimits::default());
//! let container = Size::new(800.0, 600.0);
//! let content = Size::new(400.0, 300.0);
//!
//! // Center the content at 100%.
//! let state = transform.centered(1.0, container, content);
//! assert_eq!(state.pan(), Vec2::new(200.0, 150.0));
//!
//! // Zoom to 150% about the pointer; the content under it does not move.
//! let anchor = Point::new(300.0, 200.0);
//! let before = state.view_to_content_point(anchor);
//! let zoomed = transform.anchored_zoom(state, 1.5, Some(anchor));
//! let after = zoomed.view_to_content_point(anchor);
//! assert!((before - after).hypot() < 1e-9);
//!
//! assert_eq!(
//!     ViewportTransform::to_css_transform(&zoomed),
//!     "translate(150px, 125px) scale(1.5)"
//! );
//! ```
//!
//! ## Design notes
//!
//! - Transforms are axis‑aligned with a **uniform** zoom factor; there is no
//!   rotation.
//! - Pan is expressed in container (screen) pixels; zoom is a scalar.
//! - Out-of-range requests are clamped, never rejected.
//!
//! This crate is `no_std` (with `alloc` for the CSS string).

#![no_std]

extern crate alloc;

mod modes;
mod state;
mod transform;

pub use modes::{ClampMode, DEFAULT_PAN_MARGIN};
pub use state::{ViewState, ZoomLimits};
pub use transform::ViewportTransform;

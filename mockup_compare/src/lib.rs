// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mockup Compare: every variant of one option, side by side.
//!
//! A [`ComparisonController`] opens a [`ComparisonOption`] as a grid of
//! [`ComparisonCell`]s, each a `mockup_canvas` [`LinkedViewport`] over a
//! host-supplied [`Surface`]. The controller owns:
//!
//! - **Sync zoom.** With sync on, a pan or zoom in any cell is copied into
//!   every other cell before the handler returns. Copies go through the
//!   receiving cell's sync guard and are never reported again, so a group of
//!   any size settles after one pass.
//! - **Toolbar zoom.** [`zoom_in`](ComparisonController::zoom_in),
//!   [`zoom_out`](ComparisonController::zoom_out), and
//!   [`reset_zoom`](ComparisonController::reset_zoom) act on all cells when
//!   synced, otherwise on the last cell the user touched.
//! - **Touch.** One finger pans and two fingers pinch the touched cell. The
//!   gesture stays on the cell it started on.
//! - **Density.** A `mockup_grid` [`LayoutCursor`](mockup_grid::LayoutCursor)
//!   picks the grid shape on open, follows resizes, and the user's choice is
//!   persisted per option in a [`StateStore`].
//! - **Click-to-pick.** A press and release on the same cell that barely
//!   moves picks that variant, closing the comparison unless it is
//!   `compare_only`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use mockup_canvas::input::{HitTarget, MouseEvent};
//! use mockup_canvas::{HeadlessSurface, MemoryStore};
//! use mockup_compare::{CompareConfig, CompareGeometry, ComparisonController, ComparisonOption};
//!
//! let option = ComparisonOption::new("hero", "Hero", [("bold", "Bold"), ("airy", "Airy")]);
//! let geometry = CompareGeometry { container: Size::new(1200.0, 800.0), intrinsic: None };
//!
//! let mut compare = ComparisonController::new(MemoryStore::new(), CompareConfig::default());
//! compare.open(&option, geometry, |_| {
//!     HeadlessSurface::new(Size::new(580.0, 690.0), Size::new(400.0, 300.0))
//! });
//!
//! // Dragging the first cell drags the second along with it.
//! let at = |x, y| MouseEvent::primary(Point::new(x, y), HitTarget::Content);
//! compare.on_cell_mouse_down(0, &at(10.0, 10.0));
//! compare.on_mouse_move(&at(60.0, 30.0));
//! compare.on_mouse_up(Some(0), &at(60.0, 30.0));
//! assert_eq!(compare.cells()[1].viewport.state().pan_x, 50.0);
//!
//! // A click picks a variant and closes the comparison.
//! compare.on_cell_mouse_down(1, &at(200.0, 200.0));
//! assert_eq!(compare.on_mouse_up(Some(1), &at(201.0, 200.0)).as_deref(), Some("airy"));
//! assert!(!compare.is_open());
//! ```
//!
//! ## Logging
//!
//! Failed layout writes log at `warn`; unreadable layout indices, layout
//! remaps, and session changes at `debug`.
//!
//! [`LinkedViewport`]: mockup_canvas::LinkedViewport
//! [`Surface`]: mockup_canvas::Surface
//! [`StateStore`]: mockup_canvas::StateStore

mod config;
mod controller;

pub use config::{CompareConfig, ComparisonOption, DEFAULT_STORAGE_PREFIX, Variant};
pub use controller::{CompareGeometry, ComparisonCell, ComparisonController};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mockup Grid: choosing a grid shape for N side-by-side comparison cells.
//!
//! Planning runs in three pure steps plus a small piece of state:
//!
//! 1. [`build_steps`] lists candidate `(cols, rows)` shapes for showing
//!    1, 2, … N cells in a container, scoring each by how close its cells
//!    come to a 4:3 aspect ratio with a small per-column nudge toward the
//!    container's orientation.
//! 2. [`auto_pick`] measures how large the real content would render in each
//!    candidate after toolbar, padding, gaps, borders, and headers
//!    ([`ChromeInsets`]) are taken out, and picks the densest shape that
//!    still shows content at 100% (or the least-shrunk one).
//! 3. [`apply`] turns a shape into a [`GridTemplate`] for CSS.
//!
//! [`LayoutCursor`] holds the candidates and the chosen index across user
//! density changes, persisted indices, and container resizes.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use mockup_grid::{ChromeInsets, FALLBACK_CELL_SIZE, LayoutCursor};
//!
//! let container = Size::new(1200.0, 800.0);
//! let mut cursor = LayoutCursor::new(5, container).unwrap();
//!
//! let shapes: Vec<_> = cursor.steps().iter().map(|s| (s.cols, s.rows)).collect();
//! assert_eq!(shapes, [(1, 1), (2, 1), (2, 2), (3, 2)]);
//!
//! cursor.auto_pick(FALLBACK_CELL_SIZE, container, &ChromeInsets::default());
//! let template = cursor.template(container, &ChromeInsets::default());
//! assert_eq!(template.css_columns(), "repeat(2, 1fr)");
//! assert_eq!(template.css_rows(), "353px");
//! ```

mod chrome;
mod cursor;
mod fit;
mod step;

pub use chrome::{ChromeInsets, FALLBACK_CELL_SIZE, intrinsic_or_fallback};
pub use cursor::LayoutCursor;
pub use fit::{GridTemplate, apply, auto_pick, fit_scale};
pub use step::{
    DEFAULT_ORIENTATION_BIAS, LayoutStep, StepPlanner, TARGET_CELL_ASPECT, build_steps,
};

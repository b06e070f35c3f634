// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mockup Canvas: headless pan/zoom canvases for mockup views.
//!
//! Two canvas flavors share the math in `mockup_view2d` and the gesture
//! state in `mockup_event_state`:
//!
//! - [`SingleViewport`]: the per-view canvas. Mouse, wheel, touch, and
//!   keyboard input; pan clamping; persisted `{zoom, panX, panY}`.
//! - [`LinkedViewport`]: a comparison cell. Mouse drag and wheel only, no
//!   clamping, and a change callback that a controller uses to keep many
//!   cells in lockstep behind a [`SyncGuard`].
//!
//! Neither owns DOM nodes. A host implements [`Surface`] for its container
//! (sizes in, CSS transform out) and [`StateStore`] for its storage, converts
//! native events into the [`input`] structs, and calls the `on_*` handlers.
//! A handler returning `true` means the host should suppress the default
//! action.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use mockup_canvas::input::{HitTarget, Modifiers, MouseEvent, WheelEvent};
//! use mockup_canvas::{HeadlessSurface, MemoryStore, SingleViewport, ViewportConfig};
//!
//! let surface = HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
//! let mut canvas = SingleViewport::new(surface, MemoryStore::new(), ViewportConfig::default());
//!
//! // No saved state: the content starts centered.
//! assert_eq!(canvas.pan(), Vec2::new(200.0, 150.0));
//!
//! // Ctrl-wheel up zooms in one step about the pointer.
//! let wheel = WheelEvent::pixels(Point::new(400.0, 300.0), Vec2::new(0.0, -1.0))
//!     .with_modifiers(Modifiers::CTRL);
//! assert!(canvas.on_wheel(&wheel));
//! assert_eq!(canvas.zoom_label(), "110%");
//!
//! // Dragging empty canvas pans.
//! assert!(canvas.on_mouse_down(&MouseEvent::primary(Point::new(10.0, 10.0), HitTarget::Canvas)));
//! canvas.on_mouse_move(&MouseEvent::primary(Point::new(30.0, 10.0), HitTarget::Canvas));
//! canvas.on_mouse_up(&MouseEvent::primary(Point::new(30.0, 10.0), HitTarget::Canvas));
//! assert!(!canvas.is_panning());
//!
//! // Every change was persisted.
//! assert!(!canvas.store().is_empty());
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through `tracing`; install a subscriber in the host to see
//! them. Missing surface nodes log at `error`, failed storage writes at
//! `warn`, discarded saved state at `debug`, and transform writes at `trace`.

pub mod config;
pub mod error;
pub mod input;
pub mod linked;
pub mod storage;
pub mod surface;
pub mod workspace;

pub use config::ViewportConfig;
pub use error::{ConfigError, StorageError, SurfaceError};
pub use linked::{LinkedViewport, SyncFlag, SyncGuard};
#[cfg(feature = "web")]
pub use storage::LocalStorage;
pub use storage::{MemoryStore, StateStore};
pub use surface::{HeadlessSurface, Surface};
pub use workspace::{SingleViewport, zoom_label};

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Comparison-cell canvases that can be kept in lockstep.
//!
//! A [`LinkedViewport`] takes mouse-drag pans and Ctrl/Cmd-wheel zooms only;
//! touch and keyboard are handled once by whoever owns the group. Every
//! user-driven mutation reports the new [`ViewState`] through an optional
//! change callback. Mutations pushed in by a synchronizer go through
//! [`LinkedViewport::apply_synced`], which holds a [`SyncGuard`] for the
//! duration of the write and never reports a change, so a broadcast cannot
//! bounce back to its source.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use mockup_event_state::gesture::GestureState;
use mockup_view2d::{ClampMode, ViewState, ViewportTransform, ZoomLimits};
use tracing::trace;

use crate::input::{MouseButton, MouseEvent, WheelEvent};
use crate::surface::Surface;
use crate::workspace::zoom_label;

/// Zoom step for Ctrl/Cmd-wheel on a linked cell.
pub const LINKED_ZOOM_STEP: f64 = 0.1;

/// Callback invoked with the new state after a user-driven mutation.
pub type ChangeCallback = Box<dyn FnMut(&ViewState)>;

/// Shared "a synchronized write is in progress" flag.
///
/// Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct SyncFlag(Rc<Cell<bool>>);

impl SyncFlag {
    /// Returns `true` while a [`SyncGuard`] is held.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    /// Raises the flag, or returns `None` if it is already raised.
    #[must_use]
    pub fn acquire(&self) -> Option<SyncGuard> {
        if self.0.replace(true) {
            return None;
        }
        Some(SyncGuard(Rc::clone(&self.0)))
    }
}

/// Scoped hold on a [`SyncFlag`]. Dropping it lowers the flag, including
/// during unwinding.
#[derive(Debug)]
#[must_use = "the flag is lowered as soon as the guard is dropped"]
pub struct SyncGuard(Rc<Cell<bool>>);

impl Drop for SyncGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// One pannable, zoomable comparison cell.
pub struct LinkedViewport<S> {
    surface: S,
    transform: ViewportTransform,
    state: ViewState,
    gestures: GestureState,
    syncing: SyncFlag,
    on_change: Option<ChangeCallback>,
}

impl<S: fmt::Debug> fmt::Debug for LinkedViewport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedViewport")
            .field("surface", &self.surface)
            .field("transform", &self.transform)
            .field("state", &self.state)
            .field("gestures", &self.gestures)
            .field("syncing", &self.syncing.is_set())
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl<S: Surface> LinkedViewport<S> {
    /// Creates a cell at 100% with no pan and renders it.
    ///
    /// Cells use the default zoom bounds and never clamp their pan.
    pub fn new(surface: S) -> Self {
        let transform =
            ViewportTransform::new(ZoomLimits::default()).with_clamp_mode(ClampMode::None);
        let mut viewport = Self {
            surface,
            transform,
            state: ViewState::IDENTITY,
            gestures: GestureState::new(),
            syncing: SyncFlag::default(),
            on_change: None,
        };
        viewport.update_transform();
        viewport
    }

    /// Installs the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, callback: impl FnMut(&ViewState) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Current zoom.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.state.zoom
    }

    /// The pan/zoom math this cell uses.
    #[must_use]
    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    /// The bound surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// A handle on this cell's sync flag.
    #[must_use]
    pub fn sync_flag(&self) -> SyncFlag {
        self.syncing.clone()
    }

    /// Returns `true` while a synchronized write is in progress.
    #[must_use]
    pub fn is_syncing(&self) -> bool {
        self.syncing.is_set()
    }

    /// Returns `true` while a mouse pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.gestures.is_panning()
    }

    /// Zoom as a rounded percentage.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        zoom_label(self.state.zoom)
    }

    /// Sets the zoom, keeping `anchor` fixed if given, and reports the change.
    pub fn set_zoom(&mut self, level: f64, anchor: Option<Point>) {
        self.state = self.transform.anchored_zoom(self.state, level, anchor);
        self.update_transform();
        self.notify();
    }

    /// Pans to `pan` and reports the change.
    pub fn set_pan(&mut self, pan: Vec2) {
        self.state = self.state.with_pan(pan);
        self.update_transform();
        self.notify();
    }

    /// Returns to 100% with no pan and reports the change.
    pub fn reset(&mut self) {
        self.state = ViewState::IDENTITY;
        self.update_transform();
        self.notify();
    }

    /// Writes `state` pushed from another cell without reporting it.
    ///
    /// The zoom is clamped to this cell's bounds. Returns `false`, leaving the
    /// cell untouched, if a synchronized write is already in progress here.
    pub fn apply_synced(&mut self, state: ViewState) -> bool {
        let Some(_guard) = self.syncing.acquire() else {
            return false;
        };
        self.state = ViewState {
            zoom: self.transform.limits().clamp(state.zoom),
            ..state
        };
        self.update_transform();
        true
    }

    /// Rewrites the surface transform from the current state.
    pub fn update_transform(&mut self) {
        let css = ViewportTransform::to_css_transform(&self.state);
        trace!(zoom = self.state.zoom, pan_x = self.state.pan_x, pan_y = self.state.pan_y, "cell transform");
        self.surface.set_transform(&css);
    }

    /// Ctrl/Cmd-wheel zooms about the pointer; a plain wheel pans.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> bool {
        if event.modifiers.is_command() {
            let level = self.state.zoom + event.zoom_sign() * LINKED_ZOOM_STEP;
            self.set_zoom(level, Some(event.position));
        } else {
            self.set_pan(self.state.pan() - event.pixel_delta());
        }
        true
    }

    /// A primary-button press starts a pan.
    pub fn on_mouse_down(&mut self, event: &MouseEvent) -> bool {
        event.button == MouseButton::Primary && self.gestures.begin_mouse_pan(event.position)
    }

    /// Pans by the pointer delta while a pan is active.
    pub fn on_mouse_move(&mut self, event: &MouseEvent) -> bool {
        match self.gestures.mouse_pan_delta(event.position) {
            Some(delta) => {
                self.set_pan(self.state.pan() + delta);
                true
            }
            None => false,
        }
    }

    /// Ends a pan.
    pub fn on_mouse_up(&mut self) -> bool {
        self.gestures.end_mouse()
    }

    /// Drops any gesture in progress.
    pub fn cancel_gesture(&mut self) {
        self.gestures.cancel();
    }

    fn notify(&mut self) {
        if self.syncing.is_set() {
            return;
        }
        // A callback that installed a replacement keeps it.
        if let Some(mut callback) = self.on_change.take() {
            callback(&self.state);
            if self.on_change.is_none() {
                self.on_change = Some(callback);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kurbo::{Point, Size, Vec2};
    use mockup_view2d::ViewState;

    use super::*;
    use crate::input::{HitTarget, Modifiers};
    use crate::surface::HeadlessSurface;

    fn cell() -> LinkedViewport<HeadlessSurface> {
        LinkedViewport::new(HeadlessSurface::new(Size::new(300.0, 200.0), Size::new(400.0, 300.0)))
    }

    fn recorded(viewport: &mut LinkedViewport<HeadlessSurface>) -> Rc<RefCell<Vec<ViewState>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        viewport.set_on_change(move |state| sink.borrow_mut().push(*state));
        log
    }

    #[test]
    fn guard_is_exclusive_and_released_on_drop() {
        let flag = SyncFlag::default();
        let guard = flag.acquire();
        assert!(guard.is_some());
        assert!(flag.is_set());
        assert!(flag.acquire().is_none());
        drop(guard);
        assert!(!flag.is_set());
        assert!(flag.acquire().is_some());
    }

    #[test]
    fn guard_released_when_unwinding() {
        let flag = SyncFlag::default();
        let inner = flag.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = inner.acquire();
            panic!("broadcast failed");
        }));
        assert!(result.is_err());
        assert!(!flag.is_set());
    }

    #[test]
    fn new_cell_renders_identity() {
        let cell = cell();
        assert_eq!(cell.state(), ViewState::IDENTITY);
        assert_eq!(cell.surface().transform.as_deref(), Some("translate(0px, 0px) scale(1)"));
        assert_eq!(cell.zoom_label(), "100%");
    }

    #[test]
    fn user_mutations_report_changes() {
        let mut cell = cell();
        let log = recorded(&mut cell);
        cell.set_pan(Vec2::new(5.0, 6.0));
        cell.set_zoom(1.5, None);
        cell.reset();
        assert_eq!(
            *log.borrow(),
            vec![
                ViewState::new(1.0, 5.0, 6.0),
                ViewState::new(1.5, 5.0, 6.0),
                ViewState::IDENTITY,
            ]
        );
    }

    #[test]
    fn synced_writes_are_silent_and_clamped() {
        let mut cell = cell();
        let log = recorded(&mut cell);
        assert!(cell.apply_synced(ViewState::new(9.0, -40.0, 12.0)));
        assert_eq!(cell.state(), ViewState::new(2.0, -40.0, 12.0));
        assert!(!cell.is_syncing());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn synced_write_refused_while_already_syncing() {
        let mut cell = cell();
        let flag = cell.sync_flag();
        let _held = flag.acquire();
        assert!(!cell.apply_synced(ViewState::new(1.5, 1.0, 1.0)));
        assert_eq!(cell.state(), ViewState::IDENTITY);
    }

    #[test]
    fn pan_is_not_clamped() {
        let mut cell = cell();
        cell.set_pan(Vec2::new(-1e5, 1e5));
        assert_eq!(cell.state().pan(), Vec2::new(-1e5, 1e5));
    }

    #[test]
    fn only_primary_button_drags() {
        let mut cell = cell();
        let log = recorded(&mut cell);
        let middle = MouseEvent::primary(Point::new(10.0, 10.0), HitTarget::Canvas)
            .with_button(MouseButton::Middle);
        assert!(!cell.on_mouse_down(&middle));

        assert!(cell.on_mouse_down(&MouseEvent::primary(Point::new(10.0, 10.0), HitTarget::Content)));
        assert!(cell.on_mouse_move(&MouseEvent::primary(Point::new(25.0, 4.0), HitTarget::Content)));
        assert_eq!(cell.state().pan(), Vec2::new(15.0, -6.0));
        assert!(cell.on_mouse_up());
        assert!(!cell.on_mouse_move(&MouseEvent::primary(Point::new(90.0, 90.0), HitTarget::Content)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn wheel_zooms_with_fixed_step() {
        let mut cell = cell();
        let event = WheelEvent::pixels(Point::new(50.0, 50.0), Vec2::new(0.0, 120.0))
            .with_modifiers(Modifiers::CTRL | Modifiers::ALT);
        assert!(cell.on_wheel(&event));
        assert!((cell.zoom() - 0.9).abs() < 1e-12);
        assert!((cell.state().pan_x - 5.0).abs() < 1e-9);
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The single-view canvas: one persisted pan/zoom surface driven by mouse,
//! wheel, touch, and keyboard.

use kurbo::{Point, Size, Vec2};
use mockup_event_state::gesture::GestureState;
use mockup_view2d::{ViewState, ViewportTransform};
use tracing::{debug, error, trace, warn};

use crate::config::ViewportConfig;
use crate::input::{
    HitTarget, HostContext, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, TouchEvent,
    WheelEvent, ZoomShortcut,
};
use crate::storage::StateStore;
use crate::surface::{self, Surface};

/// A pannable, zoomable canvas bound to one [`Surface`].
///
/// Every zoom or pan mutation rewrites the surface transform and persists
/// `{zoom, panX, panY}` under [`ViewportConfig::storage_key`]. Storage
/// failures are logged and otherwise ignored.
///
/// If the surface is missing its viewport or content node at construction
/// time the canvas is *inert*: it logs an error once, never writes a
/// transform, and every handler reports the event as unhandled.
///
/// Handlers return `true` when the event was consumed and the host should
/// suppress its default action.
#[derive(Debug)]
pub struct SingleViewport<S, T> {
    surface: S,
    store: T,
    config: ViewportConfig,
    transform: ViewportTransform,
    state: ViewState,
    gestures: GestureState,
    inert: bool,
}

impl<S: Surface, T: StateStore> SingleViewport<S, T> {
    /// Binds a canvas to `surface`, restoring state from `store` if present
    /// and centering the content otherwise.
    pub fn new(surface: S, store: T, config: ViewportConfig) -> Self {
        let config = config.sanitized();
        let transform = ViewportTransform::new(config.limits());
        let mut viewport = Self {
            surface,
            store,
            config,
            transform,
            state: ViewState::IDENTITY,
            gestures: GestureState::new(),
            inert: false,
        };
        let content = match surface::validate(&viewport.surface) {
            Ok(content) => content,
            Err(err) => {
                error!(%err, storage_key = %viewport.config.storage_key, "canvas workspace left inert");
                viewport.inert = true;
                return viewport;
            }
        };
        viewport.state = match viewport.load_state() {
            Some(state) => state,
            None => viewport
                .transform
                .centered(1.0, viewport.surface.container_size(), content),
        };
        viewport.update_transform();
        viewport
    }

    /// Returns `true` if construction failed and the canvas ignores input.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.inert
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

    /// Current pan.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.state.pan()
    }

    /// Effective (sanitized) configuration.
    #[must_use]
    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The bound surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The bound surface, mutably (e.g. to update its geometry after a resize).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Returns `true` while a mouse or touch pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.gestures.is_panning()
    }

    /// Returns `true` while Space is held.
    #[must_use]
    pub fn is_space_held(&self) -> bool {
        self.gestures.is_forced_pan()
    }

    /// Zoom as a rounded percentage, e.g. `"125%"`.
    #[must_use]
    pub fn zoom_label(&self) -> String {
        zoom_label(self.state.zoom)
    }

    /// Returns `false` once the zoom has reached the upper bound.
    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.state.zoom < self.config.max_zoom
    }

    /// Returns `false` once the zoom has reached the lower bound.
    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.state.zoom > self.config.min_zoom
    }

    /// Sets the zoom, keeping `anchor` (container-local) fixed if given.
    pub fn set_zoom(&mut self, level: f64, anchor: Option<Point>) {
        if self.inert {
            return;
        }
        self.state = self.transform.anchored_zoom(self.state, level, anchor);
        self.commit();
    }

    /// Zooms in one step about the container center.
    pub fn zoom_in(&mut self) {
        self.set_zoom(self.state.zoom + self.config.zoom_step, Some(self.center()));
    }

    /// Zooms out one step about the container center.
    pub fn zoom_out(&mut self) {
        self.set_zoom(self.state.zoom - self.config.zoom_step, Some(self.center()));
    }

    /// Pans to `pan`, clamped so part of the content stays visible.
    pub fn set_pan(&mut self, pan: Vec2) {
        if self.inert {
            return;
        }
        self.state = self.transform.panned(
            self.state,
            pan,
            self.surface.container_size(),
            self.content_size(),
        );
        self.commit();
    }

    /// Returns to 100% about the container center and clears native scroll.
    ///
    /// The content is not re-centered: a view already at 100% keeps its pan.
    /// Use [`Self::center_content`] for that.
    pub fn reset(&mut self) {
        if self.inert {
            return;
        }
        self.state = self.transform.anchored_zoom(self.state, 1.0, Some(self.center()));
        self.surface.clear_scroll();
        self.commit();
    }

    /// Centers the content at the current zoom.
    pub fn center_content(&mut self) {
        if self.inert {
            return;
        }
        self.state = self.transform.centered(
            self.state.zoom,
            self.surface.container_size(),
            self.content_size(),
        );
        self.commit();
    }

    /// Rewrites the surface transform from the current state.
    ///
    /// Idempotent; call it when the surface becomes visible again.
    pub fn update_transform(&mut self) {
        if self.inert {
            return;
        }
        let css = ViewportTransform::to_css_transform(&self.state);
        trace!(zoom = self.state.zoom, pan_x = self.state.pan_x, pan_y = self.state.pan_y, "canvas transform");
        self.surface.set_transform(&css);
    }

    /// Ctrl/Cmd-wheel zooms about the pointer; a plain wheel pans.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> bool {
        if self.inert {
            return false;
        }
        if event.modifiers.is_command() {
            let step = if event.modifiers.contains(Modifiers::ALT) {
                self.config.fine_zoom_step
            } else {
                self.config.zoom_step
            };
            self.set_zoom(self.state.zoom + event.zoom_sign() * step, Some(event.position));
        } else {
            self.set_pan(self.state.pan() - event.pixel_delta());
        }
        true
    }

    /// Double-clicking empty canvas resets the view.
    pub fn on_double_click(&mut self, event: &MouseEvent) -> bool {
        if self.inert || !event.target.is_empty_canvas() {
            return false;
        }
        self.reset();
        true
    }

    /// Middle button, or primary on empty canvas or with Space held, starts a pan.
    pub fn on_mouse_down(&mut self, event: &MouseEvent) -> bool {
        if self.inert || event.target == HitTarget::Outside {
            return false;
        }
        let starts_pan = match event.button {
            MouseButton::Middle => true,
            MouseButton::Primary => event.target.is_empty_canvas() || self.gestures.is_forced_pan(),
            MouseButton::Secondary => false,
        };
        starts_pan && self.gestures.begin_mouse_pan(event.position)
    }

    /// Pans by the pointer delta while a mouse pan is active.
    pub fn on_mouse_move(&mut self, event: &MouseEvent) -> bool {
        if self.inert {
            return false;
        }
        match self.gestures.mouse_pan_delta(event.position) {
            Some(delta) => {
                self.set_pan(self.state.pan() + delta);
                true
            }
            None => false,
        }
    }

    /// Ends a mouse pan.
    pub fn on_mouse_up(&mut self, _event: &MouseEvent) -> bool {
        !self.inert && self.gestures.end_mouse()
    }

    /// Two touches start a pinch; one touch inside the view starts a pan.
    pub fn on_touch_start(&mut self, event: &TouchEvent<'_>) -> bool {
        if self.inert {
            return false;
        }
        if let Some(pair) = event.pair() {
            self.gestures.begin_pinch(pair, self.state.zoom);
            return true;
        }
        match event.touches {
            [only] if event.target.is_within_view() => self.gestures.begin_touch_pan(*only),
            _ => false,
        }
    }

    /// Pinch zooms about the touch midpoint; a single finger pans.
    pub fn on_touch_move(&mut self, event: &TouchEvent<'_>) -> bool {
        if self.inert {
            return false;
        }
        if let Some(pair) = event.pair() {
            if let Some(step) = self.gestures.pinch_step(pair) {
                self.set_zoom(step.zoom, Some(step.center));
            }
            return true;
        }
        match event.touches {
            [only] => match self.gestures.touch_pan_delta(*only) {
                Some(delta) => {
                    self.set_pan(self.state.pan() + delta);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// `event.touches` holds the touches still down.
    pub fn on_touch_end(&mut self, event: &TouchEvent<'_>) -> bool {
        if !self.inert {
            self.gestures.touch_end(event.touches.len());
        }
        false
    }

    /// Space enters forced-pan mode; Ctrl/Cmd shortcuts drive the zoom.
    ///
    /// Ignored unless this canvas belongs to the active view, and suppressed
    /// while a text input has focus.
    pub fn on_key_down(&mut self, event: &KeyEvent, ctx: &HostContext) -> bool {
        if self.inert || !ctx.view_active || ctx.input_focused {
            return false;
        }
        if event.key == Key::Space {
            return self.gestures.hold_forced_pan();
        }
        let Some(shortcut) = ZoomShortcut::from_key(event) else {
            return false;
        };
        match shortcut {
            ZoomShortcut::In => self.zoom_in(),
            ZoomShortcut::Out => self.zoom_out(),
            ZoomShortcut::Reset => self.reset(),
            ZoomShortcut::Actual => self.set_zoom(1.0, Some(self.center())),
            ZoomShortcut::Max => self.set_zoom(self.config.max_zoom, Some(self.center())),
        }
        true
    }

    /// Releasing Space leaves forced-pan mode.
    pub fn on_key_up(&mut self, event: &KeyEvent) -> bool {
        event.key == Key::Space && self.gestures.release_forced_pan()
    }

    /// Hiding the page drops a held Space, whose key-up may never arrive.
    pub fn on_visibility_change(&mut self, hidden: bool) -> bool {
        hidden && self.gestures.release_forced_pan()
    }

    fn center(&self) -> Point {
        let size = self.surface.container_size();
        Point::new(size.width / 2.0, size.height / 2.0)
    }

    fn content_size(&self) -> Size {
        self.surface.content_size().unwrap_or(Size::ZERO)
    }

    fn commit(&mut self) {
        self.update_transform();
        self.save_state();
    }

    fn save_state(&mut self) {
        let key = &self.config.storage_key;
        let json = match serde_json::to_string(&self.state) {
            Ok(json) => json,
            Err(err) => {
                warn!(%err, storage_key = %key, "failed to encode canvas state");
                return;
            }
        };
        if let Err(err) = self.store.set(key, &json) {
            warn!(%err, storage_key = %key, "failed to persist canvas state");
        }
    }

    fn load_state(&self) -> Option<ViewState> {
        let key = &self.config.storage_key;
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(storage_key = %key, "no saved canvas state");
                return None;
            }
            Err(err) => {
                debug!(%err, storage_key = %key, "canvas state unreadable");
                return None;
            }
        };
        let mut state: ViewState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                debug!(%err, storage_key = %key, "discarding corrupt canvas state");
                return None;
            }
        };
        if state.zoom == 0.0 {
            state.zoom = 1.0;
        }
        if !state.is_valid() {
            debug!(storage_key = %key, "discarding out-of-range canvas state");
            return None;
        }
        state.zoom = self.transform.limits().clamp(state.zoom);
        Some(state)
    }
}

/// Formats a zoom as a rounded percentage.
#[must_use]
pub fn zoom_label(zoom: f64) -> String {
    format!("{}%", (zoom * 100.0).round())
}

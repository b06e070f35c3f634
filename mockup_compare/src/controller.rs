// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use kurbo::Size;
use mockup_canvas::input::{
    HostContext, Key, KeyEvent, MouseEvent, TouchEvent, WheelEvent, ZoomShortcut,
};
use mockup_canvas::{LinkedViewport, StateStore, Surface};
use mockup_event_state::drag::DragState;
use mockup_event_state::gesture::GestureState;
use mockup_grid::{GridTemplate, LayoutCursor, intrinsic_or_fallback};
use mockup_view2d::ViewState;
use tracing::{debug, warn};

use crate::config::{CompareConfig, ComparisonOption, Variant};

/// Changes reported by cells, in order, tagged with the cell index.
type ChangeQueue = Rc<RefCell<VecDeque<(usize, ViewState)>>>;

/// One variant's cell in an open comparison.
#[derive(Debug)]
pub struct ComparisonCell<S> {
    /// Variant key.
    pub key: String,
    /// Header label.
    pub label: String,
    /// The cell's canvas.
    pub viewport: LinkedViewport<S>,
}

/// Measurements taken when a comparison opens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompareGeometry {
    /// Area available to the comparison overlay.
    pub container: Size,
    /// Natural size of one variant's content, if it could be measured.
    pub intrinsic: Option<Size>,
}

#[derive(Debug)]
struct Session<S> {
    option_id: String,
    cells: Vec<ComparisonCell<S>>,
    cursor: LayoutCursor,
    container: Size,
    focused: Option<usize>,
    picked: Option<String>,
    press: Option<(usize, DragState)>,
    touch: GestureState,
    touch_cell: Option<usize>,
}

/// Owns the cells of the open comparison and keeps them in lockstep.
///
/// Cells report user-driven changes into a queue that the controller drains
/// at the end of every handler. While sync zoom is on, each drained change is
/// written into every other cell through
/// [`LinkedViewport::apply_synced`], which never reports back, so one event
/// produces at most one broadcast per change.
#[derive(Debug)]
pub struct ComparisonController<S, T> {
    config: CompareConfig,
    store: T,
    changes: ChangeQueue,
    session: Option<Session<S>>,
}

impl<S: Surface, T: StateStore> ComparisonController<S, T> {
    /// Creates a closed controller.
    pub fn new(store: T, config: CompareConfig) -> Self {
        Self {
            config: config.sanitized(),
            store,
            changes: ChangeQueue::default(),
            session: None,
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// The layout index store.
    #[must_use]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Returns `true` while a comparison is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Identifier of the open option.
    #[must_use]
    pub fn option_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.option_id.as_str())
    }

    /// Cells of the open comparison, in variant order.
    #[must_use]
    pub fn cells(&self) -> &[ComparisonCell<S>] {
        match &self.session {
            Some(session) => &session.cells,
            None => &[],
        }
    }

    /// The density state of the open comparison.
    #[must_use]
    pub fn cursor(&self) -> Option<&LayoutCursor> {
        self.session.as_ref().map(|s| &s.cursor)
    }

    /// Index of the cell that last reported a change.
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.session.as_ref().and_then(|s| s.focused)
    }

    /// Opens a comparison of `option`'s variants, one cell per variant.
    ///
    /// Any open comparison is torn down first, even when the controller is
    /// `compare_only`. The density comes from the persisted index for this
    /// option when there is one and from [`LayoutCursor::auto_pick`]
    /// otherwise. Returns `false`, leaving nothing open, when the option has
    /// no variants.
    pub fn open<F>(&mut self, option: &ComparisonOption, geometry: CompareGeometry, mut surface_for: F) -> bool
    where
        F: FnMut(&Variant) -> S,
    {
        self.teardown();
        let Some(mut cursor) = LayoutCursor::new(option.variants.len(), geometry.container) else {
            debug!(option = %option.id, "nothing to compare");
            return false;
        };

        let mut cells = Vec::with_capacity(option.variants.len());
        for (index, variant) in option.variants.iter().enumerate() {
            let mut viewport = LinkedViewport::new(surface_for(variant));
            let queue = Rc::clone(&self.changes);
            viewport.set_on_change(move |state| queue.borrow_mut().push_back((index, *state)));
            cells.push(ComparisonCell {
                key: variant.key.clone(),
                label: variant.label.clone(),
                viewport,
            });
        }

        let key = self.config.layout_key(&option.id);
        match self.store.get(&key) {
            Ok(Some(saved)) => {
                cursor.restore(&saved);
            }
            Ok(None) => {
                let intrinsic = intrinsic_or_fallback(geometry.intrinsic);
                cursor.auto_pick(intrinsic, geometry.container, &self.config.chrome);
            }
            Err(err) => {
                debug!(%err, storage_key = %key, "layout index unreadable");
                let intrinsic = intrinsic_or_fallback(geometry.intrinsic);
                cursor.auto_pick(intrinsic, geometry.container, &self.config.chrome);
            }
        }

        self.session = Some(Session {
            option_id: option.id.clone(),
            cells,
            cursor,
            container: geometry.container,
            focused: None,
            picked: None,
            press: None,
            touch: GestureState::new(),
            touch_cell: None,
        });
        true
    }

    /// Closes the comparison. Does nothing when `compare_only`.
    pub fn close(&mut self) {
        if self.config.compare_only {
            return;
        }
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(option = %session.option_id, "comparison closed");
        }
        self.changes.borrow_mut().clear();
    }

    /// Whether cells are kept in lockstep.
    #[must_use]
    pub fn sync_zoom(&self) -> bool {
        self.config.sync_zoom
    }

    /// Toggles lockstep. Turning it on immediately aligns every cell with
    /// the first one.
    pub fn set_sync_zoom(&mut self, enabled: bool) {
        self.config.sync_zoom = enabled;
        if !enabled {
            return;
        }
        if let Some(session) = &mut self.session {
            if let Some(first) = session.cells.first() {
                let state = first.viewport.state();
                broadcast(&mut session.cells, 0, state);
            }
        }
    }

    /// Zooms in one step, without an anchor.
    pub fn zoom_in(&mut self) {
        let step = self.config.zoom_step;
        self.adjust(|viewport| {
            viewport
                .transform()
                .anchored_zoom(viewport.state(), viewport.zoom() + step, None)
        });
    }

    /// Zooms out one step, without an anchor.
    pub fn zoom_out(&mut self) {
        let step = self.config.zoom_step;
        self.adjust(|viewport| {
            viewport
                .transform()
                .anchored_zoom(viewport.state(), viewport.zoom() - step, None)
        });
    }

    /// Returns cells to 100% with no pan.
    pub fn reset_zoom(&mut self) {
        self.adjust(|_| ViewState::IDENTITY);
    }

    /// Applies a button action to every cell when synced, otherwise to the
    /// focused cell (or the first). Focus does not move.
    fn adjust(&mut self, next: impl Fn(&LinkedViewport<S>) -> ViewState) {
        let sync = self.config.sync_zoom;
        let Some(session) = &mut self.session else {
            return;
        };
        if sync {
            for cell in &mut session.cells {
                let state = next(&cell.viewport);
                cell.viewport.apply_synced(state);
            }
        } else {
            let target = session.focused.unwrap_or(0);
            if let Some(cell) = session.cells.get_mut(target) {
                let state = next(&cell.viewport);
                cell.viewport.apply_synced(state);
            }
        }
    }

    /// Zoom text for the toolbar: the first cell when synced, otherwise the
    /// focused cell (or the first).
    #[must_use]
    pub fn zoom_label(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        let index = if self.config.sync_zoom {
            0
        } else {
            session.focused.unwrap_or(0)
        };
        session.cells.get(index).map(|cell| cell.viewport.zoom_label())
    }

    /// Routes a wheel event over cell `index`.
    pub fn on_cell_wheel(&mut self, index: usize, event: &WheelEvent) -> bool {
        let handled = self
            .cell_mut(index)
            .is_some_and(|viewport| viewport.on_wheel(event));
        self.drain_changes();
        handled
    }

    /// Routes a press over cell `index` and remembers it for click-to-pick.
    pub fn on_cell_mouse_down(&mut self, index: usize, event: &MouseEvent) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        let Some(cell) = session.cells.get_mut(index) else {
            return false;
        };
        let handled = cell.viewport.on_mouse_down(event);
        let mut drag = DragState::default();
        drag.start(event.position);
        session.press = Some((index, drag));
        self.drain_changes();
        handled
    }

    /// Forwards a pointer move to the panning cell.
    pub fn on_mouse_move(&mut self, event: &MouseEvent) -> bool {
        let mut handled = false;
        if let Some(session) = &mut self.session {
            for cell in &mut session.cells {
                handled |= cell.viewport.on_mouse_move(event);
            }
        }
        self.drain_changes();
        handled
    }

    /// Ends any pan. A release over the pressed cell within the click
    /// tolerance picks that cell's variant, whose key is returned.
    ///
    /// `cell` is the cell under the pointer, if any.
    pub fn on_mouse_up(&mut self, cell: Option<usize>, event: &MouseEvent) -> Option<String> {
        let tolerance = self.config.click_tolerance;
        let session = self.session.as_mut()?;
        for each in &mut session.cells {
            each.viewport.on_mouse_up();
        }
        let (pressed, drag) = session.press.take()?;
        if cell != Some(pressed) || !drag.is_click(event.position, tolerance) {
            return None;
        }
        let key = session.cells.get(pressed)?.key.clone();
        self.pick(&key);
        Some(key)
    }

    /// Routes the touches down on cell `index`.
    ///
    /// Exactly two fingers start a pinch, one finger inside the view starts a
    /// pan. A touch gesture stays bound to the cell it started on until every
    /// finger lifts; touches on other cells are refused meanwhile.
    pub fn on_cell_touch_start(&mut self, index: usize, event: &TouchEvent<'_>) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        if session.touch_cell.is_some_and(|bound| bound != index) {
            return false;
        }
        let Some(cell) = session.cells.get(index) else {
            return false;
        };
        let started = match (event.pair(), event.touches) {
            (Some(pair), _) => session.touch.begin_pinch(pair, cell.viewport.zoom()),
            (None, [only]) if event.target.is_within_view() => session.touch.begin_touch_pan(*only),
            _ => false,
        };
        if started {
            session.touch_cell = Some(index);
        }
        started
    }

    /// Pinch zooms cell `index` about the touch midpoint; one finger pans it.
    ///
    /// Changes reach the other cells like any other user change.
    pub fn on_cell_touch_move(&mut self, index: usize, event: &TouchEvent<'_>) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        if session.touch_cell != Some(index) {
            return false;
        }
        let Some(cell) = session.cells.get_mut(index) else {
            return false;
        };
        let handled = match (event.pair(), event.touches) {
            (Some(pair), _) => match session.touch.pinch_step(pair) {
                Some(step) => {
                    cell.viewport.set_zoom(step.zoom, Some(step.center));
                    true
                }
                None => false,
            },
            (None, [only]) => match session.touch.touch_pan_delta(*only) {
                Some(delta) => {
                    let pan = cell.viewport.state().pan() + delta;
                    cell.viewport.set_pan(pan);
                    true
                }
                None => false,
            },
            _ => false,
        };
        self.drain_changes();
        handled
    }

    /// `event.touches` holds the touches still down on cell `index`.
    pub fn on_cell_touch_end(&mut self, index: usize, event: &TouchEvent<'_>) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        if session.touch_cell != Some(index) {
            return false;
        }
        session.touch.touch_end(event.touches.len());
        if session.touch.is_idle() {
            session.touch_cell = None;
        }
        false
    }

    /// Picks a variant: closes the comparison, or highlights the cell when
    /// `compare_only`.
    pub fn pick(&mut self, key: &str) {
        if self.config.compare_only {
            self.set_picked(key);
        } else {
            self.close();
        }
    }

    /// Highlights the cell for `key`, mirroring a selection made elsewhere.
    ///
    /// Returns whether a cell matched; an unknown key clears the highlight.
    pub fn set_picked(&mut self, key: &str) -> bool {
        let Some(session) = &mut self.session else {
            return false;
        };
        let found = session.cells.iter().any(|cell| cell.key == key);
        session.picked = found.then(|| key.to_owned());
        found
    }

    /// Key of the highlighted cell.
    #[must_use]
    pub fn picked_key(&self) -> Option<&str> {
        self.session.as_ref()?.picked.as_deref()
    }

    /// Escape closes; Ctrl/Cmd `=`, `-`, and `0` press the zoom buttons
    /// unless a text input has focus.
    pub fn on_key_down(&mut self, event: &KeyEvent, ctx: &HostContext) -> bool {
        if !self.is_open() {
            return false;
        }
        if event.key == Key::Escape {
            self.close();
            return true;
        }
        if ctx.input_focused {
            return false;
        }
        match ZoomShortcut::from_key(event) {
            Some(ZoomShortcut::In) => self.zoom_in(),
            Some(ZoomShortcut::Out) => self.zoom_out(),
            Some(ZoomShortcut::Reset) => self.reset_zoom(),
            _ => return false,
        }
        true
    }

    /// Replans the grid for a new container size.
    ///
    /// Cells move under the pointer when the grid reflows, so pans and
    /// pinches in progress are dropped. Returns the new step index.
    pub fn resize(&mut self, container: Size) -> Option<usize> {
        let session = self.session.as_mut()?;
        for cell in &mut session.cells {
            cell.viewport.cancel_gesture();
        }
        session.touch.cancel();
        session.touch_cell = None;
        session.container = container;
        Some(session.cursor.remap(container))
    }

    /// Grid template for the current density.
    #[must_use]
    pub fn layout(&self) -> Option<GridTemplate> {
        let session = self.session.as_ref()?;
        Some(session.cursor.template(session.container, &self.config.chrome))
    }

    /// Cell count shown next to the density buttons.
    #[must_use]
    pub fn display_count(&self) -> Option<usize> {
        self.cursor().map(LayoutCursor::display_count)
    }

    /// Shows fewer cells per screen. Returns whether the density changed.
    pub fn show_fewer(&mut self) -> bool {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|session| session.cursor.show_fewer());
        if moved {
            self.save_layout_index();
        }
        moved
    }

    /// Shows more cells per screen. Returns whether the density changed.
    pub fn show_more(&mut self) -> bool {
        let moved = self
            .session
            .as_mut()
            .is_some_and(|session| session.cursor.show_more());
        if moved {
            self.save_layout_index();
        }
        moved
    }

    fn save_layout_index(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let key = self.config.layout_key(&session.option_id);
        let index = session.cursor.index();
        if let Err(err) = self.store.set(&key, &index.to_string()) {
            warn!(%err, storage_key = %key, index, "failed to persist comparison layout");
        }
    }

    fn cell_mut(&mut self, index: usize) -> Option<&mut LinkedViewport<S>> {
        self.session
            .as_mut()?
            .cells
            .get_mut(index)
            .map(|cell| &mut cell.viewport)
    }

    /// Moves focus to each reporting cell and, when synced, copies its state
    /// into the others.
    fn drain_changes(&mut self) {
        loop {
            let next = self.changes.borrow_mut().pop_front();
            let Some((source, state)) = next else {
                break;
            };
            let Some(session) = &mut self.session else {
                continue;
            };
            session.focused = Some(source);
            if self.config.sync_zoom {
                broadcast(&mut session.cells, source, state);
            }
        }
    }
}

fn broadcast<S: Surface>(cells: &mut [ComparisonCell<S>], source: usize, state: ViewState) {
    for (index, cell) in cells.iter_mut().enumerate() {
        if index == source || cell.viewport.is_syncing() {
            continue;
        }
        cell.viewport.apply_synced(state);
    }
}

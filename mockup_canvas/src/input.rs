// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host-neutral input events.
//!
//! The host translates its native events into these structs before dispatch.
//! All positions are container-local CSS pixels: the host subtracts the
//! container's bounding-rect origin first.

use kurbo::{Point, Vec2};

/// Pixels per line for [`DeltaMode::Line`] wheel deltas.
pub const LINE_HEIGHT_PX: f64 = 16.0;
/// Pixels per page for [`DeltaMode::Page`] wheel deltas.
pub const PAGE_HEIGHT_PX: f64 = 100.0;

bitflags::bitflags! {
    /// Keyboard modifiers held during an event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / Option.
        const ALT   = 0b0100;
        /// Meta / Command.
        const META  = 0b1000;
    }
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS. Either one counts.
    #[must_use]
    pub fn is_command(self) -> bool {
        self.intersects(Self::CTRL | Self::META)
    }
}

/// Mouse button identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    /// Left button.
    Primary,
    /// Middle button (wheel click).
    Middle,
    /// Right button.
    Secondary,
}

/// What the pointer landed on, as classified by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HitTarget {
    /// The container, viewport, or content node itself: empty canvas.
    #[default]
    Canvas,
    /// Something drawn inside the content.
    Content,
    /// An interactive control (button, input) inside the view.
    Control,
    /// Outside this surface.
    Outside,
}

impl HitTarget {
    /// Returns `true` for empty canvas.
    #[must_use]
    pub fn is_empty_canvas(self) -> bool {
        matches!(self, Self::Canvas)
    }

    /// Returns `true` for anything inside the view that is not a control.
    #[must_use]
    pub fn is_within_view(self) -> bool {
        matches!(self, Self::Canvas | Self::Content)
    }
}

/// Unit of a wheel delta.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeltaMode {
    /// Pixels.
    #[default]
    Pixel,
    /// Lines.
    Line,
    /// Pages.
    Page,
}

/// A wheel or trackpad scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer position.
    pub position: Point,
    /// Raw delta; positive Y scrolls down.
    pub delta: Vec2,
    /// Unit of `delta`.
    pub mode: DeltaMode,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// A pixel-mode wheel event without modifiers.
    #[must_use]
    pub fn pixels(position: Point, delta: Vec2) -> Self {
        Self {
            position,
            delta,
            mode: DeltaMode::Pixel,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns a copy with `modifiers` set.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns a copy with `mode` set.
    #[must_use]
    pub fn with_mode(mut self, mode: DeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// The delta converted to pixels.
    #[must_use]
    pub fn pixel_delta(&self) -> Vec2 {
        match self.mode {
            DeltaMode::Pixel => self.delta,
            DeltaMode::Line => self.delta * LINE_HEIGHT_PX,
            DeltaMode::Page => self.delta * PAGE_HEIGHT_PX,
        }
    }

    /// Zoom direction: `+1.0` when scrolling up, `-1.0` otherwise.
    #[must_use]
    pub fn zoom_sign(&self) -> f64 {
        if self.delta.y > 0.0 { -1.0 } else { 1.0 }
    }
}

/// A mouse press, move, release, or double-click.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseEvent {
    /// Pointer position.
    pub position: Point,
    /// Button that changed (ignored for moves).
    pub button: MouseButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
    /// What the pointer is over.
    pub target: HitTarget,
}

impl MouseEvent {
    /// A primary-button event over `target`.
    #[must_use]
    pub fn primary(position: Point, target: HitTarget) -> Self {
        Self {
            position,
            button: MouseButton::Primary,
            modifiers: Modifiers::empty(),
            target,
        }
    }

    /// Returns a copy with `button` set.
    #[must_use]
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

/// Touches currently down on the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent<'a> {
    /// Positions of every active touch, in host order.
    pub touches: &'a [Point],
    /// What the first touch landed on.
    pub target: HitTarget,
}

impl<'a> TouchEvent<'a> {
    /// Creates a touch event.
    #[must_use]
    pub fn new(touches: &'a [Point], target: HitTarget) -> Self {
        Self { touches, target }
    }

    /// The two touches of a pinch. `None` unless exactly two are down.
    #[must_use]
    pub fn pair(&self) -> Option<[Point; 2]> {
        match self.touches {
            [a, b] => Some([*a, *b]),
            _ => None,
        }
    }
}

/// Keys the canvases react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// The space bar (matched by physical code).
    Space,
    /// Escape.
    Escape,
    /// A printable character as reported by the layout.
    Char(char),
    /// Anything else.
    Other,
}

/// A key press or release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a key event.
    #[must_use]
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// State owned by the host page that keyboard handlers consult.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostContext {
    /// A text input, textarea, or editable element has focus.
    pub input_focused: bool,
    /// The view owning this surface is the active one.
    pub view_active: bool,
}

impl HostContext {
    /// An active view with nothing focused.
    pub const ACTIVE: Self = Self {
        input_focused: false,
        view_active: true,
    };
}

/// Keyboard zoom command derived from a Ctrl/Cmd shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomShortcut {
    /// `=` or `+`.
    In,
    /// `-` or `_`.
    Out,
    /// `0`.
    Reset,
    /// `1`.
    Actual,
    /// `9`.
    Max,
}

impl ZoomShortcut {
    /// Decodes a shortcut; requires Ctrl or Cmd.
    #[must_use]
    pub fn from_key(event: &KeyEvent) -> Option<Self> {
        if !event.modifiers.is_command() {
            return None;
        }
        match event.key {
            Key::Char('=' | '+') => Some(Self::In),
            Key::Char('-' | '_') => Some(Self::Out),
            Key::Char('0') => Some(Self::Reset),
            Key::Char('1') => Some(Self::Actual),
            Key::Char('9') => Some(Self::Max),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_modes_scale_to_pixels() {
        let base = WheelEvent::pixels(Point::ZERO, Vec2::new(1.0, -2.0));
        assert_eq!(base.pixel_delta(), Vec2::new(1.0, -2.0));
        assert_eq!(base.with_mode(DeltaMode::Line).pixel_delta(), Vec2::new(16.0, -32.0));
        assert_eq!(base.with_mode(DeltaMode::Page).pixel_delta(), Vec2::new(100.0, -200.0));
    }

    #[test]
    fn zoom_sign_follows_negated_delta_y() {
        let down = WheelEvent::pixels(Point::ZERO, Vec2::new(0.0, 3.0));
        let up = WheelEvent::pixels(Point::ZERO, Vec2::new(0.0, -3.0));
        let flat = WheelEvent::pixels(Point::ZERO, Vec2::new(5.0, 0.0));
        assert_eq!(down.zoom_sign(), -1.0);
        assert_eq!(up.zoom_sign(), 1.0);
        assert_eq!(flat.zoom_sign(), 1.0);
    }

    #[test]
    fn shortcuts_need_command() {
        let plain = KeyEvent::new(Key::Char('='), Modifiers::empty());
        assert_eq!(ZoomShortcut::from_key(&plain), None);

        for (ch, expected) in [
            ('=', ZoomShortcut::In),
            ('+', ZoomShortcut::In),
            ('-', ZoomShortcut::Out),
            ('_', ZoomShortcut::Out),
            ('0', ZoomShortcut::Reset),
            ('1', ZoomShortcut::Actual),
            ('9', ZoomShortcut::Max),
        ] {
            let ctrl = KeyEvent::new(Key::Char(ch), Modifiers::CTRL);
            let meta = KeyEvent::new(Key::Char(ch), Modifiers::META);
            assert_eq!(ZoomShortcut::from_key(&ctrl), Some(expected));
            assert_eq!(ZoomShortcut::from_key(&meta), Some(expected));
        }
        assert_eq!(ZoomShortcut::from_key(&KeyEvent::new(Key::Char('5'), Modifiers::CTRL)), None);
    }

    #[test]
    fn touch_pair_needs_exactly_two() {
        let one = [Point::new(1.0, 1.0)];
        let two = [Point::new(1.0, 1.0), Point::new(2.0, 2.0)];
        let three = [Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)];
        assert_eq!(TouchEvent::new(&one, HitTarget::Canvas).pair(), None);
        assert_eq!(
            TouchEvent::new(&two, HitTarget::Canvas).pair(),
            Some([Point::new(1.0, 1.0), Point::new(2.0, 2.0)])
        );
        assert_eq!(TouchEvent::new(&three, HitTarget::Canvas).pair(), None);
    }

    #[test]
    fn hit_target_classes() {
        assert!(HitTarget::Canvas.is_empty_canvas());
        assert!(!HitTarget::Content.is_empty_canvas());
        assert!(HitTarget::Content.is_within_view());
        assert!(!HitTarget::Control.is_within_view());
        assert!(!HitTarget::Outside.is_within_view());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of `SingleViewport`: persistence, input routing, and
//! the inert fallback.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use mockup_canvas::input::{
    HitTarget, HostContext, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, TouchEvent,
    WheelEvent,
};
use mockup_canvas::{HeadlessSurface, MemoryStore, SingleViewport, StateStore, ViewportConfig};
use mockup_view2d::ViewState;

const KEY: &str = "mockup-canvas-state";

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0))
}

fn canvas_with(store: MemoryStore) -> SingleViewport<HeadlessSurface, MemoryStore> {
    SingleViewport::new(surface(), store, ViewportConfig::default())
}

fn seeded(json: &str) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.seed(KEY, json);
    store
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(Key::Char(ch), Modifiers::CTRL)
}

fn space() -> KeyEvent {
    KeyEvent::new(Key::Space, Modifiers::empty())
}

#[test]
fn mutations_persist_flat_json() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_pan(Vec2::new(10.0, 20.0));
    assert_eq!(
        canvas.store().get(KEY).unwrap().as_deref(),
        Some(r#"{"zoom":1.0,"panX":10.0,"panY":20.0}"#)
    );
}

#[test]
fn saved_state_is_restored_and_rendered() {
    let canvas = canvas_with(seeded(r#"{"zoom":1.5,"panX":-10,"panY":20}"#));
    assert_eq!(canvas.state(), ViewState::new(1.5, -10.0, 20.0));
    assert_eq!(
        canvas.surface().transform.as_deref(),
        Some("translate(-10px, 20px) scale(1.5)")
    );
}

#[test]
fn saved_state_defaults_missing_fields_and_zero_zoom() {
    let canvas = canvas_with(seeded(r#"{"zoom":0,"panX":5}"#));
    assert_eq!(canvas.state(), ViewState::new(1.0, 5.0, 0.0));
}

#[test]
fn saved_zoom_outside_bounds_is_clamped() {
    let canvas = canvas_with(seeded(r#"{"zoom":10,"panX":0,"panY":0}"#));
    assert_eq!(canvas.zoom(), 2.0);
}

#[test]
fn corrupt_state_falls_back_to_centering() {
    for raw in ["not json", r#"{"zoom":"x"}"#, r#"{"zoom":-3}"#, "null"] {
        let canvas = canvas_with(seeded(raw));
        assert_eq!(canvas.state(), ViewState::new(1.0, 200.0, 150.0), "input {raw}");
    }
}

#[test]
fn storage_write_failures_do_not_block_interaction() {
    let mut canvas = canvas_with(MemoryStore::full());
    canvas.set_pan(Vec2::new(12.0, 34.0));
    canvas.zoom_in();
    assert!((canvas.zoom() - 1.1).abs() < 1e-12);
    assert!(canvas.store().get(KEY).unwrap().is_none());
}

#[test]
fn missing_nodes_leave_the_canvas_inert() {
    let container = Size::new(800.0, 600.0);
    for surface in [
        HeadlessSurface::without_viewport(container, Size::new(400.0, 300.0)),
        HeadlessSurface::without_content(container),
    ] {
        let mut canvas = SingleViewport::new(surface, MemoryStore::new(), ViewportConfig::default());
        assert!(canvas.is_inert());

        let wheel = WheelEvent::pixels(Point::ZERO, Vec2::new(0.0, -1.0)).with_modifiers(Modifiers::CTRL);
        assert!(!canvas.on_wheel(&wheel));
        assert!(!canvas.on_mouse_down(&MouseEvent::primary(Point::ZERO, HitTarget::Canvas)));
        assert!(!canvas.on_key_down(&ctrl('='), &HostContext::ACTIVE));
        canvas.set_zoom(2.0, None);
        canvas.update_transform();

        assert_eq!(canvas.state(), ViewState::IDENTITY);
        assert_eq!(canvas.surface().writes, 0);
        assert!(canvas.store().is_empty());
    }
}

#[test]
fn pan_is_clamped_to_keep_content_visible() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_pan(Vec2::new(1e6, -1e6));
    assert_eq!(canvas.pan(), Vec2::new(720.0, -270.0));
}

#[test]
fn reset_rescales_about_center_and_clears_scroll() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_zoom(2.0, Some(Point::new(400.0, 300.0)));
    assert_eq!(canvas.state(), ViewState::new(2.0, 0.0, 0.0));

    canvas.reset();
    assert_eq!(canvas.state(), ViewState::new(1.0, 200.0, 150.0));
    assert_eq!(canvas.surface().scroll_clears, 1);
}

#[test]
fn center_content_uses_current_zoom() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_zoom(0.5, None);
    canvas.center_content();
    assert_eq!(canvas.state(), ViewState::new(0.5, 300.0, 225.0));
}

#[test]
fn recenters_after_container_resize() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.surface_mut().container = Size::new(1000.0, 800.0);
    canvas.center_content();
    assert_eq!(canvas.state(), ViewState::new(1.0, 300.0, 250.0));
}

#[test]
fn reset_keeps_pan_at_full_size() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_pan(Vec2::new(50.0, 50.0));
    canvas.reset();
    assert_eq!(canvas.state(), ViewState::new(1.0, 50.0, 50.0));
}

#[test]
fn double_click_resets_only_on_empty_canvas() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.set_zoom(1.5, None);
    assert!(!canvas.on_double_click(&MouseEvent::primary(Point::ZERO, HitTarget::Content)));
    assert_eq!(canvas.zoom(), 1.5);
    assert!(canvas.on_double_click(&MouseEvent::primary(Point::ZERO, HitTarget::Canvas)));
    assert_eq!(canvas.zoom(), 1.0);
}

#[test]
fn mouse_pan_start_rules() {
    let mut canvas = canvas_with(MemoryStore::new());
    let on_content = MouseEvent::primary(Point::new(50.0, 50.0), HitTarget::Content);

    assert!(!canvas.on_mouse_down(&on_content.with_button(MouseButton::Secondary)));
    assert!(!canvas.on_mouse_down(&on_content));

    assert!(canvas.on_mouse_down(&on_content.with_button(MouseButton::Middle)));
    assert!(canvas.on_mouse_up(&on_content));

    assert!(canvas.on_key_down(&space(), &HostContext::ACTIVE));
    assert!(canvas.is_space_held());
    assert!(canvas.on_mouse_down(&on_content));
    assert!(canvas.is_panning());

    assert!(canvas.on_mouse_move(&MouseEvent::primary(Point::new(70.0, 40.0), HitTarget::Content)));
    assert_eq!(canvas.pan(), Vec2::new(220.0, 140.0));

    assert!(canvas.on_mouse_up(&on_content));
    assert!(!canvas.is_panning());
    assert!(!canvas.on_mouse_move(&MouseEvent::primary(Point::new(90.0, 90.0), HitTarget::Content)));
}

#[test]
fn space_requires_active_view_and_no_focused_input() {
    let mut canvas = canvas_with(MemoryStore::new());
    let inactive = HostContext {
        input_focused: false,
        view_active: false,
    };
    let typing = HostContext {
        input_focused: true,
        view_active: true,
    };
    assert!(!canvas.on_key_down(&space(), &inactive));
    assert!(!canvas.on_key_down(&space(), &typing));
    assert!(!canvas.is_space_held());

    assert!(canvas.on_key_down(&space(), &HostContext::ACTIVE));
    assert!(!canvas.on_key_down(&space(), &HostContext::ACTIVE));
    assert!(canvas.on_key_up(&space()));
    assert!(!canvas.is_space_held());
}

#[test]
fn hiding_the_page_releases_space() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.on_key_down(&space(), &HostContext::ACTIVE);
    assert!(!canvas.on_visibility_change(false));
    assert!(canvas.is_space_held());
    assert!(canvas.on_visibility_change(true));
    assert!(!canvas.is_space_held());
    assert!(!canvas.on_key_up(&space()));
}

#[test]
fn keyboard_zoom_shortcuts() {
    let mut canvas = canvas_with(MemoryStore::new());
    let ctx = HostContext::ACTIVE;

    assert!(canvas.on_key_down(&ctrl('9'), &ctx));
    assert_eq!(canvas.zoom(), 2.0);
    assert!(!canvas.can_zoom_in());

    assert!(canvas.on_key_down(&ctrl('1'), &ctx));
    assert_eq!(canvas.state(), ViewState::new(1.0, 200.0, 150.0));

    assert!(canvas.on_key_down(&ctrl('+'), &ctx));
    assert_eq!(canvas.zoom_label(), "110%");
    assert!(canvas.on_key_down(&KeyEvent::new(Key::Char('_'), Modifiers::META), &ctx));
    assert_eq!(canvas.zoom_label(), "100%");

    canvas.set_zoom(0.5, None);
    assert!(canvas.on_key_down(&ctrl('0'), &ctx));
    assert_eq!(canvas.zoom(), 1.0);

    let typing = HostContext {
        input_focused: true,
        view_active: true,
    };
    assert!(!canvas.on_key_down(&ctrl('9'), &typing));
    assert!(!canvas.on_key_down(&KeyEvent::new(Key::Char('9'), Modifiers::empty()), &ctx));
    assert_eq!(canvas.zoom(), 1.0);
}

#[test]
fn pinch_zooms_about_touch_center() {
    let mut canvas = canvas_with(MemoryStore::new());
    let start = [Point::new(300.0, 300.0), Point::new(500.0, 300.0)];
    assert!(canvas.on_touch_start(&TouchEvent::new(&start, HitTarget::Content)));

    let center = Point::new(400.0, 300.0);
    let content_under_center = canvas.state().view_to_content_point(center);

    let spread = [Point::new(250.0, 300.0), Point::new(550.0, 300.0)];
    assert!(canvas.on_touch_move(&TouchEvent::new(&spread, HitTarget::Content)));
    assert!((canvas.zoom() - 1.5).abs() < 1e-12);
    let after = canvas.state().view_to_content_point(center);
    assert!((after - content_under_center).hypot() < 1e-9);

    // One finger lifts: the pinch ends and the remaining finger does not pan.
    let remaining = [Point::new(550.0, 300.0)];
    assert!(!canvas.on_touch_end(&TouchEvent::new(&remaining, HitTarget::Content)));
    let pan_before = canvas.pan();
    assert!(!canvas.on_touch_move(&TouchEvent::new(&[Point::new(600.0, 320.0)], HitTarget::Content)));
    assert_eq!(canvas.pan(), pan_before);
}

#[test]
fn three_fingers_neither_pinch_nor_pan() {
    let mut canvas = canvas_with(MemoryStore::new());
    let three = [Point::new(300.0, 300.0), Point::new(500.0, 300.0), Point::new(400.0, 400.0)];
    assert!(!canvas.on_touch_start(&TouchEvent::new(&three, HitTarget::Content)));
    let spread = [Point::new(200.0, 300.0), Point::new(600.0, 300.0), Point::new(400.0, 500.0)];
    assert!(!canvas.on_touch_move(&TouchEvent::new(&spread, HitTarget::Content)));
    assert_eq!(canvas.state(), ViewState::new(1.0, 200.0, 150.0));
    assert!(!canvas.is_panning());
}

#[test]
fn single_touch_pans_inside_view_only() {
    let mut canvas = canvas_with(MemoryStore::new());
    assert!(!canvas.on_touch_start(&TouchEvent::new(&[Point::new(5.0, 5.0)], HitTarget::Control)));

    assert!(canvas.on_touch_start(&TouchEvent::new(&[Point::new(100.0, 100.0)], HitTarget::Content)));
    assert!(canvas.is_panning());
    assert!(canvas.on_touch_move(&TouchEvent::new(&[Point::new(110.0, 90.0)], HitTarget::Content)));
    assert_eq!(canvas.pan(), Vec2::new(210.0, 140.0));

    canvas.on_touch_end(&TouchEvent::new(&[], HitTarget::Content));
    assert!(!canvas.is_panning());
}

#[test]
fn mouse_is_refused_during_touch_pan() {
    let mut canvas = canvas_with(MemoryStore::new());
    canvas.on_touch_start(&TouchEvent::new(&[Point::new(100.0, 100.0)], HitTarget::Canvas));
    assert!(!canvas.on_mouse_down(&MouseEvent::primary(Point::ZERO, HitTarget::Canvas)));
}

#[test]
fn canvases_can_share_one_store() {
    let shared = Rc::new(RefCell::new(MemoryStore::new()));
    let config = |key: &str| ViewportConfig {
        storage_key: key.into(),
        ..ViewportConfig::default()
    };
    let mut a = SingleViewport::new(surface(), Rc::clone(&shared), config("view-a"));
    let mut b = SingleViewport::new(surface(), Rc::clone(&shared), config("view-b"));
    a.set_zoom(0.5, None);
    b.set_zoom(1.5, None);
    assert_eq!(shared.borrow().len(), 2);

    let restored = SingleViewport::new(surface(), Rc::clone(&shared), config("view-a"));
    assert_eq!(restored.zoom(), 0.5);
}

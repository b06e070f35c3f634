// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a comparison without a browser and prints what a host would render.
//!
//! Run:
//! - `cargo run -p mockup_compare --example headless_compare`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Size, Vec2};
use mockup_canvas::input::{HitTarget, Modifiers, MouseEvent, WheelEvent};
use mockup_canvas::{HeadlessSurface, MemoryStore, StateStore};
use mockup_compare::{CompareConfig, CompareGeometry, ComparisonController, ComparisonOption};

fn main() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut compare = ComparisonController::new(Rc::clone(&store), CompareConfig::default());

    let option = ComparisonOption::new(
        "pricing",
        "Pricing table",
        [
            ("cards", "Cards"),
            ("table", "Table"),
            ("tiers", "Tiers"),
            ("toggle", "Monthly / yearly"),
            ("slider", "Usage slider"),
        ],
    );
    let container = Size::new(1440.0, 900.0);
    compare.open(
        &option,
        CompareGeometry {
            container,
            intrinsic: Some(Size::new(480.0, 360.0)),
        },
        |_| HeadlessSurface::new(Size::new(460.0, 380.0), Size::new(480.0, 360.0)),
    );

    print_layout(&compare);

    // Ctrl-wheel over the third cell, then drag the first.
    let wheel = WheelEvent::pixels(Point::new(240.0, 180.0), Vec2::new(0.0, -1.0))
        .with_modifiers(Modifiers::CTRL);
    compare.on_cell_wheel(2, &wheel);
    let at = |x, y| MouseEvent::primary(Point::new(x, y), HitTarget::Content);
    compare.on_cell_mouse_down(0, &at(100.0, 100.0));
    compare.on_mouse_move(&at(160.0, 130.0));
    compare.on_mouse_up(Some(0), &at(160.0, 130.0));

    for cell in compare.cells() {
        println!(
            "{:>18}: {}",
            cell.label,
            cell.viewport.surface().transform.as_deref().unwrap_or("-")
        );
    }

    compare.show_fewer();
    print_layout(&compare);
    let saved = store.borrow().get("mockup-compare-layout-pricing");
    println!("saved layout index: {saved:?}");

    compare.on_cell_mouse_down(3, &at(50.0, 50.0));
    if let Some(key) = compare.on_mouse_up(Some(3), &at(51.0, 52.0)) {
        println!("picked {key}; open = {}", compare.is_open());
    }
}

fn print_layout(compare: &ComparisonController<HeadlessSurface, Rc<RefCell<MemoryStore>>>) {
    if let (Some(layout), Some(count)) = (compare.layout(), compare.display_count()) {
        println!(
            "grid: columns {} rows {} ({count} cells) zoom {}",
            layout.css_columns(),
            layout.css_rows(),
            compare.zoom_label().unwrap_or_default()
        );
    }
}

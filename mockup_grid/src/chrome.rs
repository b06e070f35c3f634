// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Cell size assumed when content cannot be measured.
pub const FALLBACK_CELL_SIZE: Size = Size::new(400.0, 300.0);

/// Fixed chrome around and inside the comparison grid, in CSS pixels.
///
/// The grid area is the container minus the toolbar and padding; each cell
/// loses its border and header to chrome as well.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChromeInsets {
    /// Height of the toolbar above the grid.
    pub toolbar: f64,
    /// Total horizontal padding of the grid.
    pub padding_h: f64,
    /// Total vertical padding of the grid.
    pub padding_v: f64,
    /// Gap between rows and between columns.
    pub gap: f64,
    /// Combined top and bottom border of one cell.
    pub cell_border: f64,
    /// Height of a cell's label header.
    pub cell_header: f64,
}

impl Default for ChromeInsets {
    fn default() -> Self {
        Self {
            toolbar: 53.0,
            padding_h: 24.0,
            padding_v: 24.0,
            gap: 12.0,
            cell_border: 2.0,
            cell_header: 32.0,
        }
    }
}

impl ChromeInsets {
    /// No chrome at all: cells split the container exactly.
    pub const NONE: Self = Self {
        toolbar: 0.0,
        padding_h: 0.0,
        padding_v: 0.0,
        gap: 0.0,
        cell_border: 0.0,
        cell_header: 0.0,
    };

    /// Width available to one cell's content with `cols` columns.
    #[must_use]
    pub fn cell_width(&self, container: Size, cols: usize) -> f64 {
        let cols = cols.max(1) as f64;
        (container.width - self.gap * (cols - 1.0) - self.padding_h) / cols
    }

    /// Height of one grid row (header included) with `rows` rows.
    #[must_use]
    pub fn row_height(&self, container: Size, rows: usize) -> f64 {
        let rows = rows.max(1) as f64;
        (container.height
            - self.toolbar
            - self.padding_v
            - self.gap * (rows - 1.0)
            - self.cell_border * rows)
            / rows
    }

    /// Height available to one cell's content with `rows` rows.
    #[must_use]
    pub fn cell_content_height(&self, container: Size, rows: usize) -> f64 {
        self.row_height(container, rows) - self.cell_header
    }
}

/// Replaces unmeasurable dimensions of `measured` with [`FALLBACK_CELL_SIZE`].
///
/// Each axis falls back independently when it is missing, zero, negative, or
/// not finite.
#[must_use]
pub fn intrinsic_or_fallback(measured: Option<Size>) -> Size {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    match measured {
        Some(size) => Size::new(
            if usable(size.width) {
                size.width
            } else {
                FALLBACK_CELL_SIZE.width
            },
            if usable(size.height) {
                size.height
            } else {
                FALLBACK_CELL_SIZE.height
            },
        ),
        None => FALLBACK_CELL_SIZE,
    }
}

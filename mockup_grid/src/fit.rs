// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use tracing::debug;

use crate::chrome::ChromeInsets;
use crate::step::LayoutStep;

/// Scale at which `intrinsic` content fits one cell of `step`.
///
/// Values at or above `1.0` mean the content fits at native size.
#[must_use]
pub fn fit_scale(step: &LayoutStep, intrinsic: Size, container: Size, chrome: &ChromeInsets) -> f64 {
    let scale_x = chrome.cell_width(container, step.cols) / intrinsic.width;
    let scale_y = chrome.cell_content_height(container, step.rows) / intrinsic.height;
    scale_x.min(scale_y)
}

/// Chooses a step index for content of size `intrinsic`.
///
/// The last step whose [`fit_scale`] reaches `1.0` wins. If none does, the
/// step with the largest scale below `1.0` wins, the earliest on ties. When
/// every scale is non-positive the first step is chosen. Returns `None` only
/// for an empty `steps`.
#[must_use]
pub fn auto_pick(
    steps: &[LayoutStep],
    intrinsic: Size,
    container: Size,
    chrome: &ChromeInsets,
) -> Option<usize> {
    if steps.is_empty() {
        return None;
    }
    let mut native: Option<usize> = None;
    let mut best_sub_scale = 0.0;
    let mut best_sub = 0;
    for (index, step) in steps.iter().enumerate() {
        let scale = fit_scale(step, intrinsic, container, chrome);
        if scale >= 1.0 {
            native = Some(index);
        } else if scale > best_sub_scale {
            best_sub_scale = scale;
            best_sub = index;
        }
    }
    let picked = native.unwrap_or(best_sub);
    debug!(
        picked,
        native = native.is_some(),
        cells = steps[picked].visible,
        "auto-picked comparison layout"
    );
    Some(picked)
}

/// Presentation of one step as a CSS grid template.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTemplate {
    /// Number of equal-width columns.
    pub cols: usize,
    /// Fixed row height in whole pixels.
    pub row_height: f64,
}

impl GridTemplate {
    /// Value for `grid-template-columns`.
    #[must_use]
    pub fn css_columns(&self) -> String {
        format!("repeat({}, 1fr)", self.cols)
    }

    /// Value for `grid-auto-rows`.
    #[must_use]
    pub fn css_rows(&self) -> String {
        format!("{}px", self.row_height)
    }
}

/// Lays out `step` in `container`: columns share the width, rows get the
/// floored height left after chrome, never negative.
#[must_use]
pub fn apply(step: &LayoutStep, container: Size, chrome: &ChromeInsets) -> GridTemplate {
    GridTemplate {
        cols: step.cols,
        row_height: chrome.row_height(container, step.rows).floor().max(0.0),
    }
}

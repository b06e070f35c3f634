// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use tracing::debug;

use crate::chrome::ChromeInsets;
use crate::fit::{GridTemplate, apply, auto_pick};
use crate::step::{LayoutStep, StepPlanner};

/// The candidate steps for one comparison plus the chosen index.
///
/// A cursor is never empty: it is built for at least one cell, and every
/// index it holds is in range.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutCursor {
    planner: StepPlanner,
    cells: usize,
    steps: Vec<LayoutStep>,
    index: usize,
}

impl LayoutCursor {
    /// Plans `cells` cells in `container` and selects the densest step.
    ///
    /// Returns `None` when `cells` is zero.
    #[must_use]
    pub fn new(cells: usize, container: Size) -> Option<Self> {
        Self::with_planner(StepPlanner::default(), cells, container)
    }

    /// Like [`Self::new`] with custom scoring.
    #[must_use]
    pub fn with_planner(planner: StepPlanner, cells: usize, container: Size) -> Option<Self> {
        let steps = planner.build(cells, container);
        let index = steps.len().checked_sub(1)?;
        Some(Self {
            planner,
            cells,
            steps,
            index,
        })
    }

    /// All candidate steps, ascending by `visible`.
    #[must_use]
    pub fn steps(&self) -> &[LayoutStep] {
        &self.steps
    }

    /// Selected index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Selected step.
    #[must_use]
    pub fn current(&self) -> LayoutStep {
        self.steps[self.index]
    }

    /// Cells the selected shape holds; shown next to the density buttons.
    #[must_use]
    pub fn display_count(&self) -> usize {
        self.current().capacity()
    }

    /// Selects `index` if it is in range. Returns whether it was.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.steps.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    /// Restores a persisted index string.
    ///
    /// An unparseable or out-of-range value selects the last step. Returns
    /// whether the saved index was used.
    pub fn restore(&mut self, saved: &str) -> bool {
        let restored = saved
            .trim()
            .parse::<usize>()
            .is_ok_and(|index| self.select(index));
        if !restored {
            debug!(saved, steps = self.steps.len(), "ignoring saved layout index");
            self.index = self.steps.len() - 1;
        }
        restored
    }

    /// Selects the step [`auto_pick`] prefers for `intrinsic` content.
    pub fn auto_pick(&mut self, intrinsic: Size, container: Size, chrome: &ChromeInsets) -> usize {
        if let Some(index) = auto_pick(&self.steps, intrinsic, container, chrome) {
            self.index = index;
        }
        self.index
    }

    /// Moves to the previous (sparser) step. Returns whether it moved.
    pub fn show_fewer(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves to the next (denser) step. Returns whether it moved.
    pub fn show_more(&mut self) -> bool {
        if self.index + 1 >= self.steps.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Replans for a resized container, keeping at least as many cells
    /// visible as before when possible.
    ///
    /// The new index is the first step whose `visible` is at least the old
    /// one, or the last step.
    pub fn remap(&mut self, container: Size) -> usize {
        let previous = self.current().visible;
        self.steps = self.planner.build(self.cells, container);
        self.index = self
            .steps
            .iter()
            .position(|step| step.visible >= previous)
            .unwrap_or(self.steps.len() - 1);
        debug!(previous, index = self.index, "remapped comparison layout");
        self.index
    }

    /// Grid template for the selected step.
    #[must_use]
    pub fn template(&self, container: Size, chrome: &ChromeInsets) -> GridTemplate {
        apply(&self.current(), container, chrome)
    }
}

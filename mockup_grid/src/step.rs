// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// One candidate grid shape.
///
/// `rows` is always `ceil(visible / cols)`, so `cols * rows >= visible`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LayoutStep {
    /// Column count (at least 1).
    pub cols: usize,
    /// Row count.
    pub rows: usize,
    /// Number of cells this step was chosen for.
    pub visible: usize,
}

impl LayoutStep {
    /// Cells the grid can hold without scrolling.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }
}

/// Aspect ratio the planner tries to give each cell.
pub const TARGET_CELL_ASPECT: f64 = 4.0 / 3.0;

/// Per-column score nudge toward the container's orientation.
pub const DEFAULT_ORIENTATION_BIAS: f64 = 0.1;

/// Scoring parameters for [`StepPlanner::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepPlanner {
    /// Cell aspect ratio (width / height) to aim for.
    pub target_aspect: f64,
    /// Added per column in landscape containers, subtracted in portrait ones.
    pub orientation_bias: f64,
}

impl Default for StepPlanner {
    fn default() -> Self {
        Self {
            target_aspect: TARGET_CELL_ASPECT,
            orientation_bias: DEFAULT_ORIENTATION_BIAS,
        }
    }
}

impl StepPlanner {
    /// Builds the ordered, de-duplicated candidate shapes for `n` cells.
    ///
    /// For each `visible` in `1..=n` the column count maximizing
    /// `-|ln(cell_aspect / target_aspect)| ± orientation_bias · cols` is
    /// chosen, preferring fewer columns on ties. A shape already produced
    /// for a smaller `visible` is skipped, so `visible` strictly increases
    /// along the result and no `(cols, rows)` pair repeats.
    ///
    /// A container with a non-positive or non-finite side is planned as if
    /// it were 4:3.
    #[must_use]
    pub fn build(&self, n: usize, container: Size) -> Vec<LayoutStep> {
        let container = if container.width > 0.0
            && container.height > 0.0
            && container.is_finite()
        {
            container
        } else {
            Size::new(4.0, 3.0)
        };
        let bias = if container.width >= container.height {
            self.orientation_bias
        } else {
            -self.orientation_bias
        };

        let mut steps: Vec<LayoutStep> = Vec::new();
        for visible in 1..=n {
            let mut best_cols = 1;
            let mut best_score = f64::NEG_INFINITY;
            for cols in 1..=visible {
                let rows = visible.div_ceil(cols);
                let cell_aspect = (container.width / cols as f64) / (container.height / rows as f64);
                let score = -(cell_aspect / self.target_aspect).ln().abs() + bias * cols as f64;
                if score > best_score {
                    best_score = score;
                    best_cols = cols;
                }
            }
            let rows = visible.div_ceil(best_cols);
            if !steps.iter().any(|s| s.cols == best_cols && s.rows == rows) {
                steps.push(LayoutStep {
                    cols: best_cols,
                    rows,
                    visible,
                });
            }
        }
        steps
    }
}

/// [`StepPlanner::build`] with the default target aspect and bias.
#[must_use]
pub fn build_steps(n: usize, container: Size) -> Vec<LayoutStep> {
    StepPlanner::default().build(n, container)
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Fraction of the content that stays inside the container when panning.
///
/// With the default of `0.1`, at most 90% of the content (or of the container)
/// can be pushed out of view along each axis.
pub const DEFAULT_PAN_MARGIN: f64 = 0.1;

/// Clamp behavior applied to pan requests.
///
/// Consulted by [`crate::ViewportTransform::clamp_pan`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClampMode {
    /// Do not apply any clamping; the content may move freely.
    None,
    /// Keep part of the content within the container.
    ///
    /// Pan is bounded to `[-content·zoom·(1 - margin), container·(1 - margin)]`
    /// on each axis.
    KeepVisible {
        /// Fraction in `[0, 1]` that must stay inside the container.
        margin: f64,
    },
}

impl Default for ClampMode {
    fn default() -> Self {
        Self::KeepVisible {
            margin: DEFAULT_PAN_MARGIN,
        }
    }
}

impl ClampMode {
    /// Returns the margin as a fraction clamped into `[0, 1]`, or `None` when
    /// clamping is disabled.
    #[must_use]
    pub fn margin(self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::KeepVisible { margin } if margin.is_finite() => Some(margin.clamp(0.0, 1.0)),
            Self::KeepVisible { .. } => Some(DEFAULT_PAN_MARGIN),
        }
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Size, Vec2};

use crate::modes::ClampMode;
use crate::state::{ViewState, ZoomLimits};

/// Pure pan/zoom math over a [`ViewState`].
///
/// `ViewportTransform` holds only configuration (zoom bounds and clamp mode)
/// and maps an input state plus a request to an output state. It never fails:
/// out-of-range zoom is clamped and pan requests are bounded according to the
/// [`ClampMode`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportTransform {
    limits: ZoomLimits,
    clamp_mode: ClampMode,
}

impl ViewportTransform {
    /// Creates a transform with the given zoom bounds and the default clamp mode.
    #[must_use]
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            limits,
            clamp_mode: ClampMode::default(),
        }
    }

    /// Returns a copy using `mode` for pan clamping.
    #[must_use]
    pub fn with_clamp_mode(mut self, mode: ClampMode) -> Self {
        self.clamp_mode = mode;
        self
    }

    /// Returns the zoom bounds.
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the zoom, optionally keeping a container point fixed.
    ///
    /// `requested` is clamped into the zoom bounds. If `anchor` is supplied
    /// (container-local coordinates) the pan is recomputed as
    /// `anchor - (anchor - pan) * (new / old)` so that the content point under
    /// the anchor stays where it is. Without an anchor only the zoom changes.
    ///
    /// A `NaN` request leaves the state untouched.
    #[must_use]
    pub fn anchored_zoom(&self, state: ViewState, requested: f64, anchor: Option<Point>) -> ViewState {
        if requested.is_nan() {
            return state;
        }
        let old_zoom = state.zoom;
        let new_zoom = self.limits.clamp(requested);
        let mut next = ViewState {
            zoom: new_zoom,
            ..state
        };
        if let Some(anchor) = anchor {
            if old_zoom > 0.0 && old_zoom.is_finite() {
                let ratio = new_zoom / old_zoom;
                next.pan_x = anchor.x - (anchor.x - state.pan_x) * ratio;
                next.pan_y = anchor.y - (anchor.y - state.pan_y) * ratio;
            }
        }
        next
    }

    /// Bounds a requested pan so the content stays at least partly visible.
    ///
    /// With [`ClampMode::KeepVisible`] the result satisfies
    /// `pan.x ∈ [-content.w·zoom·(1 - margin), container.w·(1 - margin)]` and
    /// likewise for Y. With [`ClampMode::None`] the request is returned as is.
    /// Non-finite request components fall back to the current pan.
    #[must_use]
    pub fn clamp_pan(&self, state: &ViewState, requested: Vec2, container: Size, content: Size) -> Vec2 {
        let requested = Vec2::new(
            if requested.x.is_finite() {
                requested.x
            } else {
                state.pan_x
            },
            if requested.y.is_finite() {
                requested.y
            } else {
                state.pan_y
            },
        );
        let Some(margin) = self.clamp_mode.margin() else {
            return requested;
        };
        let keep = 1.0 - margin;
        let scaled = Size::new(
            content.width.max(0.0) * state.zoom,
            content.height.max(0.0) * state.zoom,
        );
        Vec2::new(
            clamp_axis(requested.x, -scaled.width * keep, container.width.max(0.0) * keep),
            clamp_axis(requested.y, -scaled.height * keep, container.height.max(0.0) * keep),
        )
    }

    /// Applies [`Self::clamp_pan`] and returns the updated state.
    #[must_use]
    pub fn panned(&self, state: ViewState, requested: Vec2, container: Size, content: Size) -> ViewState {
        state.with_pan(self.clamp_pan(&state, requested, container, content))
    }

    /// Returns a state at `zoom` (clamped) with the content centered in the container.
    #[must_use]
    pub fn centered(&self, zoom: f64, container: Size, content: Size) -> ViewState {
        let zoom = self.limits.clamp(zoom);
        ViewState {
            zoom,
            pan_x: (container.width - content.width * zoom) / 2.0,
            pan_y: (container.height - content.height * zoom) / 2.0,
        }
    }

    /// Produces the CSS `transform` value for `state`.
    #[must_use]
    pub fn to_css_transform(state: &ViewState) -> String {
        format!(
            "translate({}px, {}px) scale({})",
            state.pan_x, state.pan_y, state.zoom
        )
    }
}

fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

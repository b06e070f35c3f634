// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Pan/zoom state of one surface.
///
/// `pan_x` / `pan_y` are the container-space position of the content origin,
/// in CSS pixels. `zoom` is a uniform scale factor (1.0 = native size).
///
/// With the `serde` feature this (de)serializes as the flat persisted blob
/// `{"zoom": number, "panX": number, "panY": number}`. Missing fields take
/// their [`Default`] values.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct ViewState {
    /// Uniform zoom factor.
    pub zoom: f64,
    /// Horizontal pan in container pixels.
    pub pan_x: f64,
    /// Vertical pan in container pixels.
    pub pan_y: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewState {
    /// Zoom 1.0 with the content origin at the container origin.
    pub const IDENTITY: Self = Self {
        zoom: 1.0,
        pan_x: 0.0,
        pan_y: 0.0,
    };

    /// Creates a state from its three components.
    #[must_use]
    pub const fn new(zoom: f64, pan_x: f64, pan_y: f64) -> Self {
        Self { zoom, pan_x, pan_y }
    }

    /// Returns the pan offset as a vector.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        Vec2::new(self.pan_x, self.pan_y)
    }

    /// Returns a copy with the pan replaced.
    #[must_use]
    pub fn with_pan(self, pan: Vec2) -> Self {
        Self {
            pan_x: pan.x,
            pan_y: pan.y,
            ..self
        }
    }

    /// Returns `true` if every component is finite and the zoom is positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.zoom.is_finite() && self.zoom > 0.0 && self.pan_x.is_finite() && self.pan_y.is_finite()
    }

    /// Content → container affine: translate by pan, then scale by zoom.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.pan()) * Affine::scale(self.zoom)
    }

    /// Converts a container-space point into content coordinates.
    #[must_use]
    pub fn view_to_content_point(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - self.pan_x) / self.zoom,
            (pt.y - self.pan_y) / self.zoom,
        )
    }

    /// Converts a content-space point into container coordinates.
    #[must_use]
    pub fn content_to_view_point(&self, pt: Point) -> Point {
        self.to_affine() * pt
    }
}

/// Inclusive zoom bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

impl ZoomLimits {
    /// Default lower bound (25%).
    pub const DEFAULT_MIN: f64 = 0.25;
    /// Default upper bound (200%).
    pub const DEFAULT_MAX: f64 = 2.0;

    /// Creates limits from two bounds.
    ///
    /// The range is normalized so that `min <= max`. Bounds that are not
    /// finite and positive fall back to the defaults.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        let min = if min.is_finite() && min > 0.0 {
            min
        } else {
            Self::DEFAULT_MIN
        };
        let max = if max.is_finite() && max > 0.0 {
            max
        } else {
            Self::DEFAULT_MAX
        };
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `zoom` into the range. `NaN` maps to the lower bound.
    #[must_use]
    pub fn clamp(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min;
        }
        zoom.clamp(self.min, self.max)
    }

    /// Returns `true` if `zoom` lies within the bounds.
    #[must_use]
    pub fn contains(&self, zoom: f64) -> bool {
        zoom >= self.min && zoom <= self.max
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{ViewState, ZoomLimits};

    #[test]
    fn view_content_roundtrip() {
        let state = ViewState::new(1.75, -40.0, 12.5);
        let content = Point::new(10.0, -5.0);
        let view = state.content_to_view_point(content);
        let back = state.view_to_content_point(view);
        assert!((back.x - content.x).abs() < 1e-9);
        assert!((back.y - content.y).abs() < 1e-9);
    }

    #[test]
    fn limits_normalize_inverted_and_bogus_bounds() {
        let limits = ZoomLimits::new(3.0, 0.5);
        assert_eq!(limits.min(), 0.5);
        assert_eq!(limits.max(), 3.0);

        let limits = ZoomLimits::new(f64::NAN, -1.0);
        assert_eq!(limits, ZoomLimits::default());
    }

    #[test]
    fn clamp_handles_infinities_and_nan() {
        let limits = ZoomLimits::default();
        assert_eq!(limits.clamp(f64::INFINITY), 2.0);
        assert_eq!(limits.clamp(f64::NEG_INFINITY), 0.25);
        assert_eq!(limits.clamp(f64::NAN), 0.25);
        assert_eq!(limits.clamp(1.3), 1.3);
    }

    #[test]
    fn validity_rejects_non_finite_and_zero_zoom() {
        assert!(ViewState::IDENTITY.is_valid());
        assert!(!ViewState::new(0.0, 0.0, 0.0).is_valid());
        assert!(!ViewState::new(1.0, f64::NAN, 0.0).is_valid());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mockup_view2d::ZoomLimits;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "mockup-canvas-state";

/// Zoom bounds, step sizes, and persistence key for a [`SingleViewport`](crate::SingleViewport).
///
/// Deserializes from the mockup's camelCase JSON (`minZoom`, `maxZoom`,
/// `zoomStep`, `fineZoomStep`, `storageKey`); every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewportConfig {
    /// Smallest zoom.
    pub min_zoom: f64,
    /// Largest zoom.
    pub max_zoom: f64,
    /// Step for buttons, keyboard, and plain Ctrl-wheel.
    pub zoom_step: f64,
    /// Step for Ctrl+Alt-wheel.
    pub fine_zoom_step: f64,
    /// Key under which `{zoom, panX, panY}` is persisted.
    pub storage_key: String,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: ZoomLimits::DEFAULT_MIN,
            max_zoom: ZoomLimits::DEFAULT_MAX,
            zoom_step: 0.1,
            fine_zoom_step: 0.02,
            storage_key: DEFAULT_STORAGE_KEY.into(),
        }
    }
}

impl ViewportConfig {
    /// Parses a JSON config and [sanitizes](Self::sanitized) it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replaces unusable values with defaults.
    ///
    /// Zero, negative, and non-finite numbers fall back to their default, an
    /// empty storage key falls back to [`DEFAULT_STORAGE_KEY`], and an
    /// inverted zoom range is swapped.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let pick = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        let min_zoom = pick(self.min_zoom, defaults.min_zoom);
        let max_zoom = pick(self.max_zoom, defaults.max_zoom);
        Self {
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: min_zoom.max(max_zoom),
            zoom_step: pick(self.zoom_step, defaults.zoom_step),
            fine_zoom_step: pick(self.fine_zoom_step, defaults.fine_zoom_step),
            storage_key: if self.storage_key.is_empty() {
                defaults.storage_key
            } else {
                self.storage_key
            },
        }
    }

    /// Zoom bounds as a [`ZoomLimits`].
    #[must_use]
    pub fn limits(&self) -> ZoomLimits {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }
}

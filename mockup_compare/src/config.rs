// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use mockup_canvas::ConfigError;
use mockup_grid::ChromeInsets;
use serde::{Deserialize, Serialize};

/// Storage prefix used when none is configured.
pub const DEFAULT_STORAGE_PREFIX: &str = "mockup";

/// Behavior of a [`ComparisonController`](crate::ComparisonController).
///
/// Deserializes from camelCase JSON; every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompareConfig {
    /// Whether cells start in lockstep.
    pub sync_zoom: bool,
    /// The comparison is the whole UI: it cannot be closed, and picking a
    /// variant highlights it instead of closing.
    pub compare_only: bool,
    /// Step for the controller's zoom buttons.
    pub zoom_step: f64,
    /// Prefix of the persisted layout keys.
    pub storage_prefix: String,
    /// Grid chrome used for auto-pick and row heights.
    pub chrome: ChromeInsets,
    /// A press and release closer than this on both axes is a click.
    pub click_tolerance: f64,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            sync_zoom: true,
            compare_only: false,
            zoom_step: 0.1,
            storage_prefix: DEFAULT_STORAGE_PREFIX.into(),
            chrome: ChromeInsets::default(),
            click_tolerance: 5.0,
        }
    }
}

impl CompareConfig {
    /// Parses a JSON config and [sanitizes](Self::sanitized) it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Replaces a non-positive step or tolerance and an empty prefix with
    /// their defaults.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |value: f64, fallback: f64| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        Self {
            zoom_step: positive(self.zoom_step, defaults.zoom_step),
            click_tolerance: positive(self.click_tolerance, defaults.click_tolerance),
            storage_prefix: if self.storage_prefix.is_empty() {
                defaults.storage_prefix
            } else {
                self.storage_prefix
            },
            ..self
        }
    }

    /// Storage key of the chosen layout index for `option_id`.
    #[must_use]
    pub fn layout_key(&self, option_id: &str) -> String {
        format!("{}-compare-layout-{option_id}", self.storage_prefix)
    }
}

/// One alternative rendering of an option.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Identifier reported when the variant is picked.
    pub key: String,
    /// Text shown in the cell header.
    pub label: String,
}

/// An option whose variants can be compared side by side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOption {
    /// Identifier; keys the persisted layout.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Variants in display order.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl ComparisonOption {
    /// Builds an option from `(key, label)` pairs.
    pub fn new<K, L>(
        id: impl Into<String>,
        name: impl Into<String>,
        variants: impl IntoIterator<Item = (K, L)>,
    ) -> Self
    where
        K: Into<String>,
        L: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            variants: variants
                .into_iter()
                .map(|(key, label)| Variant {
                    key: key.into(),
                    label: label.into(),
                })
                .collect(),
        }
    }
}

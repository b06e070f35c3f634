// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The container / viewport / content triple a canvas drives.

use kurbo::Size;

use crate::error::SurfaceError;

/// A container element holding a transformable viewport node, which in turn
/// holds a measurable content node.
pub trait Surface {
    /// Client size of the container.
    fn container_size(&self) -> Size;

    /// Unscaled scroll size of the content node, or `None` if it is missing.
    fn content_size(&self) -> Option<Size>;

    /// Returns `true` if the viewport node exists.
    fn has_viewport(&self) -> bool;

    /// Writes a CSS `transform` value to the viewport node.
    fn set_transform(&mut self, css: &str);

    /// Resets any native scroll offset on the container.
    fn clear_scroll(&mut self) {}
}

/// Checks that `surface` has both nodes a viewport needs.
pub fn validate<S: Surface + ?Sized>(surface: &S) -> Result<Size, SurfaceError> {
    if !surface.has_viewport() {
        return Err(SurfaceError::MissingViewport);
    }
    surface.content_size().ok_or(SurfaceError::MissingContent)
}

/// A [`Surface`] with fixed geometry that records what was written to it.
///
/// Used by headless hosts and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessSurface {
    /// Container size.
    pub container: Size,
    /// Content size; `None` simulates a missing content node.
    pub content: Option<Size>,
    /// Whether the viewport node exists.
    pub viewport: bool,
    /// Last transform written.
    pub transform: Option<String>,
    /// Number of transform writes.
    pub writes: usize,
    /// Number of scroll resets.
    pub scroll_clears: usize,
}

impl HeadlessSurface {
    /// A complete surface of the given sizes.
    #[must_use]
    pub fn new(container: Size, content: Size) -> Self {
        Self {
            container,
            content: Some(content),
            viewport: true,
            transform: None,
            writes: 0,
            scroll_clears: 0,
        }
    }

    /// A surface whose viewport node is missing.
    #[must_use]
    pub fn without_viewport(container: Size, content: Size) -> Self {
        Self {
            viewport: false,
            ..Self::new(container, content)
        }
    }

    /// A surface whose content node is missing.
    #[must_use]
    pub fn without_content(container: Size) -> Self {
        Self {
            content: None,
            ..Self::new(container, Size::ZERO)
        }
    }
}

impl Surface for HeadlessSurface {
    fn container_size(&self) -> Size {
        self.container
    }

    fn content_size(&self) -> Option<Size> {
        self.content
    }

    fn has_viewport(&self) -> bool {
        self.viewport
    }

    fn set_transform(&mut self, css: &str) {
        self.transform = Some(css.into());
        self.writes += 1;
    }

    fn clear_scroll(&mut self) {
        self.scroll_clears += 1;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Size;

    use super::{HeadlessSurface, validate};
    use crate::error::SurfaceError;

    #[test]
    fn validation_reports_the_missing_node() {
        let container = Size::new(800.0, 600.0);
        let content = Size::new(400.0, 300.0);
        assert_eq!(validate(&HeadlessSurface::new(container, content)), Ok(content));
        assert_eq!(
            validate(&HeadlessSurface::without_viewport(container, content)),
            Err(SurfaceError::MissingViewport)
        );
        assert_eq!(
            validate(&HeadlessSurface::without_content(container)),
            Err(SurfaceError::MissingContent)
        );
    }
}

#![forbid(unsafe_code)]

//! Viewport and keyboard-exclusion geometry, plus the read-only geometry
//! source consumed by placement.
//!
//! The visible document area is the part of the layout viewport that is not
//! occluded by an on-screen keyboard. When no keyboard is up the visible area
//! equals the layout viewport.

use std::time::Duration;

use crate::element::ElementId;
use crate::geometry::{Rect, Size};

/// Default duration of the on-screen keyboard's show animation.
pub const DEFAULT_KEYBOARD_SHOW_DURATION: Duration = Duration::from_millis(300);

/// Snapshot of the visible document area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top of the visible document area.
    pub visible_doc_top: f64,
    /// Height of the visible document area.
    pub visible_doc_height: f64,
    /// Distance from the layout viewport bottom up to the visible area's bottom.
    pub visible_doc_bottom_offset: f64,
    /// Width of the visual viewport.
    pub visual_width: f64,
    /// Whether an on-screen keyboard currently occludes part of the viewport.
    pub keyboard_visible: bool,
    /// Whether showing the keyboard resizes the layout viewport instead of
    /// overlaying it.
    pub keyboard_resizes_layout: bool,
    /// How long the keyboard takes to animate in.
    pub keyboard_show_duration: Duration,
}

impl Viewport {
    /// A viewport with no keyboard.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            visible_doc_top: 0.0,
            visible_doc_height: height,
            visible_doc_bottom_offset: 0.0,
            visual_width: width,
            keyboard_visible: false,
            keyboard_resizes_layout: false,
            keyboard_show_duration: DEFAULT_KEYBOARD_SHOW_DURATION,
        }
    }

    /// Occlude the bottom `keyboard_height` pixels with an on-screen keyboard.
    #[must_use]
    pub fn with_keyboard(mut self, keyboard_height: f64) -> Self {
        let occluded = keyboard_height.clamp(0.0, self.visible_doc_height);
        self.visible_doc_height -= occluded;
        self.visible_doc_bottom_offset += occluded;
        self.keyboard_visible = true;
        self
    }

    /// Shift the visible area down by `top` pixels (e.g. a scrolled visual viewport).
    #[must_use]
    pub fn with_visible_top(mut self, top: f64) -> Self {
        self.visible_doc_top = top;
        self
    }

    /// Mark whether the keyboard resizes the layout viewport.
    #[must_use]
    pub fn resizing_layout(mut self, resizes: bool) -> Self {
        self.keyboard_resizes_layout = resizes;
        self
    }

    /// Bottom of the visible document area.
    #[inline]
    pub fn visible_doc_bottom(&self) -> f64 {
        self.visible_doc_top + self.visible_doc_height
    }

    /// The visible document area as a rectangle.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(
            0.0,
            self.visible_doc_top,
            self.visual_width,
            self.visible_doc_height,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Measured box of a flyout element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlyoutBox {
    /// Margin-box width.
    pub outer_width: f64,
    /// Margin-box height.
    pub outer_height: f64,
    /// Content-box width.
    pub inner_width: f64,
    /// Content-box height.
    pub inner_height: f64,
}

impl FlyoutBox {
    /// A box with no margin, border, or padding.
    pub const fn tight(width: f64, height: f64) -> Self {
        Self {
            outer_width: width,
            outer_height: height,
            inner_width: width,
            inner_height: height,
        }
    }

    /// A box whose content is inset by `chrome` on every side.
    pub fn with_chrome(inner_width: f64, inner_height: f64, chrome: f64) -> Self {
        Self {
            outer_width: inner_width + 2.0 * chrome,
            outer_height: inner_height + 2.0 * chrome,
            inner_width,
            inner_height,
        }
    }

    /// Margin-box size.
    #[inline]
    pub const fn outer_size(&self) -> Size {
        Size::new(self.outer_width, self.outer_height)
    }

    /// Vertical margin + border + padding.
    #[inline]
    pub fn margin_border_padding(&self) -> f64 {
        self.outer_height - self.inner_height
    }
}

/// Read-only geometry queries. Implementations hold no placement state.
pub trait GeometryProvider {
    /// Bounding rectangle of an anchor element, or `None` if the element is
    /// not part of the laid-out document.
    fn anchor_rect(&self, element: ElementId) -> Option<Rect>;

    /// Current measured box of a flyout element.
    fn flyout_box(&self, element: ElementId) -> FlyoutBox;

    /// Current viewport and keyboard-exclusion region.
    fn viewport(&self) -> Viewport;
}

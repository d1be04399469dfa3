#![forbid(unsafe_code)]

//! Keyboard-aware reflow of an existing placement, and the mapping from a
//! placement onto concrete edge offsets.
//!
//! When an on-screen keyboard occludes the bottom of the viewport, a placed
//! flyout may no longer fit. [`check_keyboard_fit`] adjusts the placement in
//! place and reports whether the flyout moved because of the keyboard, which
//! hosts use to pick a lightweight fade over a full entrance transition.

use flyout_core::viewport::Viewport;

use crate::placement::{HorizontalEdge, PlacementOutcome, VerticalEdge};

/// Re-fit `outcome` against a keyboard-reduced viewport.
///
/// In order:
/// 1. Margin box taller than the visible area: pin to the visible top and
///    clamp height to what remains.
/// 2. Top-positioned flyout clips the visible bottom: pin to bottom.
/// 3. Already pinned to bottom: the bottom offset itself changed, so the
///    flyout moved.
///
/// Returns `true` if the keyboard repositioned the flyout.
pub fn check_keyboard_fit(outcome: &mut PlacementOutcome, viewport: &Viewport) -> bool {
    let visible_height = viewport.visible_doc_height;
    let box_height = outcome.margin_box_height();

    if box_height > visible_height {
        outcome.vertical = VerticalEdge::Top(viewport.visible_doc_top);
        outcome.adjusted_height = (visible_height - outcome.margin_border_padding).max(0.0);
        outcome.needs_scroll = true;
        return true;
    }

    match outcome.vertical {
        VerticalEdge::Top(top) if top + box_height > viewport.visible_doc_bottom() => {
            outcome.vertical = VerticalEdge::PinnedBottom;
            true
        }
        VerticalEdge::Top(_) => false,
        VerticalEdge::PinnedBottom => true,
    }
}

/// Concrete edge offsets for a placed flyout. Exactly one of `top`/`bottom`
/// and one of `left`/`right` is set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolvedPosition {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
    /// Maximum content height; set only when clamped.
    pub max_height: Option<f64>,
    /// Whether the flyout scrolls internally.
    pub scrolls: bool,
}

impl ResolvedPosition {
    pub fn from_outcome(outcome: &PlacementOutcome, viewport: &Viewport) -> Self {
        let (top, bottom) = match outcome.vertical {
            VerticalEdge::Top(top) => (Some(top), None),
            VerticalEdge::PinnedBottom => (None, Some(viewport.visible_doc_bottom_offset)),
        };
        let (left, right) = match outcome.horizontal {
            HorizontalEdge::Left(left) => (Some(left), None),
            HorizontalEdge::PinnedRight => (None, Some(0.0)),
        };
        Self {
            top,
            bottom,
            left,
            right,
            max_height: outcome.clamped_height(),
            scrolls: outcome.needs_scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{AnimationOffset, Side};

    fn outcome(vertical: VerticalEdge, inner: f64, chrome: f64) -> PlacementOutcome {
        PlacementOutcome {
            vertical,
            horizontal: HorizontalEdge::Left(10.0),
            needs_scroll: false,
            adjusted_height: inner,
            margin_border_padding: chrome,
            animation: AnimationOffset::from_side(Side::Top, 50.0),
        }
    }

    #[test]
    fn too_tall_pins_top_and_clamps() {
        let vp = Viewport::new(800.0, 600.0).with_keyboard(300.0);
        let mut out = outcome(VerticalEdge::Top(100.0), 380.0, 20.0);
        assert!(check_keyboard_fit(&mut out, &vp));
        assert_eq!(out.vertical, VerticalEdge::Top(0.0));
        assert!(out.needs_scroll);
        assert_eq!(out.adjusted_height, 280.0);
    }

    #[test]
    fn clipping_bottom_pins_bottom() {
        let vp = Viewport::new(800.0, 600.0).with_keyboard(300.0);
        let mut out = outcome(VerticalEdge::Top(200.0), 150.0, 0.0);
        assert!(check_keyboard_fit(&mut out, &vp));
        assert_eq!(out.vertical, VerticalEdge::PinnedBottom);
        assert!(!out.needs_scroll);
    }

    #[test]
    fn already_pinned_bottom_counts_as_moved() {
        let vp = Viewport::new(800.0, 600.0).with_keyboard(300.0);
        let mut out = outcome(VerticalEdge::PinnedBottom, 100.0, 0.0);
        assert!(check_keyboard_fit(&mut out, &vp));
        assert_eq!(out.vertical, VerticalEdge::PinnedBottom);
    }

    #[test]
    fn fitting_flyout_is_untouched() {
        let vp = Viewport::new(800.0, 600.0).with_keyboard(300.0);
        let mut out = outcome(VerticalEdge::Top(50.0), 100.0, 0.0);
        let before = out;
        assert!(!check_keyboard_fit(&mut out, &vp));
        assert_eq!(out, before);
    }

    #[test]
    fn resolved_position_edges() {
        let vp = Viewport::new(800.0, 600.0).with_keyboard(200.0);
        let mut out = outcome(VerticalEdge::PinnedBottom, 100.0, 0.0);
        out.horizontal = HorizontalEdge::PinnedRight;
        out.needs_scroll = true;
        let pos = ResolvedPosition::from_outcome(&out, &vp);
        assert_eq!(pos.top, None);
        assert_eq!(pos.bottom, Some(200.0));
        assert_eq!(pos.left, None);
        assert_eq!(pos.right, Some(0.0));
        assert_eq!(pos.max_height, Some(100.0));
        assert!(pos.scrolls);

        let out = outcome(VerticalEdge::Top(40.0), 100.0, 0.0);
        let pos = ResolvedPosition::from_outcome(&out, &vp);
        assert_eq!(pos.top, Some(40.0));
        assert_eq!(pos.left, Some(10.0));
        assert_eq!(pos.max_height, None);
    }
}

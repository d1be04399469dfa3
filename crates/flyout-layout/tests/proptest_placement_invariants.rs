//! Property-based invariant tests for flyout placement.
//!
//! 1. `Top` placement lands exactly above the anchor when it fits, otherwise
//!    clamps to the space between the visible top and the anchor.
//! 2. `Auto` with enough room above a vertically centered anchor always
//!    places vertically (top preferred, bottom fallback).
//! 3. Horizontal positions are never negative.
//! 4. Unclamped placements keep the natural content height; clamped heights
//!    are never negative.
//! 5. Keyboard re-fit never leaves a top-positioned margin box below the
//!    visible bottom.
//! 6. Placement is deterministic.

use flyout_core::geometry::Rect;
use flyout_core::viewport::{FlyoutBox, Viewport};
use flyout_layout::{
    Alignment, HorizontalEdge, PlacementInput, PlacementMode, Side, VerticalEdge,
    check_keyboard_fit, place,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

const VIEW_W: f64 = 1280.0;
const VIEW_H: f64 = 720.0;

fn viewport() -> Viewport {
    Viewport::new(VIEW_W, VIEW_H)
}

/// Anchors fully inside the viewport.
fn anchor_strategy() -> impl Strategy<Value = Rect> {
    (0u32..1200, 0u32..680, 1u32..80, 1u32..40).prop_map(|(x, y, w, h)| {
        let w = w.min(1280 - x);
        let h = h.min(720 - y);
        Rect::new(f64::from(x), f64::from(y), f64::from(w.max(1)), f64::from(h.max(1)))
    })
}

fn flyout_strategy() -> impl Strategy<Value = FlyoutBox> {
    (1u32..900, 1u32..900, 0u32..12).prop_map(|(w, h, chrome)| {
        FlyoutBox::with_chrome(f64::from(w), f64::from(h), f64::from(chrome))
    })
}

fn anchored_mode_strategy() -> impl Strategy<Value = PlacementMode> {
    prop_oneof![
        Just(PlacementMode::Top),
        Just(PlacementMode::Bottom),
        Just(PlacementMode::Left),
        Just(PlacementMode::Right),
        Just(PlacementMode::Auto),
        Just(PlacementMode::AutoHorizontal),
        Just(PlacementMode::AutoVertical),
    ]
}

fn alignment_strategy() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Center),
        Just(Alignment::Left),
        Just(Alignment::Right),
    ]
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn top_placement_exact_or_clamped(anchor in anchor_strategy(), flyout in flyout_strategy()) {
        let vp = viewport();
        let input = PlacementInput::anchored(anchor, flyout, PlacementMode::Top, Alignment::Center);
        let out = place(&input, &vp).unwrap();

        let top = anchor.top() - flyout.outer_height;
        if top >= vp.visible_doc_top && top + flyout.outer_height <= vp.visible_doc_bottom() {
            prop_assert_eq!(out.vertical, VerticalEdge::Top(top));
            prop_assert!(!out.needs_scroll);
        } else {
            prop_assert_eq!(out.vertical, VerticalEdge::Top(vp.visible_doc_top));
            prop_assert!(out.needs_scroll);
            let expected = (anchor.top() - vp.visible_doc_top - flyout.margin_border_padding()).max(0.0);
            prop_assert_eq!(out.clamped_height(), Some(expected));
        }
    }

    #[test]
    fn auto_prefers_vertical_when_centered_anchor_fits(
        anchor in anchor_strategy(),
        flyout in flyout_strategy(),
        alignment in alignment_strategy(),
    ) {
        let vp = viewport();
        prop_assume!((vp.visible_doc_height - anchor.height) / 2.0 >= flyout.outer_height);
        let input = PlacementInput::anchored(anchor, flyout, PlacementMode::Auto, alignment);
        let out = place(&input, &vp).unwrap();
        prop_assert!(matches!(out.animation.keyframe, Side::Top | Side::Bottom));
        prop_assert!(!out.needs_scroll);
    }

    #[test]
    fn horizontal_never_negative(
        anchor in anchor_strategy(),
        flyout in flyout_strategy(),
        mode in anchored_mode_strategy(),
        alignment in alignment_strategy(),
    ) {
        let out = place(&PlacementInput::anchored(anchor, flyout, mode, alignment), &viewport()).unwrap();
        if let HorizontalEdge::Left(left) = out.horizontal {
            prop_assert!(left >= 0.0);
        }
    }

    #[test]
    fn height_bookkeeping(
        anchor in anchor_strategy(),
        flyout in flyout_strategy(),
        mode in anchored_mode_strategy(),
        alignment in alignment_strategy(),
    ) {
        let out = place(&PlacementInput::anchored(anchor, flyout, mode, alignment), &viewport()).unwrap();
        if out.needs_scroll {
            prop_assert!(out.adjusted_height >= 0.0);
        } else {
            prop_assert_eq!(out.adjusted_height, flyout.inner_height);
        }
        prop_assert_eq!(out.margin_border_padding, flyout.margin_border_padding());
    }

    #[test]
    fn keyboard_fit_keeps_top_boxes_visible(
        anchor in anchor_strategy(),
        flyout in flyout_strategy(),
        mode in anchored_mode_strategy(),
        keyboard in 0u32..700,
    ) {
        let mut out = place(&PlacementInput::anchored(anchor, flyout, mode, Alignment::Center), &viewport()).unwrap();
        let reduced = viewport().with_keyboard(f64::from(keyboard));
        check_keyboard_fit(&mut out, &reduced);
        if let VerticalEdge::Top(top) = out.vertical {
            prop_assert!(top + out.margin_box_height() <= reduced.visible_doc_bottom() + 1e-9
                || out.margin_border_padding > reduced.visible_doc_height);
        }
    }

    #[test]
    fn placement_is_deterministic(
        anchor in anchor_strategy(),
        flyout in flyout_strategy(),
        mode in anchored_mode_strategy(),
        alignment in alignment_strategy(),
    ) {
        let input = PlacementInput::anchored(anchor, flyout, mode, alignment);
        prop_assert_eq!(place(&input, &viewport()), place(&input, &viewport()));
    }
}

#[test]
fn mode_names_serialize_lowercase() {
    let json = serde_json::to_string(&PlacementMode::AutoHorizontal).unwrap();
    assert_eq!(json, "\"autohorizontal\"");
    let mode: PlacementMode = serde_json::from_str("\"autovertical\"").unwrap();
    assert_eq!(mode, PlacementMode::AutoVertical);
    let alignment: Alignment = serde_json::from_str("\"right\"").unwrap();
    assert_eq!(alignment, Alignment::Right);
}

#![forbid(unsafe_code)]

//! Integration tests for on-screen keyboard reflow.
//!
//! # Invariants tested
//!
//! 1. A flyout the keyboard would clip is hidden at once and faded back in
//!    at its adjusted spot after the keyboard's show duration.
//! 2. Flyouts that still fit, and hidden flyouts, are left alone.
//! 3. When the keyboard leaves, flyouts are fully re-placed: on the next
//!    turn, or after the resize when the layout viewport resizes.
//! 4. Keyboard-adjusted flyouts enter and leave with a fade.

use flyout_core::element::ElementId;
use flyout_core::geometry::Rect;
use flyout_core::viewport::{FlyoutBox, Viewport};
use flyout_harness::{DomEvent, TestDom, init_test_logging};
use flyout_widgets::{FlyoutConfig, FlyoutId, FlyoutManager, ShowOptions, Transition};
use web_time::Instant;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const KEYBOARD: f64 = 300.0;

fn plain() -> Viewport {
    Viewport::new(1280.0, 720.0)
}

fn with_keyboard() -> Viewport {
    plain().with_keyboard(KEYBOARD)
}

/// One flyout (200x150) above an anchor near the bottom of a 1280x720 page,
/// so it sits at top 450 without a keyboard.
fn setup(anchor: Rect) -> (TestDom, FlyoutManager, FlyoutId, ElementId) {
    init_test_logging();
    let mut dom = TestDom::new(plain());
    let button = dom.add_button(None, anchor);
    let panel = dom.add_flyout(FlyoutBox::tight(200.0, 150.0));
    let mut manager = FlyoutManager::new();
    let id = manager.create(panel, FlyoutConfig::default()).unwrap();
    manager
        .set_anchor(id, Some(button.into()))
        .unwrap();
    (dom, manager, id, panel)
}

fn low_anchor() -> Rect {
    Rect::new(100.0, 600.0, 80.0, 30.0)
}

fn top_of(dom: &TestDom, panel: ElementId) -> Option<f64> {
    dom.position(panel).and_then(|position| position.top)
}

/// Show, raise the keyboard, and let the fade-in timer fire.
fn shown_under_keyboard() -> (TestDom, FlyoutManager, FlyoutId, ElementId, Instant) {
    let (mut dom, mut manager, id, panel) = setup(low_anchor());
    manager.show(&mut dom, id, ShowOptions::new()).unwrap();
    dom.set_viewport(with_keyboard());
    let now = Instant::now();
    manager.keyboard_showing(&mut dom, now);
    let settled = now + with_keyboard().keyboard_show_duration;
    assert_eq!(manager.run_deferred(&mut dom, settled), 1);
    (dom, manager, id, panel, settled)
}

// ---------------------------------------------------------------------------
// Keyboard showing
// ---------------------------------------------------------------------------

#[test]
fn clipped_flyout_fades_back_in_after_keyboard_settles() {
    let (mut dom, mut manager, id, panel) = setup(low_anchor());
    manager.show(&mut dom, id, ShowOptions::new()).unwrap();
    assert_eq!(top_of(&dom, panel), Some(450.0));

    dom.set_viewport(with_keyboard());
    let now = Instant::now();
    manager.keyboard_showing(&mut dom, now);

    assert_eq!(dom.opacity(panel), 0.0);
    assert!(manager.instance(id).unwrap().keyboard_adjusted());
    let due = now + with_keyboard().keyboard_show_duration;
    assert_eq!(manager.next_deadline(), Some(due));

    // Nothing happens before the keyboard has finished sliding in.
    assert_eq!(manager.run_deferred(&mut dom, now), 0);
    assert_eq!(top_of(&dom, panel), Some(450.0));

    assert_eq!(manager.run_deferred(&mut dom, due), 1);
    let position = dom.position(panel).copied().unwrap();
    assert_eq!(position.top, None);
    assert_eq!(position.bottom, Some(KEYBOARD));
    assert_eq!(dom.opacity(panel), 1.0);
    assert_eq!(
        dom.log().last(),
        Some(&DomEvent::Replayed(panel, Transition::Fade))
    );
    assert!(!manager.has_deferred_work());
}

#[test]
fn flyout_that_still_fits_is_untouched() {
    let (mut dom, mut manager, id, panel) = setup(Rect::new(100.0, 50.0, 80.0, 30.0));
    manager.show(&mut dom, id, ShowOptions::new()).unwrap();
    let before = dom.position(panel).copied();

    dom.set_viewport(with_keyboard());
    manager.keyboard_showing(&mut dom, Instant::now());

    assert_eq!(dom.opacity(panel), 1.0);
    assert!(!manager.instance(id).unwrap().keyboard_adjusted());
    assert!(!manager.has_deferred_work());
    assert_eq!(dom.position(panel).copied(), before);
}

#[test]
fn hidden_flyouts_ignore_keyboard() {
    let (mut dom, mut manager, _id, panel) = setup(low_anchor());
    dom.set_viewport(with_keyboard());
    manager.keyboard_showing(&mut dom, Instant::now());
    manager.keyboard_hiding(&mut dom);
    assert!(!manager.has_deferred_work());
    assert!(dom.position(panel).is_none());
}

#[test]
fn hide_before_timer_skips_the_fade_in() {
    let (mut dom, mut manager, id, panel) = setup(low_anchor());
    manager.show(&mut dom, id, ShowOptions::new()).unwrap();
    dom.set_viewport(with_keyboard());
    let now = Instant::now();
    manager.keyboard_showing(&mut dom, now);

    manager.hide(&mut dom, id).unwrap();
    dom.take_log();
    manager.run_deferred(&mut dom, now + with_keyboard().keyboard_show_duration);

    assert_eq!(dom.opacity(panel), 1.0);
    assert!(
        !dom.log()
            .iter()
            .any(|event| matches!(event, DomEvent::Replayed(..) | DomEvent::Positioned(..)))
    );
}

#[test]
fn show_under_keyboard_clamps_and_fades() {
    let (mut dom, mut manager, id, panel) = setup(low_anchor());
    dom.set_viewport(with_keyboard());

    manager.show(&mut dom, id, ShowOptions::new()).unwrap();

    let visible = with_keyboard().visible_doc_height;
    let position = dom.position(panel).copied().unwrap();
    assert_eq!(position.top, Some(0.0));
    assert_eq!(position.max_height, Some(visible));
    assert!(position.scrolls);
    assert!(dom.log().contains(&DomEvent::Shown(panel, Transition::Fade)));

    let instance = manager.instance(id).unwrap();
    assert!(instance.keyboard_adjusted());
    assert!(instance.keyboard_was_up());
}

#[test]
fn keyboard_adjusted_flyout_hides_with_fade() {
    let (mut dom, mut manager, id, panel, _) = shown_under_keyboard();
    manager.hide(&mut dom, id).unwrap();
    let hidden = dom
        .log()
        .iter()
        .rev()
        .find(|event| matches!(event, DomEvent::Hidden(..)));
    assert_eq!(hidden, Some(&DomEvent::Hidden(panel, Transition::Fade)));
}

// ---------------------------------------------------------------------------
// Keyboard hiding
// ---------------------------------------------------------------------------

#[test]
fn keyboard_hiding_repositions_next_turn() {
    let (mut dom, mut manager, id, panel, settled) = shown_under_keyboard();
    assert_eq!(top_of(&dom, panel), None);

    dom.set_viewport(plain());
    manager.keyboard_hiding(&mut dom);
    assert!(manager.has_deferred_work());
    assert_eq!(manager.next_deadline(), None);

    assert_eq!(manager.run_deferred(&mut dom, settled), 1);
    assert_eq!(top_of(&dom, panel), Some(450.0));
    assert!(!manager.instance(id).unwrap().keyboard_adjusted());
}

#[test]
fn resizing_layout_waits_for_resize() {
    let (mut dom, mut manager, _id, panel, settled) = shown_under_keyboard();
    dom.set_viewport(with_keyboard().resizing_layout(true));

    manager.keyboard_hiding(&mut dom);
    assert!(!manager.has_deferred_work());

    dom.set_viewport(plain().resizing_layout(true));
    manager.resized(&mut dom);
    assert_eq!(manager.run_deferred(&mut dom, settled), 1);
    assert_eq!(top_of(&dom, panel), Some(450.0));

    // The flag is consumed by the first resize.
    manager.resized(&mut dom);
    assert!(!manager.has_deferred_work());
}

#[test]
fn resize_without_keyboard_hide_is_ignored() {
    let (mut dom, mut manager, id, _panel) = setup(low_anchor());
    manager.show(&mut dom, id, ShowOptions::new()).unwrap();
    manager.resized(&mut dom);
    assert!(!manager.has_deferred_work());
}

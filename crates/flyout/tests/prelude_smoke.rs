#![forbid(unsafe_code)]

//! The prelude is enough to drive a flyout end to end.

use std::error::Error as _;

use flyout::prelude::*;
use flyout::{FlyoutBox, FlyoutError, FocusHost};
use flyout_harness::TestDom;

fn open_menu(dom: &mut TestDom) -> Result<(FlyoutManager, FlyoutId)> {
    let button = dom.add_button(None, Rect::new(20.0, 20.0, 60.0, 24.0));
    let panel = dom.add_flyout(FlyoutBox::tight(160.0, 90.0));
    dom.add_button(Some(panel), Rect::new(0.0, 0.0, 10.0, 10.0));

    let mut flyouts = FlyoutManager::new();
    let menu = flyouts.create(panel, FlyoutConfig::menu().with_placement(PlacementMode::Bottom))?;
    flyouts.show(dom, menu, ShowOptions::new().anchor(button))?;
    flyouts.run_deferred(dom, Instant::now());
    Ok((flyouts, menu))
}

#[test]
fn show_and_hide_through_prelude() {
    let mut dom = TestDom::default();
    let (mut flyouts, menu) = open_menu(&mut dom).unwrap();

    assert!(!flyouts.is_hidden(menu).unwrap());
    assert_eq!(flyouts.cascade().entries(), &[menu]);

    let panel = flyouts.instance(menu).unwrap().element();
    assert_eq!(dom.active_element(), Some(panel));
    assert!(flyouts.handle_key_down(&mut dom, KeyInput::new(panel, KeyCode::Escape)));
    assert!(flyouts.is_hidden(menu).unwrap());
}

#[test]
fn errors_convert_into_facade_error() {
    fn failing(flyouts: &mut FlyoutManager, dom: &mut TestDom, id: FlyoutId) -> Result<()> {
        flyouts.show(dom, id, ShowOptions::new())?;
        Ok(())
    }

    let mut dom = TestDom::default();
    let panel = dom.add_flyout(FlyoutBox::tight(10.0, 10.0));
    let mut flyouts = FlyoutManager::new();
    let id = flyouts.create(panel, FlyoutConfig::default()).unwrap();

    let err = failing(&mut flyouts, &mut dom, id).unwrap_err();
    assert!(matches!(err, Error::Flyout(FlyoutError::MissingAnchor)));
    assert_eq!(err.to_string(), FlyoutError::MissingAnchor.to_string());
    assert!(err.source().is_some());
}

#[test]
fn namespaced_crates_are_reachable() {
    let viewport = flyout::core::Viewport::new(800.0, 600.0);
    assert!(!viewport.keyboard_visible);
    assert_eq!("bottom".parse::<flyout::layout::PlacementMode>(), Ok(PlacementMode::Bottom));
    assert_eq!(flyout::widgets::FlyoutConfig::default().placement, PlacementMode::Auto);
}

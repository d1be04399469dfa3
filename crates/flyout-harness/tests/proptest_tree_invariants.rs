#![forbid(unsafe_code)]

//! Property-based invariant tests for the `TestDom` element tree.
//!
//! Flyout routing leans on inclusive containment, so the in-memory host must
//! answer it like a real document tree.
//!
//! 1. Containment is reflexive.
//! 2. Containment is transitive.
//! 3. Containment is antisymmetric: two elements containing each other are
//!    the same element.
//! 4. A parent contains each of its children, and a child never contains its
//!    parent.
//! 5. `focus_first_in` / `focus_last_in` always land inside the container.

use flyout_core::element::ElementId;
use flyout_core::geometry::Rect;
use flyout_harness::TestDom;
use flyout_widgets::host::{ElementTree, FocusHost};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

/// One entry per element: its parent (an earlier element, or none) and
/// whether it is focusable.
fn tree_strategy() -> impl Strategy<Value = Vec<(Option<usize>, bool)>> {
    (1usize..=12).prop_flat_map(|n| {
        (0..n)
            .map(|i| {
                let parent = if i == 0 {
                    Just(None).boxed()
                } else {
                    proptest::option::of(0..i).boxed()
                };
                (parent, any::<bool>())
            })
            .collect::<Vec<_>>()
    })
}

fn build(shape: &[(Option<usize>, bool)]) -> (TestDom, Vec<ElementId>) {
    let mut dom = TestDom::default();
    let mut elements: Vec<ElementId> = Vec::with_capacity(shape.len());
    for &(parent, focusable) in shape {
        let parent = parent.map(|p| elements[p]);
        let element = if focusable {
            dom.add_button(parent, Rect::new(0.0, 0.0, 10.0, 10.0))
        } else {
            dom.add(parent)
        };
        elements.push(element);
    }
    (dom, elements)
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn containment_is_a_partial_order(shape in tree_strategy()) {
        let (dom, elements) = build(&shape);

        for &a in &elements {
            prop_assert!(dom.contains(a, a));
            for &b in &elements {
                if a != b {
                    prop_assert!(!(dom.contains(a, b) && dom.contains(b, a)));
                }
                for &c in &elements {
                    if dom.contains(a, b) && dom.contains(b, c) {
                        prop_assert!(dom.contains(a, c), "{:?} > {:?} > {:?}", a, b, c);
                    }
                }
            }
        }
    }

    #[test]
    fn parents_contain_children(shape in tree_strategy()) {
        let (dom, elements) = build(&shape);

        for (i, &(parent, _)) in shape.iter().enumerate() {
            if let Some(p) = parent {
                prop_assert!(dom.contains(elements[p], elements[i]));
                prop_assert!(!dom.contains(elements[i], elements[p]));
            }
        }
    }

    #[test]
    fn focus_moves_stay_inside_container(
        shape in tree_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        let (mut dom, elements) = build(&shape);
        let container = elements[pick.index(elements.len())];

        dom.focus_first_in(container);
        let first = dom.active_element();
        prop_assert!(first.is_some_and(|active| dom.contains(container, active)));

        dom.focus_last_in(container);
        let last = dom.active_element();
        prop_assert!(last.is_some_and(|active| dom.contains(container, active)));
    }
}

#![forbid(unsafe_code)]

//! In-memory host for flyout tests.
//!
//! [`TestDom`] is a tiny element tree with focus, geometry, and an overlay
//! layer. It implements every host trait, records what the manager asked it
//! to do as [`DomEvent`]s, and can answer lifecycle notifications with
//! scripted [`FlyoutCommand`]s to provoke reentrancy.
//!
//! Transitions complete immediately by default. Call
//! [`TestDom::set_animate`] to make them report `Started`; the test then
//! finishes them through `FlyoutManager::transition_finished`.

use std::collections::{BTreeMap, BTreeSet};

use flyout_core::element::ElementId;
use flyout_core::event::{FocusChange, FocusStyle};
use flyout_core::geometry::Rect;
use flyout_core::logging::LOG_ENV;
use flyout_core::viewport::{FlyoutBox, GeometryProvider, Viewport};
use flyout_layout::ResolvedPosition;
use flyout_widgets::cascade::FlyoutId;
use flyout_widgets::host::{
    ElementTree, FlyoutCommand, FocusHost, LifecycleEvent, OverlayHost, Transition,
    TransitionStart,
};

/// Something the manager did to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    Shown(ElementId, Transition),
    Hidden(ElementId, Transition),
    Replayed(ElementId, Transition),
    Positioned(ElementId, ResolvedPosition),
    Opacity(ElementId, f32),
    Focused(ElementId, FocusStyle),
    DismissSurface(bool),
    Lifecycle(FlyoutId, LifecycleEvent),
}

/// Deterministic host backed by plain maps.
#[derive(Debug)]
pub struct TestDom {
    next_element: u64,
    parents: BTreeMap<ElementId, ElementId>,
    order: Vec<ElementId>,
    names: BTreeMap<String, ElementId>,
    rects: BTreeMap<ElementId, Rect>,
    boxes: BTreeMap<ElementId, FlyoutBox>,
    focusable: BTreeSet<ElementId>,
    rtl: BTreeSet<ElementId>,
    hidden_companions: BTreeSet<ElementId>,
    viewport: Viewport,
    active: Option<ElementId>,
    dismiss_surface: ElementId,
    dismiss_visible: bool,
    visible: BTreeSet<ElementId>,
    positions: BTreeMap<ElementId, ResolvedPosition>,
    opacity: BTreeMap<ElementId, f32>,
    animate: bool,
    reactions: Vec<(FlyoutId, LifecycleEvent, FlyoutCommand)>,
    log: Vec<DomEvent>,
}

impl Default for TestDom {
    fn default() -> Self {
        Self::new(Viewport::new(1280.0, 720.0))
    }
}

impl TestDom {
    pub fn new(viewport: Viewport) -> Self {
        let mut dom = Self {
            next_element: 1,
            parents: BTreeMap::new(),
            order: Vec::new(),
            names: BTreeMap::new(),
            rects: BTreeMap::new(),
            boxes: BTreeMap::new(),
            focusable: BTreeSet::new(),
            rtl: BTreeSet::new(),
            hidden_companions: BTreeSet::new(),
            viewport,
            active: None,
            dismiss_surface: ElementId::new(0),
            dismiss_visible: false,
            visible: BTreeSet::new(),
            positions: BTreeMap::new(),
            opacity: BTreeMap::new(),
            animate: false,
            reactions: Vec::new(),
            log: Vec::new(),
        };
        dom.dismiss_surface = dom.add(None);
        dom
    }

    // ── Tree building ───────────────────────────────────────────────────

    /// New element under `parent` (or a new root).
    pub fn add(&mut self, parent: Option<ElementId>) -> ElementId {
        let element = ElementId::new(self.next_element);
        self.next_element += 1;
        if let Some(parent) = parent {
            self.parents.insert(element, parent);
        }
        self.order.push(element);
        element
    }

    /// New focusable element with a bounding rectangle, e.g. a button.
    pub fn add_button(&mut self, parent: Option<ElementId>, rect: Rect) -> ElementId {
        let element = self.add(parent);
        self.focusable.insert(element);
        self.rects.insert(element, rect);
        element
    }

    /// New flyout root element with a measured box.
    pub fn add_flyout(&mut self, flyout: FlyoutBox) -> ElementId {
        let element = self.add(None);
        self.boxes.insert(element, flyout);
        element
    }

    pub fn set_name(&mut self, element: ElementId, name: &str) {
        self.names.insert(name.to_owned(), element);
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    /// Drop an element's rectangle, as if it were detached from layout.
    pub fn clear_rect(&mut self, element: ElementId) {
        self.rects.remove(&element);
    }

    pub fn set_box(&mut self, element: ElementId, flyout: FlyoutBox) {
        self.boxes.insert(element, flyout);
    }

    pub fn set_focusable(&mut self, element: ElementId) {
        self.focusable.insert(element);
    }

    pub fn set_rtl(&mut self, element: ElementId) {
        self.rtl.insert(element);
    }

    pub fn set_hidden_companion(&mut self, element: ElementId, hidden: bool) {
        if hidden {
            self.hidden_companions.insert(element);
        } else {
            self.hidden_companions.remove(&element);
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Report `Started` for transitions instead of completing them inline.
    pub fn set_animate(&mut self, animate: bool) {
        self.animate = animate;
    }

    /// Answer the next `event` on `flyout` with `command` (one shot).
    pub fn react(&mut self, flyout: FlyoutId, event: LifecycleEvent, command: FlyoutCommand) {
        self.reactions.push((flyout, event, command));
    }

    /// Move focus as a user would. Returns the change for the manager to route.
    pub fn user_focus(&mut self, element: ElementId) -> FocusChange {
        let change = FocusChange::new(self.active, Some(element));
        self.active = Some(element);
        change
    }

    // ── Inspection ──────────────────────────────────────────────────────

    pub fn dismiss_surface(&self) -> ElementId {
        self.dismiss_surface
    }

    pub fn dismiss_surface_visible(&self) -> bool {
        self.dismiss_visible
    }

    pub fn is_visible(&self, element: ElementId) -> bool {
        self.visible.contains(&element)
    }

    pub fn position(&self, element: ElementId) -> Option<&ResolvedPosition> {
        self.positions.get(&element)
    }

    pub fn opacity(&self, element: ElementId) -> f32 {
        self.opacity.get(&element).copied().unwrap_or(1.0)
    }

    pub fn log(&self) -> &[DomEvent] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<DomEvent> {
        std::mem::take(&mut self.log)
    }

    /// Lifecycle events fired for `flyout`, in order.
    pub fn lifecycle(&self, flyout: FlyoutId) -> Vec<LifecycleEvent> {
        self.log
            .iter()
            .filter_map(|event| match event {
                DomEvent::Lifecycle(id, event) if *id == flyout => Some(*event),
                _ => None,
            })
            .collect()
    }

    /// Elements hidden, in order.
    pub fn hidden_order(&self) -> Vec<ElementId> {
        self.log
            .iter()
            .filter_map(|event| match event {
                DomEvent::Hidden(element, _) => Some(*element),
                _ => None,
            })
            .collect()
    }

    fn focusables_in(&self, container: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        self.order.iter().copied().filter(move |&element| {
            element != container
                && self.focusable.contains(&element)
                && self.contains(container, element)
        })
    }

    fn set_active(&mut self, element: ElementId, style: FocusStyle) {
        self.active = Some(element);
        self.log.push(DomEvent::Focused(element, style));
    }
}

impl GeometryProvider for TestDom {
    fn anchor_rect(&self, element: ElementId) -> Option<Rect> {
        self.rects.get(&element).copied()
    }

    fn flyout_box(&self, element: ElementId) -> FlyoutBox {
        self.boxes.get(&element).copied().unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl ElementTree for TestDom {
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(element) = current {
            if element == ancestor {
                return true;
            }
            current = self.parents.get(&element).copied();
        }
        false
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.names.get(id).copied()
    }

    fn is_rtl(&self, element: ElementId) -> bool {
        self.rtl.iter().any(|&root| self.contains(root, element))
    }

    fn is_hidden_companion(&self, element: ElementId) -> bool {
        self.hidden_companions
            .iter()
            .any(|&root| self.contains(root, element))
    }
}

impl FocusHost for TestDom {
    fn active_element(&self) -> Option<ElementId> {
        self.active
    }

    fn focus(&mut self, element: ElementId, style: FocusStyle) {
        self.set_active(element, style);
    }

    fn focus_first_in(&mut self, container: ElementId) {
        let target = self.focusables_in(container).next().unwrap_or(container);
        self.set_active(target, FocusStyle::Visible);
    }

    fn focus_last_in(&mut self, container: ElementId) {
        let target = self.focusables_in(container).last().unwrap_or(container);
        self.set_active(target, FocusStyle::Visible);
    }
}

impl OverlayHost for TestDom {
    fn begin_show(&mut self, element: ElementId, transition: Transition) -> TransitionStart {
        self.visible.insert(element);
        self.log.push(DomEvent::Shown(element, transition));
        if self.animate {
            TransitionStart::Started
        } else {
            TransitionStart::Skipped
        }
    }

    fn begin_hide(&mut self, element: ElementId, transition: Transition) -> TransitionStart {
        self.visible.remove(&element);
        self.log.push(DomEvent::Hidden(element, transition));
        if self.animate {
            TransitionStart::Started
        } else {
            TransitionStart::Skipped
        }
    }

    fn play_show_transition(&mut self, element: ElementId, transition: Transition) {
        self.log.push(DomEvent::Replayed(element, transition));
    }

    fn apply_position(&mut self, element: ElementId, position: &ResolvedPosition) {
        self.positions.insert(element, *position);
        self.log.push(DomEvent::Positioned(element, *position));
    }

    fn set_opacity(&mut self, element: ElementId, opacity: f32) {
        self.opacity.insert(element, opacity);
        self.log.push(DomEvent::Opacity(element, opacity));
    }

    fn show_dismiss_surface(&mut self) {
        if !self.dismiss_visible {
            self.dismiss_visible = true;
            self.log.push(DomEvent::DismissSurface(true));
        }
    }

    fn hide_dismiss_surface(&mut self) {
        if self.dismiss_visible {
            self.dismiss_visible = false;
            self.log.push(DomEvent::DismissSurface(false));
        }
    }

    fn is_dismiss_surface(&self, element: ElementId) -> bool {
        element == self.dismiss_surface
    }

    fn notify(&mut self, flyout: FlyoutId, event: LifecycleEvent) -> Vec<FlyoutCommand> {
        self.log.push(DomEvent::Lifecycle(flyout, event));
        let (fired, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.reactions)
            .into_iter()
            .partition(|(id, on, _)| *id == flyout && *on == event);
        self.reactions = kept;
        fired.into_iter().map(|(_, _, command)| command).collect()
    }
}

/// Install a test-friendly subscriber honoring `FLYOUT_LOG`. Safe to call
/// from every test.
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_is_inclusive_and_transitive() {
        let mut dom = TestDom::default();
        let root = dom.add(None);
        let child = dom.add(Some(root));
        let grandchild = dom.add(Some(child));
        assert!(dom.contains(root, root));
        assert!(dom.contains(root, grandchild));
        assert!(!dom.contains(child, root));
        assert!(!dom.contains(dom.dismiss_surface(), root));
    }

    #[test]
    fn focus_first_and_last() {
        let mut dom = TestDom::default();
        let panel = dom.add_flyout(FlyoutBox::tight(100.0, 100.0));
        let a = dom.add_button(Some(panel), Rect::new(0.0, 0.0, 10.0, 10.0));
        let _plain = dom.add(Some(panel));
        let b = dom.add_button(Some(panel), Rect::new(0.0, 10.0, 10.0, 10.0));

        dom.focus_first_in(panel);
        assert_eq!(dom.active_element(), Some(a));
        dom.focus_last_in(panel);
        assert_eq!(dom.active_element(), Some(b));

        let empty = dom.add_flyout(FlyoutBox::tight(10.0, 10.0));
        dom.focus_first_in(empty);
        assert_eq!(dom.active_element(), Some(empty));
    }

    #[test]
    fn reactions_fire_once() {
        let mut dom = TestDom::default();
        let id = FlyoutId::new(0);
        dom.react(id, LifecycleEvent::AfterHide, FlyoutCommand::Hide(FlyoutId::new(1)));
        assert!(dom.notify(id, LifecycleEvent::BeforeHide).is_empty());
        assert_eq!(dom.notify(id, LifecycleEvent::AfterHide).len(), 1);
        assert!(dom.notify(id, LifecycleEvent::AfterHide).is_empty());
        assert_eq!(dom.lifecycle(id).len(), 3);
    }

    #[test]
    fn names_and_rtl_resolve_through_tree() {
        let mut dom = TestDom::default();
        let root = dom.add(None);
        let item = dom.add(Some(root));
        dom.set_name(item, "item");
        dom.set_rtl(root);
        assert_eq!(dom.element_by_id("item"), Some(item));
        assert_eq!(dom.element_by_id("missing"), None);
        assert!(dom.is_rtl(item));
    }

    #[test]
    fn dismiss_surface_logs_transitions_only() {
        let mut dom = TestDom::default();
        dom.show_dismiss_surface();
        dom.show_dismiss_surface();
        dom.hide_dismiss_surface();
        assert_eq!(
            dom.take_log(),
            vec![DomEvent::DismissSurface(true), DomEvent::DismissSurface(false)]
        );
    }
}

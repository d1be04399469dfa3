#![forbid(unsafe_code)]

//! Collaborator contracts the flyout manager drives.
//!
//! The manager decides *where* flyouts go and *which* flyouts close; hosts own
//! the element tree, focus, rendering, and animation. A host implements the
//! four traits below and gets [`FlyoutHost`] for free.
//!
//! Transitions that report [`TransitionStart::Started`] must later be
//! completed with
//! [`FlyoutManager::transition_finished`](crate::flyout::FlyoutManager::transition_finished).

use flyout_core::element::ElementId;
use flyout_core::event::FocusStyle;
use flyout_core::geometry::Point;
use flyout_core::viewport::GeometryProvider;
use flyout_layout::{AnimationOffset, ResolvedPosition};

use crate::cascade::FlyoutId;
use crate::flyout::ShowOptions;

/// Element-tree queries.
pub trait ElementTree {
    /// Inclusive containment: an element contains itself.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    /// Resolve a string identifier.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Whether `element` lays out right-to-left.
    fn is_rtl(&self, _element: ElementId) -> bool {
        false
    }

    /// Whether `element` belongs to a companion overlay that is currently
    /// hidden (focus must not be restored onto it).
    fn is_hidden_companion(&self, _element: ElementId) -> bool {
        false
    }
}

/// Focus control.
pub trait FocusHost {
    fn active_element(&self) -> Option<ElementId>;

    fn focus(&mut self, element: ElementId, style: FocusStyle);

    /// Focus the first focusable descendant of `container`, or the container.
    fn focus_first_in(&mut self, container: ElementId);

    /// Focus the last focusable descendant of `container`, or the container.
    fn focus_last_in(&mut self, container: ElementId);
}

/// How a flyout enters or leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Slide from the anchor side.
    Popup(AnimationOffset),
    /// Plain fade, used after the keyboard moved the flyout.
    Fade,
}

/// Whether the host started an asynchronous transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStart {
    /// Completion will be reported through `transition_finished`.
    Started,
    /// The element changed visibility immediately.
    Skipped,
}

/// Lifecycle notifications fired per flyout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    BeforeShow,
    AfterShow,
    BeforeHide,
    AfterHide,
}

/// Follow-up requests a host may return from a lifecycle notification.
///
/// Commands run synchronously, inside whatever operation fired the event, so
/// a show issued while the cascade is collapsing is deferred until it unlocks.
#[derive(Debug, Clone, PartialEq)]
pub enum FlyoutCommand {
    Show(FlyoutId, ShowOptions),
    ShowAt(FlyoutId, Point),
    Hide(FlyoutId),
}

/// Rendering, animation, and dismiss-surface control.
pub trait OverlayHost {
    /// Make the flyout element visible and start its entrance transition.
    fn begin_show(&mut self, element: ElementId, transition: Transition) -> TransitionStart;

    /// Start the exit transition.
    fn begin_hide(&mut self, element: ElementId, transition: Transition) -> TransitionStart;

    /// Replay an entrance transition on an already visible flyout.
    fn play_show_transition(&mut self, element: ElementId, transition: Transition);

    fn apply_position(&mut self, element: ElementId, position: &ResolvedPosition);

    fn set_opacity(&mut self, element: ElementId, opacity: f32);

    /// Idempotent.
    fn show_dismiss_surface(&mut self);

    /// Idempotent.
    fn hide_dismiss_surface(&mut self);

    fn is_dismiss_surface(&self, element: ElementId) -> bool;

    fn notify(&mut self, _flyout: FlyoutId, _event: LifecycleEvent) -> Vec<FlyoutCommand> {
        Vec::new()
    }
}

/// Everything the manager needs from its host.
pub trait FlyoutHost: GeometryProvider + ElementTree + FocusHost + OverlayHost {}

impl<T> FlyoutHost for T where T: GeometryProvider + ElementTree + FocusHost + OverlayHost + ?Sized {}

#![forbid(unsafe_code)]

//! Show/hide orchestration for cascading flyouts.
//!
//! [`FlyoutManager`] owns every [`FlyoutInstance`], the shared
//! [`CascadeStack`], and a queue of deferred work. Each operation takes the
//! host (anything implementing [`FlyoutHost`]) by `&mut`, so the manager never
//! holds on to host state between calls.
//!
//! # Show
//!
//! A show request resolves its anchor, placement, and alignment immediately
//! and stores them as a [`ShowRecipe`]. If the flyout is mid-transition, or the
//! cascade is mid-collapse, the request is parked as
//! [`PendingAction::Show`] and the recipe is replayed verbatim once the
//! blocker clears. Otherwise the flyout is placed, appended to the cascade
//! (collapsing unrelated branches), the prior focus is recorded, and focus
//! moves into the flyout.
//!
//! # Hide
//!
//! Hiding collapses the flyout and its descendants through the cascade, then
//! returns focus to whatever held it before the flyout opened, if focus is
//! still inside the flyout or on the dismiss surface.
//!
//! # Invariants
//!
//! 1. At most one pending action per flyout; the latest request wins.
//! 2. A failed show (bad configuration, missing anchor) changes no state.
//! 3. The dismiss surface is hidden once no flyout is visible.

mod cascade_ops;
mod deferred;
mod keyboard;

use std::collections::BTreeMap;

use flyout_core::element::{AnchorRef, ElementId};
use flyout_core::event::{FocusChange, FocusStyle};
use flyout_core::geometry::Point;
use flyout_layout::{
    Alignment, PlacementInput, PlacementMode, PlacementOutcome, ResolvedPosition,
    check_keyboard_fit, place,
};
use web_time::Instant;

use crate::cascade::{CascadeStack, FlyoutId};
use crate::config::FlyoutConfig;
use crate::error::FlyoutError;
use crate::host::{
    ElementTree, FlyoutCommand, FlyoutHost, LifecycleEvent, Transition, TransitionStart,
};

use deferred::{Deferred, DeferredQueue};

/// Lifecycle state of a flyout's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

impl Visibility {
    /// A transition is in flight.
    #[inline]
    pub const fn is_animating(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding)
    }
}

/// Request parked until the current transition or collapse finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    Show,
    Hide,
}

/// Per-show overrides. Unset fields fall back to the flyout's properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowOptions {
    pub anchor: Option<AnchorRef>,
    pub placement: Option<PlacementMode>,
    pub alignment: Option<Alignment>,
}

impl ShowOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn anchor(mut self, anchor: impl Into<AnchorRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    #[must_use]
    pub fn placement(mut self, placement: PlacementMode) -> Self {
        self.placement = Some(placement);
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }
}

/// Fully resolved parameters of one show request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShowRecipe {
    Anchored {
        anchor: ElementId,
        placement: PlacementMode,
        alignment: Alignment,
    },
    /// Point placement. `anchor` only decides where the flyout joins the
    /// cascade.
    AtPoint {
        anchor: Option<ElementId>,
        point: Point,
    },
}

impl ShowRecipe {
    pub const fn anchor(&self) -> Option<ElementId> {
        match *self {
            Self::Anchored { anchor, .. } => Some(anchor),
            Self::AtPoint { anchor, .. } => anchor,
        }
    }

    pub const fn placement(&self) -> PlacementMode {
        match *self {
            Self::Anchored { placement, .. } => placement,
            Self::AtPoint { .. } => PlacementMode::Cartesian,
        }
    }

    pub const fn alignment(&self) -> Alignment {
        match *self {
            Self::Anchored { alignment, .. } => alignment,
            Self::AtPoint { .. } => Alignment::None,
        }
    }
}

/// One flyout and its bookkeeping.
#[derive(Debug, Clone)]
pub struct FlyoutInstance {
    id: FlyoutId,
    element: ElementId,
    anchor: Option<AnchorRef>,
    placement: PlacementMode,
    alignment: Alignment,
    disabled: bool,
    menu: bool,
    sticky: bool,
    popup_offset: f64,
    visibility: Visibility,
    recipe: Option<ShowRecipe>,
    outcome: Option<PlacementOutcome>,
    previous_focus: Option<ElementId>,
    pending: Option<PendingAction>,
    keyboard_invoked: bool,
    keyboard_adjusted: bool,
    keyboard_was_up: bool,
    needs_keyboard_hide_reflow: bool,
}

impl FlyoutInstance {
    fn new(id: FlyoutId, element: ElementId, config: &FlyoutConfig) -> Self {
        Self {
            id,
            element,
            anchor: None,
            placement: config.placement,
            alignment: config.alignment,
            disabled: false,
            menu: config.menu,
            sticky: config.sticky,
            popup_offset: config.popup_offset,
            visibility: Visibility::Hidden,
            recipe: None,
            outcome: None,
            previous_focus: None,
            pending: None,
            keyboard_invoked: false,
            keyboard_adjusted: false,
            keyboard_was_up: false,
            needs_keyboard_hide_reflow: false,
        }
    }

    pub fn id(&self) -> FlyoutId {
        self.id
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn anchor(&self) -> Option<&AnchorRef> {
        self.anchor.as_ref()
    }

    pub fn placement(&self) -> PlacementMode {
        self.placement
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_menu(&self) -> bool {
        self.menu
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Hidden, on its way out, or about to be hidden.
    pub fn is_hidden(&self) -> bool {
        matches!(self.visibility, Visibility::Hidden | Visibility::Hiding)
            || self.pending == Some(PendingAction::Hide)
    }

    /// Parameters of the most recent show request.
    pub fn recipe(&self) -> Option<&ShowRecipe> {
        self.recipe.as_ref()
    }

    /// Placement currently applied.
    pub fn placement_outcome(&self) -> Option<&PlacementOutcome> {
        self.outcome.as_ref()
    }

    pub fn previous_focus(&self) -> Option<ElementId> {
        self.previous_focus
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    /// The last placement was altered to avoid the on-screen keyboard.
    pub fn keyboard_adjusted(&self) -> bool {
        self.keyboard_adjusted
    }

    /// The keyboard was up when the last show completed.
    pub fn keyboard_was_up(&self) -> bool {
        self.keyboard_was_up
    }
}

/// Owner of all flyouts, the cascade, and deferred work.
#[derive(Debug, Default)]
pub struct FlyoutManager {
    instances: BTreeMap<FlyoutId, FlyoutInstance>,
    cascade: CascadeStack,
    deferred: DeferredQueue,
    next_id: u32,
}

impl FlyoutManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a flyout backed by `element`. Defaults that fail
    /// [`FlyoutConfig::validate`] are rejected.
    pub fn create(
        &mut self,
        element: ElementId,
        config: FlyoutConfig,
    ) -> Result<FlyoutId, FlyoutError> {
        check_placement(config.placement)?;
        check_alignment(config.alignment)?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(FlyoutError::InvalidConfig(errors));
        }

        let id = FlyoutId::new(self.next_id);
        self.next_id += 1;
        self.instances
            .insert(id, FlyoutInstance::new(id, element, &config));
        tracing::debug!(message = "flyout.create", flyout = %id, element = %element);
        Ok(id)
    }

    pub fn instance(&self, id: FlyoutId) -> Option<&FlyoutInstance> {
        self.instances.get(&id)
    }

    /// Iterate all flyouts in creation order.
    pub fn instances(&self) -> impl Iterator<Item = &FlyoutInstance> {
        self.instances.values()
    }

    pub fn cascade(&self) -> &CascadeStack {
        &self.cascade
    }

    pub fn is_hidden(&self, id: FlyoutId) -> Result<bool, FlyoutError> {
        Ok(self.get(id)?.is_hidden())
    }

    /// Whether any flyout is currently visible.
    pub fn any_visible(&self) -> bool {
        self.instances.values().any(|instance| !instance.is_hidden())
    }

    // ── Properties ──────────────────────────────────────────────────────

    pub fn set_anchor(
        &mut self,
        id: FlyoutId,
        anchor: Option<AnchorRef>,
    ) -> Result<(), FlyoutError> {
        self.get_mut(id)?.anchor = anchor;
        Ok(())
    }

    /// Rejects `Cartesian`, which only point-based shows may use.
    pub fn set_placement(
        &mut self,
        id: FlyoutId,
        placement: PlacementMode,
    ) -> Result<(), FlyoutError> {
        let instance = self.get_mut(id)?;
        check_placement(placement)?;
        instance.placement = placement;
        Ok(())
    }

    /// Rejects `None`, which only point-based shows may use.
    pub fn set_alignment(
        &mut self,
        id: FlyoutId,
        alignment: Alignment,
    ) -> Result<(), FlyoutError> {
        let instance = self.get_mut(id)?;
        check_alignment(alignment)?;
        instance.alignment = alignment;
        Ok(())
    }

    /// Disabling a visible flyout hides it. Disabled flyouts ignore show
    /// requests, including ones already queued.
    pub fn set_disabled<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        disabled: bool,
    ) -> Result<(), FlyoutError> {
        let instance = self.get_mut(id)?;
        if instance.disabled == disabled {
            return Ok(());
        }
        instance.disabled = disabled;
        if disabled && !instance.is_hidden() {
            self.hide(host, id)?;
        }
        Ok(())
    }

    // ── Show / hide ─────────────────────────────────────────────────────

    /// Show anchored to an element.
    ///
    /// # Errors
    ///
    /// - [`FlyoutError::InvalidPlacement`] / [`FlyoutError::InvalidAlignment`]
    ///   when the effective value is point-only.
    /// - [`FlyoutError::MissingAnchor`] when no anchor resolves.
    pub fn show<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        options: ShowOptions,
    ) -> Result<(), FlyoutError> {
        let instance = self.get(id)?;
        if instance.disabled {
            return Ok(());
        }

        let placement = options.placement.unwrap_or(instance.placement);
        let alignment = options.alignment.unwrap_or(instance.alignment);
        check_placement(placement)?;
        check_alignment(alignment)?;

        let anchor = options
            .anchor
            .as_ref()
            .or(instance.anchor.as_ref())
            .and_then(|anchor| resolve_anchor(&*host, anchor))
            .ok_or(FlyoutError::MissingAnchor)?;

        self.begin_show(
            host,
            id,
            ShowRecipe::Anchored {
                anchor,
                placement,
                alignment,
            },
        )
    }

    /// Show at a point. Accepts a [`Point`], an `(x, y)` pair, or a
    /// [`PointerEvent`](flyout_core::PointerEvent).
    pub fn show_at<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        point: impl Into<Point>,
    ) -> Result<(), FlyoutError> {
        let instance = self.get(id)?;
        if instance.disabled {
            return Ok(());
        }
        let anchor = instance
            .anchor
            .as_ref()
            .and_then(|anchor| resolve_anchor(&*host, anchor));
        self.begin_show(
            host,
            id,
            ShowRecipe::AtPoint {
                anchor,
                point: point.into(),
            },
        )
    }

    /// Hide the flyout and everything cascading from it.
    pub fn hide<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
    ) -> Result<(), FlyoutError> {
        self.get_mut(id)?.keyboard_invoked = false;
        self.hide_internal(host, id);
        Ok(())
    }

    /// Click on the dismiss surface: close the whole cascade.
    pub fn light_dismiss<H: FlyoutHost + ?Sized>(&mut self, host: &mut H) {
        self.collapse_all(host, false);
    }

    /// Report that a transition started by the host has finished.
    pub fn transition_finished<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
    ) -> Result<(), FlyoutError> {
        match self.get(id)?.visibility {
            Visibility::Showing => self.complete_show(host, id),
            Visibility::Hiding => self.complete_hide(host, id),
            Visibility::Hidden | Visibility::Shown => {}
        }
        Ok(())
    }

    /// Hide and forget a flyout. Later calls with `id` report
    /// [`FlyoutError::UnknownFlyout`]. A flyout still running its entrance
    /// transition is hidden with a fade; its completion is never reported.
    pub fn dispose<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
    ) -> Result<(), FlyoutError> {
        self.get(id)?;
        self.hide_internal(host, id);
        self.cascade.forget(id);
        self.deferred.forget(id);
        // A hide parked behind the entrance transition would never run.
        if let Some(instance) = self.instances.remove(&id) {
            if instance.visibility == Visibility::Showing {
                host.begin_hide(instance.element, Transition::Fade);
            }
        }
        if !self.any_visible() {
            host.hide_dismiss_surface();
        }
        tracing::debug!(message = "flyout.dispose", flyout = %id);
        Ok(())
    }

    // ── Deferred work ───────────────────────────────────────────────────

    /// Run one turn of deferred work due at `now`. Returns the number of
    /// tasks executed.
    pub fn run_deferred<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, now: Instant) -> usize {
        let tasks = self.deferred.take_due(now);
        let count = tasks.len();
        for task in tasks {
            match task {
                Deferred::CheckDoNext(id) => self.check_do_next(host, id),
                Deferred::AdjustForKeyboard(id) => self.adjust_for_keyboard(host, id),
                Deferred::Reposition(id) => self.reposition(host, id),
            }
        }
        count
    }

    /// Deadline of the earliest timed task, when nothing is ready sooner.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deferred.next_deadline()
    }

    pub fn has_deferred_work(&self) -> bool {
        !self.deferred.is_empty()
    }

    // ── Internals ───────────────────────────────────────────────────────

    fn get(&self, id: FlyoutId) -> Result<&FlyoutInstance, FlyoutError> {
        self.instances.get(&id).ok_or(FlyoutError::UnknownFlyout(id))
    }

    fn get_mut(&mut self, id: FlyoutId) -> Result<&mut FlyoutInstance, FlyoutError> {
        self.instances
            .get_mut(&id)
            .ok_or(FlyoutError::UnknownFlyout(id))
    }

    fn begin_show<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        recipe: ShowRecipe,
    ) -> Result<(), FlyoutError> {
        let instance = self.get(id)?;
        if instance.disabled {
            return Ok(());
        }
        let visibility = instance.visibility;
        let sticky = instance.sticky;
        let locked = self.cascade.is_locked();
        let defer = visibility.is_animating() || locked;

        // Placement runs before any mutation so a missing anchor leaves no trace.
        let outcome = if !defer && visibility == Visibility::Hidden {
            Some(self.compute_placement(&*host, id, &recipe)?)
        } else {
            None
        };

        let instance = self.get_mut(id)?;
        instance.recipe = Some(recipe);
        if defer {
            instance.pending = Some(PendingAction::Show);
        }
        if !sticky {
            host.show_dismiss_surface();
        }

        if defer {
            if locked {
                self.cascade.wait_for_unlock(id);
            }
            tracing::debug!(
                message = "flyout.deferred",
                flyout = %id,
                animating = visibility.is_animating(),
                locked
            );
            return Ok(());
        }

        let Some(outcome) = outcome else {
            return Ok(());
        };
        let Some(start) = self.base_show(host, id, outcome) else {
            return Ok(());
        };

        self.append(host, id)?;
        let previous = host.active_element();
        let Ok(instance) = self.get_mut(id) else {
            return Ok(());
        };
        instance.previous_focus = previous;
        let (element, menu) = (instance.element, instance.menu);
        self.focus_into(host, element, menu);

        tracing::info!(
            message = "flyout.show",
            flyout = %id,
            placement = recipe.placement().as_str(),
            alignment = recipe.alignment().as_str(),
            depth = self.cascade.len()
        );

        if start == TransitionStart::Skipped {
            self.complete_show(host, id);
        }
        Ok(())
    }

    fn compute_placement<H: FlyoutHost + ?Sized>(
        &self,
        host: &H,
        id: FlyoutId,
        recipe: &ShowRecipe,
    ) -> Result<PlacementOutcome, FlyoutError> {
        let instance = self.get(id)?;
        let flyout = host.flyout_box(instance.element);
        let input = match *recipe {
            ShowRecipe::Anchored {
                anchor,
                placement,
                alignment,
            } => {
                let rect = host.anchor_rect(anchor).ok_or(FlyoutError::MissingAnchor)?;
                PlacementInput::anchored(rect, flyout, placement, alignment)
            }
            ShowRecipe::AtPoint { point, .. } => PlacementInput::at_point(point, flyout),
        };
        let input = PlacementInput {
            popup_offset: instance.popup_offset,
            ..input
        };
        Ok(place(&input, &host.viewport())?)
    }

    /// Store and apply `outcome`, re-fitting it first when the keyboard is up.
    /// Returns the transition matching how the flyout was placed.
    fn apply_placement<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        mut outcome: PlacementOutcome,
    ) -> Option<Transition> {
        let viewport = host.viewport();
        let adjusted = viewport.keyboard_visible && check_keyboard_fit(&mut outcome, &viewport);
        let instance = self.instances.get_mut(&id)?;
        instance.outcome = Some(outcome);
        instance.keyboard_adjusted = adjusted;
        host.apply_position(
            instance.element,
            &ResolvedPosition::from_outcome(&outcome, &viewport),
        );
        Some(if adjusted {
            Transition::Fade
        } else {
            Transition::Popup(outcome.animation)
        })
    }

    /// Returns `None` when the flyout is not hidden.
    fn base_show<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
        outcome: PlacementOutcome,
    ) -> Option<TransitionStart> {
        let instance = self.instances.get_mut(&id)?;
        if instance.visibility != Visibility::Hidden {
            return None;
        }
        instance.visibility = Visibility::Showing;
        instance.pending = None;
        let element = instance.element;

        self.notify(host, id, LifecycleEvent::BeforeShow);
        let transition = self.apply_placement(host, id, outcome)?;
        Some(host.begin_show(element, transition))
    }

    /// Returns `None` when there is nothing to hide right now. A hide
    /// requested mid-transition is parked instead.
    fn base_hide<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
    ) -> Option<TransitionStart> {
        let instance = self.instances.get_mut(&id)?;
        let visibility = instance.visibility;
        match visibility {
            Visibility::Hidden => None,
            Visibility::Showing | Visibility::Hiding => {
                instance.pending = Some(PendingAction::Hide);
                None
            }
            Visibility::Shown => {
                instance.visibility = Visibility::Hiding;
                let element = instance.element;
                let transition = match instance.outcome {
                    Some(outcome) if !instance.keyboard_adjusted => {
                        Transition::Popup(outcome.animation)
                    }
                    _ => Transition::Fade,
                };
                self.notify(host, id, LifecycleEvent::BeforeHide);
                Some(host.begin_hide(element, transition))
            }
        }
    }

    /// Collapse `id` out of the cascade, hide it, and hand focus back.
    fn hide_internal<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        // The collapse pops `id` last and hides it on the way out.
        if !self.cascade.is_locked() && self.cascade.contains(id) {
            self.collapse(host, id);
            return;
        }

        let Some(start) = self.base_hide(host, id) else {
            return;
        };
        let Some(instance) = self.instances.get(&id) else {
            return;
        };
        let element = instance.element;
        let keyboard_invoked = instance.keyboard_invoked;

        if let (Some(previous), Some(active)) = (instance.previous_focus, host.active_element()) {
            let focus_inside = host.contains(element, active) || host.is_dismiss_surface(active);
            if focus_inside && !host.is_hidden_companion(previous) {
                let style = if keyboard_invoked {
                    FocusStyle::Visible
                } else {
                    FocusStyle::Quiet
                };
                self.move_focus(host, |host| host.focus(previous, style));
            }
        }

        if let Some(instance) = self.instances.get_mut(&id) {
            instance.previous_focus = None;
        }
        if !self.any_visible() {
            host.hide_dismiss_surface();
        }
        tracing::info!(message = "flyout.hide", flyout = %id, keyboard_invoked);

        if start == TransitionStart::Skipped {
            self.complete_hide(host, id);
        }
    }

    fn complete_show<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        let keyboard_visible = host.viewport().keyboard_visible;
        let Some(instance) = self.instances.get_mut(&id) else {
            return;
        };
        if instance.visibility != Visibility::Showing {
            return;
        }
        instance.visibility = Visibility::Shown;
        instance.keyboard_was_up = keyboard_visible;
        self.notify(host, id, LifecycleEvent::AfterShow);
        self.check_do_next(host, id);
    }

    fn complete_hide<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        let Some(instance) = self.instances.get_mut(&id) else {
            return;
        };
        if instance.visibility != Visibility::Hiding {
            return;
        }
        instance.visibility = Visibility::Hidden;
        self.notify(host, id, LifecycleEvent::AfterHide);
        self.check_do_next(host, id);
    }

    /// Consume the pending action, if the flyout is settled.
    fn check_do_next<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        let Some(instance) = self.instances.get_mut(&id) else {
            return;
        };
        if instance.visibility.is_animating() {
            return;
        }
        match instance.pending.take() {
            Some(PendingAction::Show) => {
                let Some(recipe) = instance.recipe else {
                    return;
                };
                if let Err(err) = self.begin_show(host, id, recipe) {
                    tracing::warn!(message = "flyout.deferred", flyout = %id, error = %err);
                }
            }
            Some(PendingAction::Hide) => self.hide_internal(host, id),
            None => {}
        }
    }

    fn notify<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId, event: LifecycleEvent) {
        for command in host.notify(id, event) {
            if let Err(err) = self.run_command(host, command) {
                tracing::warn!(message = "flyout.command", flyout = %id, event = ?event, error = %err);
            }
        }
    }

    fn run_command<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        command: FlyoutCommand,
    ) -> Result<(), FlyoutError> {
        match command {
            FlyoutCommand::Show(id, options) => self.show(host, id, options),
            FlyoutCommand::ShowAt(id, point) => self.show_at(host, id, point),
            FlyoutCommand::Hide(id) => self.hide(host, id),
        }
    }

    fn focus_into<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, element: ElementId, menu: bool) {
        if menu {
            self.move_focus(host, |host| host.focus(element, FocusStyle::Quiet));
        } else {
            self.move_focus(host, |host| host.focus_first_in(element));
        }
    }

    /// Run a focus move and route the resulting focus change.
    fn move_focus<H, F>(&mut self, host: &mut H, mv: F)
    where
        H: FlyoutHost + ?Sized,
        F: FnOnce(&mut H),
    {
        let before = host.active_element();
        mv(host);
        let after = host.active_element();
        if before != after {
            self.handle_focus_change(host, FocusChange::new(before, after));
        }
    }
}

fn check_placement(placement: PlacementMode) -> Result<(), FlyoutError> {
    if placement.is_assignable() {
        Ok(())
    } else {
        Err(FlyoutError::InvalidPlacement(placement.as_str().to_owned()))
    }
}

fn check_alignment(alignment: Alignment) -> Result<(), FlyoutError> {
    if alignment.is_assignable() {
        Ok(())
    } else {
        Err(FlyoutError::InvalidAlignment(alignment.as_str().to_owned()))
    }
}

fn resolve_anchor<H: ElementTree + ?Sized>(host: &H, anchor: &AnchorRef) -> Option<ElementId> {
    match anchor {
        AnchorRef::Element(element) => Some(*element),
        AnchorRef::Id(id) => host.element_by_id(id),
    }
}

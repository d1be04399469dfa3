#![forbid(unsafe_code)]

//! Live reflow when the on-screen keyboard appears or disappears.

use flyout_layout::{ResolvedPosition, check_keyboard_fit};
use web_time::Instant;

use super::FlyoutManager;
use super::deferred::Deferred;
use crate::cascade::FlyoutId;
use crate::host::{FlyoutHost, Transition};

impl FlyoutManager {
    /// The keyboard is sliding in. Flyouts it pushes out of the way vanish
    /// now and fade back in at their new spot once the keyboard has settled.
    pub fn keyboard_showing<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, now: Instant) {
        let viewport = host.viewport();
        let due = now + viewport.keyboard_show_duration;

        for instance in self.instances.values_mut() {
            if instance.is_hidden() {
                continue;
            }
            let Some(outcome) = instance.outcome.as_mut() else {
                continue;
            };
            let moved = check_keyboard_fit(outcome, &viewport);
            instance.keyboard_adjusted = moved;
            if moved {
                host.set_opacity(instance.element, 0.0);
                self.deferred
                    .push_at(due, Deferred::AdjustForKeyboard(instance.id));
                tracing::debug!(
                    message = "flyout.keyboard_reflow",
                    flyout = %instance.id,
                    phase = "showing"
                );
            }
        }
    }

    /// The keyboard is going away. If the layout viewport resizes with it,
    /// wait for [`resized`](Self::resized); otherwise reposition next turn.
    pub fn keyboard_hiding<H: FlyoutHost + ?Sized>(&mut self, host: &mut H) {
        let resizes = host.viewport().keyboard_resizes_layout;

        for instance in self.instances.values_mut() {
            if instance.is_hidden() && !instance.visibility.is_animating() {
                continue;
            }
            if resizes {
                instance.needs_keyboard_hide_reflow = true;
            } else {
                self.deferred.push_ready(Deferred::Reposition(instance.id));
            }
            tracing::debug!(
                message = "flyout.keyboard_reflow",
                flyout = %instance.id,
                phase = "hiding",
                resizes
            );
        }
    }

    /// The layout viewport changed size.
    pub fn resized<H: FlyoutHost + ?Sized>(&mut self, _host: &mut H) {
        for instance in self.instances.values_mut() {
            if instance.is_hidden() && !instance.visibility.is_animating() {
                continue;
            }
            if instance.needs_keyboard_hide_reflow {
                instance.needs_keyboard_hide_reflow = false;
                self.deferred.push_ready(Deferred::Reposition(instance.id));
            }
        }
    }

    pub(super) fn adjust_for_keyboard<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        let viewport = host.viewport();
        let Some(instance) = self.instances.get(&id) else {
            return;
        };
        let element = instance.element;
        host.set_opacity(element, 1.0);
        if instance.is_hidden() {
            return;
        }
        let Some(outcome) = instance.outcome else {
            return;
        };
        host.apply_position(element, &ResolvedPosition::from_outcome(&outcome, &viewport));
        host.play_show_transition(element, Transition::Fade);
    }

    /// Full placement pass, skipped if the flyout closed in the meantime.
    pub(super) fn reposition<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        let Some(instance) = self.instances.get(&id) else {
            return;
        };
        if instance.is_hidden() && !instance.visibility.is_animating() {
            return;
        }
        let Some(recipe) = instance.recipe else {
            return;
        };
        match self.compute_placement(&*host, id, &recipe) {
            Ok(outcome) => {
                self.apply_placement(host, id, outcome);
            }
            Err(err) => {
                tracing::warn!(message = "flyout.keyboard_reflow", flyout = %id, error = %err);
            }
        }
    }
}

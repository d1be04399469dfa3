#![forbid(unsafe_code)]

//! Cascade maintenance: append, collapse, and the focus and key routing that
//! drives it.

use flyout_core::element::ElementId;
use flyout_core::event::{FocusChange, KeyCode, KeyInput};

use super::FlyoutManager;
use super::deferred::Deferred;
use crate::cascade::FlyoutId;
use crate::error::{CascadeViolation, FlyoutError};
use crate::host::FlyoutHost;

impl FlyoutManager {
    /// Index of the cascade entry whose element contains `node`, root first.
    pub fn index_of_element<H: FlyoutHost + ?Sized>(
        &self,
        host: &H,
        node: ElementId,
    ) -> Option<usize> {
        self.cascade.position(|id| {
            self.instances
                .get(&id)
                .is_some_and(|instance| host.contains(instance.element, node))
        })
    }

    /// Close the whole cascade. `keyboard_invoked` selects a visible focus
    /// indicator where focus is restored.
    pub fn collapse_all<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, keyboard_invoked: bool) {
        let Some(root) = self.cascade.get(0) else {
            return;
        };
        if let Some(instance) = self.instances.get_mut(&root) {
            instance.keyboard_invoked = keyboard_invoked;
        }
        self.collapse(host, root);
    }

    /// Pop `id` and every entry above it, hiding each, tail first.
    ///
    /// No-op when `id` is not in the cascade or a collapse is already running.
    pub(super) fn collapse<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        if self.cascade.is_locked() || !self.cascade.contains(id) {
            return;
        }
        self.cascade.lock();
        tracing::debug!(message = "cascade.collapse", flyout = %id, depth = self.cascade.len());

        while let Some(popped) = self.cascade.pop() {
            self.hide_internal(host, popped);
            if popped == id {
                break;
            }
        }

        for waiter in self.cascade.unlock() {
            self.deferred.push_ready(Deferred::CheckDoNext(waiter));
        }
    }

    /// Push `id`, first collapsing every branch it is not nested in.
    pub(super) fn append<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        id: FlyoutId,
    ) -> Result<(), FlyoutError> {
        if self.cascade.is_locked() {
            return Err(self.violation(CascadeViolation::AppendWhileLocked(id)));
        }
        if self.cascade.contains(id) {
            return Err(self.violation(CascadeViolation::AlreadyInCascade(id)));
        }

        let anchor = self
            .instances
            .get(&id)
            .and_then(|instance| instance.recipe)
            .and_then(|recipe| recipe.anchor());
        match anchor.and_then(|anchor| self.index_of_element(&*host, anchor)) {
            Some(parent) => {
                if let Some(child) = self.cascade.get(parent + 1) {
                    self.collapse(host, child);
                }
            }
            None => self.collapse_all(host, false),
        }

        self.cascade.push(id).map_err(|v| self.violation(v))?;
        tracing::debug!(message = "cascade.append", flyout = %id, depth = self.cascade.len());
        Ok(())
    }

    fn violation(&self, violation: CascadeViolation) -> FlyoutError {
        tracing::error!(
            message = "cascade.append",
            error = %violation,
            locked = self.cascade.is_locked(),
            depth = self.cascade.len()
        );
        FlyoutError::Reentrancy(violation)
    }

    /// Route a focus move. Call for every focus change the host observes;
    /// changes the manager causes itself are routed internally.
    pub fn handle_focus_change<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, change: FocusChange) {
        let FocusChange { from, to } = change;
        let crosses = |manager: &Self, host: &H, inside: ElementId, other: Option<ElementId>| {
            manager.instances.values().any(|instance| {
                host.contains(instance.element, inside)
                    && !other.is_some_and(|other| host.contains(instance.element, other))
            })
        };

        // Focus left a flyout for somewhere outside the cascade.
        if let Some(from) = from {
            if crosses(&*self, &*host, from, to) {
                let outside = match to {
                    Some(to) => self.index_of_element(&*host, to).is_none(),
                    None => true,
                };
                if outside {
                    self.collapse_all(host, false);
                }
            }
        }

        // Focus entered a flyout: prune everything cascading beyond it.
        if let Some(to) = to {
            if crosses(&*self, &*host, to, from) {
                if let Some(index) = self.index_of_element(&*host, to) {
                    if let Some(child) = self.cascade.get(index + 1) {
                        self.collapse(host, child);
                    }
                }
            }
        }
    }

    /// Route a key press. Returns `true` when the key was consumed.
    ///
    /// - Escape inside a flyout hides it.
    /// - Space or Enter on the focused flyout element hides it.
    /// - Shift+Tab on the focused flyout element wraps to its last focusable.
    /// - The back arrow (Left, or Right in RTL) inside a nested entry closes
    ///   that entry and its descendants.
    /// - Alt or F10 closes the whole cascade without consuming the key.
    pub fn handle_key_down<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, key: KeyInput) -> bool {
        if let Some(owner) = self.owner_of(&*host, key.target) {
            if self.handle_flyout_key(host, owner, key) {
                return true;
            }
        }
        self.handle_cascade_key(host, key)
    }

    fn handle_flyout_key<H: FlyoutHost + ?Sized>(
        &mut self,
        host: &mut H,
        owner: FlyoutId,
        key: KeyInput,
    ) -> bool {
        let Some(element) = self.instances.get(&owner).map(|instance| instance.element) else {
            return false;
        };
        let on_element = key.target == element && host.active_element() == Some(element);

        match key.code {
            KeyCode::Escape => {
                self.keyboard_hide(host, owner);
                true
            }
            // A plain hide: focus comes back without an indicator.
            KeyCode::Space | KeyCode::Enter if on_element => self.hide(host, owner).is_ok(),
            KeyCode::Tab if on_element && key.is_shift_only() => {
                self.move_focus(host, |host| host.focus_last_in(element));
                true
            }
            _ => false,
        }
    }

    fn handle_cascade_key<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, key: KeyInput) -> bool {
        let Some(index) = self.index_of_element(&*host, key.target) else {
            return false;
        };
        let back = if host.is_rtl(key.target) {
            KeyCode::Right
        } else {
            KeyCode::Left
        };

        match key.code {
            code if code == back => {
                if index == 0 {
                    return false;
                }
                let Some(entry) = self.cascade.get(index) else {
                    return false;
                };
                if let Some(instance) = self.instances.get_mut(&entry) {
                    instance.keyboard_invoked = true;
                }
                self.collapse(host, entry);
                true
            }
            KeyCode::Alt | KeyCode::F(10) => {
                self.collapse_all(host, true);
                false
            }
            _ => false,
        }
    }

    fn keyboard_hide<H: FlyoutHost + ?Sized>(&mut self, host: &mut H, id: FlyoutId) {
        if let Some(instance) = self.instances.get_mut(&id) {
            instance.keyboard_invoked = true;
        }
        self.hide_internal(host, id);
    }

    /// The flyout a key event belongs to: the deepest cascade entry containing
    /// `target`, else any visible flyout containing it.
    fn owner_of<H: FlyoutHost + ?Sized>(&self, host: &H, target: ElementId) -> Option<FlyoutId> {
        self.cascade
            .entries()
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.instances
                    .get(id)
                    .is_some_and(|instance| host.contains(instance.element, target))
            })
            .or_else(|| {
                self.instances
                    .values()
                    .find(|instance| !instance.is_hidden() && host.contains(instance.element, target))
                    .map(|instance| instance.id)
            })
    }
}

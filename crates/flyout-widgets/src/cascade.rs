#![forbid(unsafe_code)]

//! Cascade stack: the ordered chain of open flyouts.
//!
//! Index 0 is the root of the current cascade; each later entry is anchored
//! inside the element of the entry before it. The stack itself only knows
//! identities. Collapsing (which hides entries) is driven by
//! [`FlyoutManager`](crate::flyout::FlyoutManager), which holds the lock while
//! it pops.
//!
//! # Invariants
//!
//! 1. No id appears twice.
//! 2. `locked` is true only while a collapse is executing, and is cleared
//!    before any unlock waiter runs.
//! 3. Nothing is pushed while `locked`.
//! 4. Collapse removes a suffix of the stack, last in first out.

use std::fmt;

use crate::error::CascadeViolation;

/// Identity of a flyout instance owned by a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlyoutId(u32);

impl FlyoutId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for FlyoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flyout-{}", self.0)
    }
}

/// Ordered open flyouts plus the collapse reentrancy guard.
#[derive(Debug, Default)]
pub struct CascadeStack {
    entries: Vec<FlyoutId>,
    locked: bool,
    /// Flyouts waiting for the lock to release; drained on unlock.
    unlock_waiters: Vec<FlyoutId>,
}

impl CascadeStack {
    /// Empty, unlocked stack.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Entries, root first.
    pub fn entries(&self) -> &[FlyoutId] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<FlyoutId> {
        self.entries.get(index).copied()
    }

    pub fn index_of(&self, id: FlyoutId) -> Option<usize> {
        self.entries.iter().position(|&entry| entry == id)
    }

    pub fn contains(&self, id: FlyoutId) -> bool {
        self.index_of(id).is_some()
    }

    /// Index of the first entry matching `owns`, root first.
    pub fn position(&self, mut owns: impl FnMut(FlyoutId) -> bool) -> Option<usize> {
        self.entries.iter().position(|&entry| owns(entry))
    }

    /// Push `id` at the tail.
    pub fn push(&mut self, id: FlyoutId) -> Result<(), CascadeViolation> {
        if self.locked {
            return Err(CascadeViolation::AppendWhileLocked(id));
        }
        if self.contains(id) {
            return Err(CascadeViolation::AlreadyInCascade(id));
        }
        self.entries.push(id);
        Ok(())
    }

    /// Acquire the collapse lock. Returns `false` if it is already held.
    pub fn lock(&mut self) -> bool {
        if self.locked {
            return false;
        }
        self.locked = true;
        true
    }

    /// Pop the tail entry.
    pub fn pop(&mut self) -> Option<FlyoutId> {
        self.entries.pop()
    }

    /// Release the lock and hand back everyone waiting on it. The guard is
    /// already clear when the caller runs the waiters.
    pub fn unlock(&mut self) -> Vec<FlyoutId> {
        self.locked = false;
        std::mem::take(&mut self.unlock_waiters)
    }

    /// Register `id` to be retried once the current collapse finishes.
    pub fn wait_for_unlock(&mut self, id: FlyoutId) {
        if !self.unlock_waiters.contains(&id) {
            self.unlock_waiters.push(id);
        }
    }

    /// Ids currently waiting for unlock.
    pub fn unlock_waiters(&self) -> &[FlyoutId] {
        &self.unlock_waiters
    }

    /// Forget `id` entirely (used when a flyout is disposed).
    pub(crate) fn forget(&mut self, id: FlyoutId) {
        self.entries.retain(|&entry| entry != id);
        self.unlock_waiters.retain(|&waiter| waiter != id);
    }
}

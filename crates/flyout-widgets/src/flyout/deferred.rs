#![forbid(unsafe_code)]

//! Work postponed to a later event-loop turn.
//!
//! Two lanes: `ready` tasks run on the next [`FlyoutManager::run_deferred`]
//! call, timed tasks once their deadline has passed. Tasks queued while a
//! batch runs wait for the following call.
//!
//! [`FlyoutManager::run_deferred`]: super::FlyoutManager::run_deferred

use std::collections::VecDeque;

use web_time::Instant;

use crate::cascade::FlyoutId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// Replay a pending action once the cascade unlocked.
    CheckDoNext(FlyoutId),
    /// Apply a keyboard-adjusted placement and fade back in.
    AdjustForKeyboard(FlyoutId),
    /// Recompute the full placement.
    Reposition(FlyoutId),
}

impl Deferred {
    pub(crate) const fn flyout(self) -> FlyoutId {
        match self {
            Self::CheckDoNext(id) | Self::AdjustForKeyboard(id) | Self::Reposition(id) => id,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct DeferredQueue {
    ready: VecDeque<Deferred>,
    /// Sorted by deadline; ties keep insertion order.
    timed: Vec<(Instant, Deferred)>,
}

impl DeferredQueue {
    pub(crate) fn push_ready(&mut self, task: Deferred) {
        self.ready.push_back(task);
    }

    pub(crate) fn push_at(&mut self, due: Instant, task: Deferred) {
        let index = self.timed.partition_point(|(at, _)| *at <= due);
        self.timed.insert(index, (due, task));
    }

    /// Everything runnable at `now`: ready tasks first, then expired timers
    /// in deadline order.
    pub(crate) fn take_due(&mut self, now: Instant) -> Vec<Deferred> {
        let mut due: Vec<Deferred> = self.ready.drain(..).collect();
        let expired = self.timed.partition_point(|(at, _)| *at <= now);
        due.extend(self.timed.drain(..expired).map(|(_, task)| task));
        due
    }

    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        if self.ready.is_empty() {
            self.timed.first().map(|(at, _)| *at)
        } else {
            None
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.ready.is_empty() && self.timed.is_empty()
    }

    pub(crate) fn forget(&mut self, id: FlyoutId) {
        self.ready.retain(|task| task.flyout() != id);
        self.timed.retain(|(_, task)| task.flyout() != id);
    }
}

//! Pass triggering and last-triggered-wins commits.
//!
//! Every trigger issues a strictly increasing generation. A finished pass is
//! only committed when its generation is still the latest one issued; older
//! passes are left to finish and their results are dropped.

use std::collections::BTreeSet;

use super::update::{DashboardSnapshot, UpdateFilter};
use crate::domain::GroopId;

/// Tracks the joined-groop key and the generations issued for it.
#[derive(Debug, Clone, Default)]
pub struct UpdateWatcher {
    /// Joined ids seen by the last observation, `None` before the first one.
    key: Option<BTreeSet<GroopId>>,
    issued: u64,
    committed: u64,
}

impl UpdateWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares `joined` with the previously observed key.
    ///
    /// Returns a fresh generation when the set changed (including the very
    /// first observation) and `None` when it is unchanged. Order is ignored.
    pub fn observe_joined<I>(&mut self, joined: I) -> Option<u64>
    where
        I: IntoIterator<Item = GroopId>,
    {
        let key: BTreeSet<GroopId> = joined.into_iter().collect();
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.key = Some(key);
        Some(self.issue())
    }

    /// Issues a generation unconditionally.
    pub fn refresh(&mut self) -> u64 {
        self.issue()
    }

    fn issue(&mut self) -> u64 {
        self.issued += 1;
        tracing::debug!(generation = self.issued, "dashboard pass issued");
        self.issued
    }

    /// Latest generation issued so far, zero before any trigger.
    #[must_use]
    pub const fn latest(&self) -> u64 {
        self.issued
    }

    /// Whether a pass finished with `generation` may be published.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.issued
    }

    /// Marks `generation` committed if it is still current.
    pub fn commit(&mut self, generation: u64) -> bool {
        if !self.is_current(generation) {
            tracing::debug!(
                generation = generation,
                latest = self.issued,
                "dropping superseded dashboard pass"
            );
            return false;
        }
        self.committed = generation;
        true
    }

    /// True from a trigger until the latest pass commits.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.committed < self.issued
    }
}

/// Dashboard slice of the application state.
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub watcher: UpdateWatcher,
    pub snapshot: DashboardSnapshot,
    pub filter: UpdateFilter,
}

impl DashboardState {
    /// Publishes `snapshot` when `generation` is the latest; returns whether it did.
    pub fn commit(&mut self, generation: u64, snapshot: DashboardSnapshot) -> bool {
        if self.watcher.commit(generation) {
            self.snapshot = snapshot;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.watcher.is_loading()
    }
}

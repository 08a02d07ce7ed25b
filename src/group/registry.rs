//! Action group registry: group name to container, created lazily.
//!
//! One mutex guards every container, so a check and the mutation that follows it
//! always happen under the same lock. Closures passed to the `with_*` helpers run
//! while the lock is held and must not call back into the registry.

use crate::error::ActionGroupError;
use crate::group::container::{ActionGroupContainer, ActionGroupState};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

/// Serializable view of one action group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSnapshot {
    pub name: String,
    pub state: ActionGroupState,
    pub holders: Vec<String>,
    pub suppressor: Option<String>,
}

impl From<&ActionGroupContainer> for GroupSnapshot {
    fn from(container: &ActionGroupContainer) -> Self {
        Self {
            name: container.name().to_string(),
            state: container.state(),
            holders: container.holders().iter().map(|h| h.name.clone()).collect(),
            suppressor: container.suppressor().map(|s| s.name.clone()),
        }
    }
}

/// Process-wide mapping from group name to its container
#[derive(Debug, Default)]
pub struct ActionGroupRegistry {
    groups: Mutex<HashMap<String, ActionGroupContainer>>,
}

impl ActionGroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `Locked` on the first queried group that is currently locked.
    ///
    /// Suppressed and free groups pass, as do names never seen before.
    pub fn query_group<I, S>(&self, groups: I) -> Result<(), ActionGroupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let map = self.groups.lock();
        for group in groups {
            if let Some(container) = map.get(group.as_ref()) {
                if container.is_locked() {
                    return Err(container.locked_error());
                }
            }
        }
        Ok(())
    }

    /// State of a group; `Free` for names never seen before
    pub fn query_group_state(&self, group: &str) -> ActionGroupState {
        self.groups
            .lock()
            .get(group)
            .map(|c| c.state())
            .unwrap_or(ActionGroupState::Free)
    }

    /// Check whether a container exists for `group`
    pub fn contains(&self, group: &str) -> bool {
        self.groups.lock().contains_key(group)
    }

    /// Copy of a group's container, if it exists
    pub fn get(&self, group: &str) -> Option<ActionGroupContainer> {
        self.groups.lock().get(group).cloned()
    }

    /// Snapshot of every known group, sorted by name
    pub fn snapshot(&self) -> Vec<GroupSnapshot> {
        let mut groups: Vec<GroupSnapshot> =
            self.groups.lock().values().map(GroupSnapshot::from).collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name));
        groups
    }

    /// Fail with `Suppressed` if any existing group among `groups` is suppressed
    pub(crate) fn ensure_unsuppressed<S: AsRef<str>>(
        &self,
        groups: &[S],
    ) -> Result<(), ActionGroupError> {
        let map = self.groups.lock();
        for group in groups {
            if let Some(container) = map.get(group.as_ref()) {
                if let Some(suppressor) = container.suppressor() {
                    return Err(ActionGroupError::Suppressed {
                        group: container.name().to_string(),
                        suppressor: suppressor.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Run `f` on the container for `group`, creating it first if needed
    pub(crate) fn with_container<R>(
        &self,
        group: &str,
        f: impl FnOnce(&mut ActionGroupContainer) -> R,
    ) -> R {
        let mut map = self.groups.lock();
        let container = map
            .entry(group.to_string())
            .or_insert_with(|| ActionGroupContainer::new(group));
        f(container)
    }

    /// Run `f` on the container for `group` only if it already exists
    pub(crate) fn with_existing<R>(
        &self,
        group: &str,
        f: impl FnOnce(&mut ActionGroupContainer) -> R,
    ) -> Option<R> {
        self.groups.lock().get_mut(group).map(f)
    }
}

//! Per-group runtime record: ordered holders plus at most one suppressor.

use crate::context::identity::{ContextId, ContextRef};
use crate::error::{ActionGroupError, LockHolders};
use serde::{Deserialize, Serialize};

/// Current state of an action group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionGroupState {
    /// No holders and no suppressor
    Free,
    /// Lock temporarily waived by a suppressor (takes priority over Locked)
    Suppressed,
    /// Held by one or more contexts
    Locked,
}

/// Runtime record of one action group
///
/// Holding and suppression are tracked independently; `state()` collapses them
/// with Suppressed taking priority over Locked.
#[derive(Debug, Clone)]
pub struct ActionGroupContainer {
    name: String,
    holders: Vec<ContextRef>,
    suppressor: Option<ContextRef>,
}

impl ActionGroupContainer {
    /// Create an empty (free) container
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            holders: Vec::new(),
            suppressor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ActionGroupState {
        if self.is_suppressed() {
            ActionGroupState::Suppressed
        } else if !self.holders.is_empty() {
            ActionGroupState::Locked
        } else {
            ActionGroupState::Free
        }
    }

    pub fn is_locked(&self) -> bool {
        self.state() == ActionGroupState::Locked
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressor.is_some()
    }

    pub fn is_suppressor(&self, id: ContextId) -> bool {
        self.suppressor.as_ref().map(|s| s.id == id).unwrap_or(false)
    }

    pub fn is_holder(&self, id: ContextId) -> bool {
        self.holders.iter().any(|h| h.id == id)
    }

    /// True if the context holds or suppresses this group
    pub fn has_registered(&self, id: ContextId) -> bool {
        self.is_holder(id) || self.is_suppressor(id)
    }

    /// Holders in acquisition order
    pub fn holders(&self) -> &[ContextRef] {
        &self.holders
    }

    pub fn holder_count(&self) -> usize {
        self.holders.len()
    }

    pub fn suppressor(&self) -> Option<&ContextRef> {
        self.suppressor.as_ref()
    }

    /// Waive the lock of this group under `context`'s identity.
    ///
    /// Leaves the holder set untouched; the suppressor may still hold the lock.
    pub fn suppress(&mut self, context: &ContextRef) -> Result<(), ActionGroupError> {
        if self.is_suppressed() {
            return Err(ActionGroupError::AlreadySuppressed {
                group: self.name.clone(),
            });
        }
        self.suppressor = Some(context.clone());
        Ok(())
    }

    /// End a suppression. Only the suppressor can do this.
    pub fn relock(&mut self, id: ContextId) -> Result<(), ActionGroupError> {
        if !self.is_suppressed() {
            return Err(ActionGroupError::NotSuppressed {
                group: self.name.clone(),
            });
        }
        if !self.is_suppressor(id) {
            return Err(ActionGroupError::SuppressorRequired {
                group: self.name.clone(),
            });
        }
        self.suppressor = None;
        Ok(())
    }

    /// Acquire the lock for `context`
    pub fn add(&mut self, context: &ContextRef) -> Result<(), ActionGroupError> {
        if let Some(suppressor) = &self.suppressor {
            if suppressor.id != context.id {
                return Err(ActionGroupError::Suppressed {
                    group: self.name.clone(),
                    suppressor: suppressor.name.clone(),
                });
            }
        }
        if self.is_holder(context.id) {
            return Err(ActionGroupError::AlreadyLocked {
                group: self.name.clone(),
            });
        }
        self.holders.push(context.clone());
        Ok(())
    }

    /// Release everything `id` has on this group. Idempotent.
    pub fn remove(&mut self, id: ContextId) {
        if self.is_suppressor(id) {
            self.suppressor = None;
        }
        self.holders.retain(|h| h.id != id);
    }

    /// Error describing who keeps this group locked
    pub(crate) fn locked_error(&self) -> ActionGroupError {
        let holders = match self.holders.as_slice() {
            [single] => LockHolders::Single(single.name.clone()),
            many => LockHolders::Many(many.len()),
        };
        ActionGroupError::Locked {
            group: self.name.clone(),
            holders,
        }
    }
}

//! Session: the process-scoped state shared by every context.
//!
//! Holds the context registry, the action-group registry and the application
//! state guarded by global action groups. Sessions are handed out as `Arc`s;
//! independent sessions never see each other's contexts or groups.

use crate::application::{detect_interaction_interface, InteractInterface};
use crate::config::SessionConfig;
use crate::context::registry::{ContextEntry, ContextRegistry};
use crate::error::ActionGroupError;
use crate::group::{action_group, ActionGroupRegistry, ActionGroupState, ActionScope, GroupSnapshot};
use crate::status::{EmptyStatusProvider, StatusIdentifier, StatusProvider};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub interface: InteractInterface,
    pub contexts: Vec<ContextEntry>,
    pub groups: Vec<GroupSnapshot>,
}

/// Shared registries and application state
pub struct Session {
    contexts: ContextRegistry,
    groups: ActionGroupRegistry,
    interface: RwLock<InteractInterface>,
    status: RwLock<Arc<dyn StatusProvider>>,
    config: SessionConfig,
}

impl Session {
    /// Create a session with the default configuration
    pub fn new() -> Arc<Self> {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session from a loaded configuration
    pub fn with_config(config: SessionConfig) -> Arc<Self> {
        let interface = config
            .application
            .interface
            .unwrap_or_else(detect_interaction_interface);

        Arc::new(Self {
            contexts: ContextRegistry::new(),
            groups: ActionGroupRegistry::new(),
            interface: RwLock::new(interface),
            status: RwLock::new(Arc::new(EmptyStatusProvider)),
            config,
        })
    }

    pub fn contexts(&self) -> &ContextRegistry {
        &self.contexts
    }

    pub fn groups(&self) -> &ActionGroupRegistry {
        &self.groups
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Fail if any of `groups` is currently locked
    pub fn query_group<I, S>(&self, groups: I) -> Result<(), ActionGroupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.groups.query_group(groups)
    }

    pub fn query_group_state(&self, group: &str) -> ActionGroupState {
        self.groups.query_group_state(group)
    }

    /// Current interaction interface
    pub fn interface(&self) -> InteractInterface {
        *self.interface.read()
    }

    /// Change the interaction interface.
    ///
    /// Action group: `global.interface`
    pub fn set_interface(&self, interface: InteractInterface) -> Result<(), ActionGroupError> {
        self.groups
            .query_group([action_group(ActionScope::Global, "interface", &[])])?;
        *self.interface.write() = interface;
        debug!(interface = ?interface, "Interaction interface changed");
        Ok(())
    }

    /// Current status provider
    pub fn status_provider(&self) -> Arc<dyn StatusProvider> {
        self.status.read().clone()
    }

    /// Replace the status provider. The previous provider is cleared first.
    ///
    /// Action group: `global.status`
    pub fn set_status_provider(
        &self,
        provider: Arc<dyn StatusProvider>,
    ) -> Result<(), ActionGroupError> {
        self.groups
            .query_group([action_group(ActionScope::Global, "status", &[])])?;
        let previous = std::mem::replace(&mut *self.status.write(), provider);
        previous.clear();
        Ok(())
    }

    /// Restore the empty status provider.
    ///
    /// Action group: `global.status`
    pub fn reset_status_provider(&self) -> Result<(), ActionGroupError> {
        self.set_status_provider(Arc::new(EmptyStatusProvider))
    }

    /// Write a status message through the current provider
    pub fn write_status(&self, message: &str) -> StatusIdentifier {
        self.status_provider().write(message)
    }

    /// Clear one status message, or all of them when no valid identifier is given
    pub fn clear_status(&self, identifier: Option<StatusIdentifier>) {
        let provider = self.status_provider();
        match identifier {
            Some(id) if id.is_valid() => provider.clear_status(id),
            _ => provider.clear(),
        }
    }

    /// Snapshot of registered contexts and known groups
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            interface: self.interface(),
            contexts: self.contexts.list_all(),
            groups: self.groups.snapshot(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("contexts", &self.contexts)
            .field("groups", &self.groups)
            .field("interface", &self.interface())
            .field("config", &self.config)
            .finish()
    }
}

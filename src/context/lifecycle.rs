//! Context lifecycle: initialization, group control and disposal.
//!
//! A `Context` pairs a behavior with its `ContextCore`. The core is the only
//! actor that mutates action-group containers, and it remembers every group it
//! holds or suppresses so that disposal, or a failed initialization, can release
//! all of them.

use crate::context::behavior::ContextBehavior;
use crate::context::identity::{context_name, ContextId, ContextRef};
use crate::context::registry::ContextEntry;
use crate::error::{ActionGroupError, ContextError};
use crate::group::{action_group, validate_group_name, ActionScope};
use crate::session::Session;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default groups of a context type: `application.context.<name>`
pub fn default_groups(name: &str) -> Vec<String> {
    vec![action_group(ActionScope::Application, "context", &[name])]
}

fn merge_unique(first: &[String], second: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for group in first.iter().chain(second) {
        if !merged.contains(group) {
            merged.push(group.clone());
        }
    }
    merged
}

enum LockOutcome {
    Acquired,
    Relocked { still_holding: bool },
}

/// Lifecycle state and group bookkeeping of one context instance
#[derive(Debug)]
pub struct ContextCore {
    session: Arc<Session>,
    me: ContextRef,
    groups: Vec<String>,
    neutral_groups: Vec<String>,
    allowed_groups: Vec<String>,
    owned_groups: Vec<String>,
    affected_groups: Vec<String>,
    running: bool,
    disposing: bool,
    disposed: bool,
}

impl ContextCore {
    fn new(
        session: Arc<Session>,
        name: String,
        groups: Vec<String>,
        neutral_groups: Vec<String>,
    ) -> Self {
        let allowed_groups = merge_unique(&groups, &neutral_groups);
        let owned_groups = merge_unique(&groups, &default_groups(&name));

        Self {
            session,
            me: ContextRef::new(ContextId::next(), name),
            groups,
            neutral_groups,
            allowed_groups,
            owned_groups,
            affected_groups: Vec::new(),
            running: false,
            disposing: false,
            disposed: false,
        }
    }

    pub fn id(&self) -> ContextId {
        self.me.id
    }

    /// Name identifier of this context: its behavior type name
    pub fn name(&self) -> &str {
        &self.me.name
    }

    pub fn context_ref(&self) -> &ContextRef {
        &self.me
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Whether this instance is the globally registered one
    pub fn is_global(&self) -> bool {
        self.session.contexts().is_registered(self.me.id)
    }

    /// True between a successful create hook and disposal
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_disposing(&self) -> bool {
        self.disposing
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn neutral_groups(&self) -> &[String] {
        &self.neutral_groups
    }

    /// Groups plus neutral groups
    pub fn allowed_groups(&self) -> &[String] {
        &self.allowed_groups
    }

    /// Groups plus the default group
    pub fn owned_groups(&self) -> &[String] {
        &self.owned_groups
    }

    pub fn default_groups(&self) -> Vec<String> {
        default_groups(&self.me.name)
    }

    /// Groups this context currently holds or suppresses
    pub fn affected_groups(&self) -> &[String] {
        &self.affected_groups
    }

    /// Lock an allowed group. If this context suppresses it, the suppression ends
    /// instead and no hold is added.
    pub fn lock_group(&mut self, group: &str) -> Result<(), ActionGroupError> {
        self.check_access(group)?;

        let me = &self.me;
        let outcome = self.session.groups().with_container(
            group,
            |container| -> Result<LockOutcome, ActionGroupError> {
                if container.is_suppressor(me.id) {
                    container.relock(me.id)?;
                    Ok(LockOutcome::Relocked {
                        still_holding: container.is_holder(me.id),
                    })
                } else {
                    container.add(me).map(|_| LockOutcome::Acquired)
                }
            },
        )?;

        match outcome {
            LockOutcome::Acquired => {
                self.remember(group);
                debug!(context = %self.me.name, group, "Action group locked");
            }
            LockOutcome::Relocked { still_holding } => {
                if !still_holding {
                    self.forget(group);
                }
                debug!(context = %self.me.name, group, "Action group relocked");
            }
        }
        Ok(())
    }

    /// Suppress the lock of an allowed group until this context relocks it or is disposed
    pub fn suppress_lock(&mut self, group: &str) -> Result<(), ActionGroupError> {
        self.check_access(group)?;

        let me = &self.me;
        self.session
            .groups()
            .with_container(group, |container| container.suppress(me))?;

        self.remember(group);
        debug!(context = %self.me.name, group, "Action group suppressed");
        Ok(())
    }

    fn check_access(&self, group: &str) -> Result<(), ActionGroupError> {
        if !self.is_global() {
            return Err(ActionGroupError::NotGlobal);
        }
        if self.disposing {
            return Err(ActionGroupError::Disposing);
        }
        if !self.allowed_groups.iter().any(|g| g == group) {
            return Err(ActionGroupError::AccessDenied {
                group: group.to_string(),
            });
        }
        Ok(())
    }

    fn remember(&mut self, group: &str) {
        if !self.affected_groups.iter().any(|g| g == group) {
            self.affected_groups.push(group.to_string());
        }
    }

    fn forget(&mut self, group: &str) {
        self.affected_groups.retain(|g| g != group);
    }

    /// Register this instance as the global one of its type.
    ///
    /// Nothing is mutated unless every check passes.
    fn claim_global(&mut self) -> Result<(), ContextError> {
        let contexts = self.session.contexts();
        let groups = self.session.groups();

        if contexts.exists(&self.me.name) {
            return Err(ContextError::AlreadyExists {
                name: self.me.name.clone(),
            });
        }

        if self.session.config().groups.exclusive_ownership {
            groups.query_group(&self.owned_groups)?;
        } else {
            groups.query_group(self.default_groups())?;
        }
        groups.ensure_unsuppressed(&self.owned_groups)?;

        contexts.try_register(ContextEntry {
            id: self.me.id,
            name: self.me.name.clone(),
            owned_groups: self.owned_groups.clone(),
        })?;

        info!(context = %self.me.name, id = %self.me.id, "Context registered globally");
        Ok(())
    }

    /// Hold every owned group. A group the create hook already locked is skipped.
    fn register_owned_groups(&mut self) -> Result<(), ActionGroupError> {
        for group in self.owned_groups.clone() {
            let me = &self.me;
            match self
                .session
                .groups()
                .with_container(&group, |container| container.add(me))
            {
                Ok(()) => self.remember(&group),
                Err(ActionGroupError::AlreadyLocked { .. }) => {
                    debug!(
                        context = %self.me.name,
                        group = %group,
                        "Owned group already locked by this context"
                    );
                    self.remember(&group);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(())
    }

    fn release_groups(&mut self) {
        let id = self.me.id;
        for group in std::mem::take(&mut self.affected_groups) {
            self.session
                .groups()
                .with_existing(&group, |container| container.remove(id));
        }
    }

    fn knock_up(&mut self) {
        if self.session.contexts().unregister(&self.me.name, self.me.id) {
            debug!(context = %self.me.name, id = %self.me.id, "Context unregistered");
        }
        self.running = false;
        self.disposed = true;
    }
}

/// Releases every affected group and unregisters the context when dropped, unless disarmed.
///
/// Runs on early return and on unwinding alike.
struct CleanupGuard<'a> {
    core: &'a mut ContextCore,
    armed: bool,
}

impl<'a> CleanupGuard<'a> {
    fn new(core: &'a mut ContextCore) -> Self {
        Self { core, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Deref for CleanupGuard<'_> {
    type Target = ContextCore;

    fn deref(&self) -> &ContextCore {
        &*self.core
    }
}

impl DerefMut for CleanupGuard<'_> {
    fn deref_mut(&mut self) -> &mut ContextCore {
        &mut *self.core
    }
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.core.release_groups();
            self.core.knock_up();
        }
    }
}

/// A running context: a behavior plus its lifecycle state
///
/// Dropping a context disposes it; use `dispose` to observe a failing
/// dispose hook.
pub struct Context<B: ContextBehavior> {
    behavior: B,
    core: ContextCore,
}

impl<B: ContextBehavior> Context<B> {
    /// Create a context and register it globally
    pub fn new(session: &Arc<Session>, behavior: B) -> Result<Self, ContextError> {
        Self::initialize(session, behavior, true)
    }

    /// Create a context that never touches the global registry
    pub fn private(session: &Arc<Session>, behavior: B) -> Result<Self, ContextError> {
        Self::initialize(session, behavior, false)
    }

    /// Initialize a context.
    ///
    /// Global initialization fails without side effects if another instance of
    /// the same type is registered or an owned group is locked or suppressed.
    /// Any failure after registration is rolled back before it is returned.
    pub fn initialize(
        session: &Arc<Session>,
        behavior: B,
        global: bool,
    ) -> Result<Self, ContextError> {
        behavior.validate()?;

        let name = context_name::<B>();
        let groups = behavior.groups();
        let neutral_groups = behavior.neutral_groups();

        if session.config().groups.strict_names {
            for group in groups.iter().chain(&neutral_groups) {
                validate_group_name(group).map_err(|reason| ContextError::InvalidGroupName {
                    group: group.clone(),
                    reason,
                })?;
            }
        }

        let mut context = Context {
            behavior,
            core: ContextCore::new(session.clone(), name, groups, neutral_groups),
        };

        if global {
            if let Err(err) = context.core.claim_global() {
                context.core.disposed = true;
                return Err(err);
            }
        }

        if let Err(err) = context.start() {
            warn!(
                context = %context.core.name(),
                error = %err,
                "Context initialization rolled back"
            );
            return Err(err);
        }
        Ok(context)
    }

    fn start(&mut self) -> Result<(), ContextError> {
        let mut guard = CleanupGuard::new(&mut self.core);

        if !guard.running {
            guard.running = true;
            self.behavior.create_context(&mut guard)?;
        }

        if guard.is_global() {
            guard.register_owned_groups()?;
        }

        guard.disarm();
        Ok(())
    }

    /// Dispose the context. Idempotent.
    ///
    /// Groups are released first, then the dispose hook runs. The context is
    /// unregistered and stopped whether or not the hook fails; a hook failure is
    /// returned afterwards.
    pub fn dispose(&mut self) -> Result<(), ContextError> {
        if self.core.disposed {
            return Ok(());
        }

        self.core.disposing = true;
        self.core.release_groups();

        let mut guard = CleanupGuard::new(&mut self.core);
        if guard.running {
            self.behavior.dispose_context(&mut guard)?;
        }
        debug!(context = %guard.name(), "Context disposed");
        Ok(())
    }

    pub fn id(&self) -> ContextId {
        self.core.id()
    }

    pub fn name(&self) -> &str {
        self.core.name()
    }

    pub fn session(&self) -> &Arc<Session> {
        self.core.session()
    }

    pub fn is_global(&self) -> bool {
        self.core.is_global()
    }

    pub fn is_running(&self) -> bool {
        self.core.is_running()
    }

    pub fn is_disposed(&self) -> bool {
        self.core.is_disposed()
    }

    pub fn groups(&self) -> &[String] {
        self.core.groups()
    }

    pub fn neutral_groups(&self) -> &[String] {
        self.core.neutral_groups()
    }

    pub fn allowed_groups(&self) -> &[String] {
        self.core.allowed_groups()
    }

    pub fn owned_groups(&self) -> &[String] {
        self.core.owned_groups()
    }

    pub fn default_groups(&self) -> Vec<String> {
        self.core.default_groups()
    }

    pub fn affected_groups(&self) -> &[String] {
        self.core.affected_groups()
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn core(&self) -> &ContextCore {
        &self.core
    }

    /// Behavior and core together, for business logic that needs both
    pub fn parts_mut(&mut self) -> (&mut B, &mut ContextCore) {
        (&mut self.behavior, &mut self.core)
    }

    /// See [`ContextCore::lock_group`]
    pub fn lock_group(&mut self, group: &str) -> Result<(), ActionGroupError> {
        self.core.lock_group(group)
    }

    /// See [`ContextCore::suppress_lock`]
    pub fn suppress_lock(&mut self, group: &str) -> Result<(), ActionGroupError> {
        self.core.suppress_lock(group)
    }
}

impl<B: ContextBehavior> fmt::Debug for Context<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("name", &self.core.me.name)
            .field("id", &self.core.me.id)
            .field("running", &self.core.running)
            .field("disposed", &self.core.disposed)
            .field("affected_groups", &self.core.affected_groups)
            .finish()
    }
}

impl<B: ContextBehavior> Drop for Context<B> {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            warn!(
                context = %self.core.name(),
                error = %err,
                "Dispose hook failed while dropping context"
            );
        }
    }
}

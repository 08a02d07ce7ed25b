//! Error types for context lifecycle and action-group access control.

use std::fmt;
use thiserror::Error;

/// Who is blocking a locked action group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockHolders {
    /// Exactly one context holds the group
    Single(String),
    /// More than one context holds the group
    Many(usize),
}

impl fmt::Display for LockHolders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockHolders::Single(name) => write!(f, "{} context", name),
            LockHolders::Many(count) => write!(f, "{} contexts", count),
        }
    }
}

/// Closed set of action-group failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionGroupErrorKind {
    Locked,
    AlreadyLocked,
    Suppressed,
    AccessDenied,
    NotGlobal,
    Disposing,
    AlreadySuppressed,
    NotSuppressed,
    SuppressorRequired,
}

/// Action-group errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionGroupError {
    #[error("Action group \"{group}\" is locked by {holders}")]
    Locked { group: String, holders: LockHolders },

    #[error("Action group \"{group}\" is already locked by this context")]
    AlreadyLocked { group: String },

    #[error("Action group \"{group}\" is suppressed by {suppressor}")]
    Suppressed { group: String, suppressor: String },

    #[error("Action group operations for \"{group}\" are not permitted")]
    AccessDenied { group: String },

    #[error("Action group operations are only available in global contexts")]
    NotGlobal,

    #[error("A disposing context can't interact with action groups")]
    Disposing,

    #[error("Lock of action group \"{group}\" is already suppressed")]
    AlreadySuppressed { group: String },

    #[error("Lock of action group \"{group}\" is not suppressed")]
    NotSuppressed { group: String },

    #[error("Only the suppressor context can relock action group \"{group}\"")]
    SuppressorRequired { group: String },
}

impl ActionGroupError {
    /// Get the error kind
    pub fn kind(&self) -> ActionGroupErrorKind {
        match self {
            ActionGroupError::Locked { .. } => ActionGroupErrorKind::Locked,
            ActionGroupError::AlreadyLocked { .. } => ActionGroupErrorKind::AlreadyLocked,
            ActionGroupError::Suppressed { .. } => ActionGroupErrorKind::Suppressed,
            ActionGroupError::AccessDenied { .. } => ActionGroupErrorKind::AccessDenied,
            ActionGroupError::NotGlobal => ActionGroupErrorKind::NotGlobal,
            ActionGroupError::Disposing => ActionGroupErrorKind::Disposing,
            ActionGroupError::AlreadySuppressed { .. } => ActionGroupErrorKind::AlreadySuppressed,
            ActionGroupError::NotSuppressed { .. } => ActionGroupErrorKind::NotSuppressed,
            ActionGroupError::SuppressorRequired { .. } => ActionGroupErrorKind::SuppressorRequired,
        }
    }

    /// Name of the offending group, if the error concerns one
    pub fn group(&self) -> Option<&str> {
        match self {
            ActionGroupError::Locked { group, .. }
            | ActionGroupError::AlreadyLocked { group }
            | ActionGroupError::Suppressed { group, .. }
            | ActionGroupError::AccessDenied { group }
            | ActionGroupError::AlreadySuppressed { group }
            | ActionGroupError::NotSuppressed { group }
            | ActionGroupError::SuppressorRequired { group } => Some(group),
            ActionGroupError::NotGlobal | ActionGroupError::Disposing => None,
        }
    }
}

/// Context lifecycle errors
#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    ActionGroup(#[from] ActionGroupError),

    #[error("An instance of context '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("No global instance of context '{name}' is registered")]
    NotFound { name: String },

    #[error("Invalid options for context '{context}': {reason}")]
    InvalidOptions { context: String, reason: String },

    #[error("Invalid action group name '{group}': {reason}")]
    InvalidGroupName { group: String, reason: String },

    /// Failure raised by a context's own create/dispose hook
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContextError {
    /// Action-group error kind, when this error wraps one
    pub fn action_group_kind(&self) -> Option<ActionGroupErrorKind> {
        match self {
            ContextError::ActionGroup(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Configuration and logging setup errors
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for SetupError {
    fn from(err: config::ConfigError) -> Self {
        SetupError::ConfigError(err.to_string())
    }
}

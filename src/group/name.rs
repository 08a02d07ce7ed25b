//! Action group naming.
//!
//! Group names are dotted, lower-cased strings. `action_group` is the only
//! producer callers need to match to address a given permission.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Predefined scopes for action groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionScope {
    /// High-level actions of normal application code
    Application,
    /// Actions that affect global state of the session
    Global,
    /// Low-level actions that affect attributes of the process
    Process,
}

impl ActionScope {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionScope::Application => "application",
            ActionScope::Global => "global",
            ActionScope::Process => "process",
        }
    }
}

impl fmt::Display for ActionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the canonical action group name.
///
/// Segments are joined with `.`, spaces become `_` and the result is lower-cased:
/// `action_group(ActionScope::Application, "TeS t", &[])` is `"application.tes_t"`.
pub fn action_group(scope: ActionScope, identifier: &str, extras: &[&str]) -> String {
    let mut segments = Vec::with_capacity(extras.len() + 2);
    segments.push(scope.as_str());
    segments.push(identifier);
    segments.extend_from_slice(extras);

    segments.join(".").replace(' ', "_").to_lowercase()
}

/// Check that a declared group name is in canonical form.
pub fn validate_group_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.contains(char::is_whitespace) {
        return Err("name contains whitespace".to_string());
    }
    if name.to_lowercase() != name {
        return Err("name is not lower-case".to_string());
    }

    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err("name contains an empty segment".to_string());
    }
    if segments.len() < 2 {
        return Err("name needs a scope and an identifier".to_string());
    }

    Ok(())
}

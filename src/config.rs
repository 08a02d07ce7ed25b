//! Configuration System
//!
//! Session configuration: initial application state, the action-group ownership
//! policy and logging. Loaded in layers by `ConfigLoader` and validated before use.

use crate::application::InteractInterface;
use crate::logging::{self, LoggingConfig};
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Initial application state
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Action-group policy
    #[serde(default)]
    pub groups: GroupPolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Initial application state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Interaction interface to start with; detected from the terminal when unset
    #[serde(default)]
    pub interface: Option<InteractInterface>,

    /// Application name used for data directories; the executable name when unset
    #[serde(default)]
    pub name: Option<String>,
}

/// Action-group policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupPolicyConfig {
    /// Refuse to initialize a global context while any of its owned groups is
    /// locked. When false only the per-type default group is checked, so several
    /// contexts may hold the same owned group at once.
    ///
    /// The check runs once, before the create hook. It does not keep a second owner
    /// out afterwards: a context created from inside another's `create_context`, or
    /// one racing it on another thread, can still end up holding the same group.
    #[serde(default = "default_true")]
    pub exclusive_ownership: bool,

    /// Require declared group names to be in canonical form
    #[serde(default)]
    pub strict_names: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GroupPolicyConfig {
    fn default() -> Self {
        Self {
            exclusive_ownership: true,
            strict_names: false,
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Application(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Application(msg) => write!(f, "Application: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl SessionConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.application.name {
            if name.trim().is_empty() {
                errors.push(ValidationError::Application(
                    "name cannot be empty".to_string(),
                ));
            }
        }

        if !logging::LOG_LEVELS.contains(&self.logging.level.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "invalid level '{}'",
                self.logging.level
            )));
        }
        if !logging::LOG_FORMATS.contains(&self.logging.format.as_str()) {
            errors.push(ValidationError::Logging(format!(
                "invalid format '{}'",
                self.logging.format
            )));
        }
        if !logging::is_valid_output(&self.logging.output) {
            errors.push(ValidationError::Logging(format!(
                "invalid output '{}'",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

//! Ctxgate: Scoped Contexts and Action Groups
//!
//! Contexts are scoped units of behavior with a create/dispose lifecycle. At most
//! one global instance of each context type is registered per session. Action
//! groups are named permission tokens: a global context locks the groups it owns
//! for as long as it lives, and may temporarily suppress a lock so that others can
//! pass the check.

pub mod application;
pub mod config;
pub mod context;
pub mod contexts;
pub mod error;
pub mod group;
pub mod logging;
pub mod session;
pub mod status;

pub use application::InteractInterface;
pub use config::{ConfigLoader, SessionConfig};
pub use context::{context_name, Context, ContextBehavior, ContextCore, ContextEntry, ContextId};
pub use error::{ActionGroupError, ActionGroupErrorKind, ContextError, SetupError};
pub use group::{action_group, ActionGroupState, ActionScope};
pub use session::{Session, SessionSnapshot};
pub use status::{StatusIdentifier, StatusProvider};

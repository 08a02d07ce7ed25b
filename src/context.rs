//! Contexts
//!
//! A context is a scoped unit of behavior. At most one global instance of each
//! context type is registered per session; while it lives it holds its owned
//! action groups and may lock or suppress its neutral ones.

pub mod behavior;
pub mod identity;
pub mod lifecycle;
pub mod registry;

pub use behavior::ContextBehavior;
pub use identity::{context_name, ContextId, ContextRef};
pub use lifecycle::{default_groups, Context, ContextCore};
pub use registry::{ContextEntry, ContextRegistry};

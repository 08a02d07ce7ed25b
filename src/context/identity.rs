//! Context identity.
//!
//! A context is named after its concrete behavior type; the name is what the
//! global registry enforces uniqueness on. Every instance additionally carries a
//! process-unique `ContextId`, which is what action-group containers compare.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static CONTEXT_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Process-unique identifier of one context instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ContextId(u64);

impl ContextId {
    pub(crate) fn next() -> Self {
        ContextId(CONTEXT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Reference to a context instance, as recorded by action-group containers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ContextRef {
    pub id: ContextId,
    pub name: String,
}

impl ContextRef {
    pub fn new(id: ContextId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Name identifier of a context type: the type name without module path or generics.
pub fn context_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

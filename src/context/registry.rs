//! Context registry: the single active global instance of each context type.

use crate::context::identity::{context_name, ContextId, ContextRef};
use crate::error::ContextError;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;

/// Registry record of a global context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextEntry {
    pub id: ContextId,
    pub name: String,
    pub owned_groups: Vec<String>,
}

impl ContextEntry {
    pub fn context_ref(&self) -> ContextRef {
        ContextRef::new(self.id, self.name.clone())
    }
}

/// Mapping from context name to the one active global instance of that type
///
/// Insertion and removal are serialized, so the uniqueness check and the insert
/// form a single step.
#[derive(Debug, Default)]
pub struct ContextRegistry {
    contexts: Mutex<HashMap<String, ContextEntry>>,
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a global context with `name` exists
    pub fn exists(&self, name: &str) -> bool {
        self.contexts.lock().contains_key(name)
    }

    /// Check whether a global context of type `T` exists
    pub fn exists_of<T: ?Sized>(&self) -> bool {
        self.exists(&context_name::<T>())
    }

    /// Get the global context registered under `name`
    pub fn get(&self, name: &str) -> Option<ContextEntry> {
        self.contexts.lock().get(name).cloned()
    }

    /// Get the global context of type `T`
    pub fn get_of<T: ?Sized>(&self) -> Option<ContextEntry> {
        self.get(&context_name::<T>())
    }

    /// Get the global context registered under `name` or return an error
    pub fn get_or_error(&self, name: &str) -> Result<ContextEntry, ContextError> {
        self.get(name).ok_or_else(|| ContextError::NotFound {
            name: name.to_string(),
        })
    }

    /// Check whether this exact instance is the registered one
    pub fn is_registered(&self, id: ContextId) -> bool {
        self.contexts.lock().values().any(|entry| entry.id == id)
    }

    /// Names of all registered contexts, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.contexts.lock().keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered contexts, sorted by name
    pub fn list_all(&self) -> Vec<ContextEntry> {
        let mut entries: Vec<ContextEntry> = self.contexts.lock().values().cloned().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    pub fn len(&self) -> usize {
        self.contexts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert `entry` unless an instance with the same name is already registered
    pub(crate) fn try_register(&self, entry: ContextEntry) -> Result<(), ContextError> {
        let mut contexts = self.contexts.lock();
        if contexts.contains_key(&entry.name) {
            return Err(ContextError::AlreadyExists { name: entry.name });
        }
        contexts.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Remove the entry for `name` if it belongs to instance `id`
    pub(crate) fn unregister(&self, name: &str, id: ContextId) -> bool {
        let mut contexts = self.contexts.lock();
        match contexts.get(name) {
            Some(entry) if entry.id == id => {
                contexts.remove(name);
                true
            }
            _ => false,
        }
    }
}

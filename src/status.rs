//! Status provider surface.
//!
//! The session keeps one current provider; replacing it is guarded by the
//! `global.status` action group.

use std::sync::atomic::{AtomicU64, Ordering};

static STATUS_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Handle of one status line written through a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StatusIdentifier(u64);

impl StatusIdentifier {
    /// Identifier that refers to no status line
    pub const EMPTY: StatusIdentifier = StatusIdentifier(0);

    /// Allocate a fresh identifier
    pub fn new() -> Self {
        StatusIdentifier(STATUS_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn is_valid(&self) -> bool {
        self.0 != 0
    }
}

/// Receives status messages
pub trait StatusProvider: Send + Sync {
    /// Show a status message
    fn write(&self, message: &str) -> StatusIdentifier;

    /// Clear every status message
    fn clear(&self);

    /// Clear one status message; providers that track a single line clear everything
    fn clear_status(&self, identifier: StatusIdentifier) {
        let _ = identifier;
        self.clear();
    }
}

/// Provider that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyStatusProvider;

impl StatusProvider for EmptyStatusProvider {
    fn write(&self, _message: &str) -> StatusIdentifier {
        StatusIdentifier::EMPTY
    }

    fn clear(&self) {}
}

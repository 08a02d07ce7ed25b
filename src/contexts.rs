//! Built-in contexts
//!
//! Contexts that temporarily take over a piece of application state and put the
//! previous value back when disposed.

pub mod interface_override;
pub mod status_override;

pub use interface_override::{InterfaceOverride, InterfaceOverrideOptions};
pub use status_override::{StatusOverride, StatusOverrideOptions};

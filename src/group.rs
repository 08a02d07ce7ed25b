//! Action Groups
//!
//! Named, hierarchical permission tokens. A group is free, locked by one or more
//! holder contexts, or suppressed by a single context that temporarily waives the
//! lock check for everyone.

pub mod container;
pub mod name;
pub mod registry;

pub use container::{ActionGroupContainer, ActionGroupState};
pub use name::{action_group, validate_group_name, ActionScope};
pub use registry::{ActionGroupRegistry, GroupSnapshot};

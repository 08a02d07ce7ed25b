//! Context behavior: what a concrete context type declares and does.

use crate::context::lifecycle::ContextCore;
use crate::error::ContextError;

/// Behavior of a concrete context type
///
/// The implementing type's name is the context's identity. Options are ordinary
/// typed fields of the implementing type, checked by `validate` before the context
/// touches any registry.
pub trait ContextBehavior: Send + 'static {
    /// Groups owned by this context; locked automatically after `create_context`
    fn groups(&self) -> Vec<String> {
        Vec::new()
    }

    /// Groups this context may lock or suppress without owning them
    fn neutral_groups(&self) -> Vec<String> {
        Vec::new()
    }

    /// Check the context's options
    fn validate(&self) -> Result<(), ContextError> {
        Ok(())
    }

    /// Called when the context starts, before its owned groups are locked. May lock
    /// or suppress allowed groups.
    fn create_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError>;

    /// Called on disposal, after every group this context held has been released
    fn dispose_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError>;
}

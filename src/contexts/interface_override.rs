//! Interface override context.

use crate::application::InteractInterface;
use crate::context::{ContextBehavior, ContextCore};
use crate::error::ContextError;
use crate::group::{action_group, ActionScope};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceOverrideOptions {
    pub interface: InteractInterface,
}

/// Switches the session's interaction interface while alive.
///
/// Owns `global.interface`, so nothing else can change the interface until the
/// override is disposed.
#[derive(Debug)]
pub struct InterfaceOverride {
    options: InterfaceOverrideOptions,
    previous: Option<InteractInterface>,
}

impl InterfaceOverride {
    pub fn new(interface: InteractInterface) -> Self {
        Self::with_options(InterfaceOverrideOptions { interface })
    }

    pub fn with_options(options: InterfaceOverrideOptions) -> Self {
        Self {
            options,
            previous: None,
        }
    }

    pub fn options(&self) -> &InterfaceOverrideOptions {
        &self.options
    }

    /// Interface in effect before the override was created
    pub fn previous(&self) -> Option<InteractInterface> {
        self.previous
    }
}

impl ContextBehavior for InterfaceOverride {
    fn groups(&self) -> Vec<String> {
        vec![action_group(ActionScope::Global, "interface", &[])]
    }

    fn create_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError> {
        let session = ctx.session();
        let previous = session.interface();
        session.set_interface(self.options.interface)?;
        self.previous = Some(previous);
        debug!(from = ?previous, to = ?self.options.interface, "Interface overridden");
        Ok(())
    }

    fn dispose_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError> {
        if let Some(previous) = self.previous.take() {
            ctx.session().set_interface(previous)?;
        }
        Ok(())
    }
}

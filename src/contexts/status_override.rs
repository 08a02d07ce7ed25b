//! Status override context.

use crate::context::{ContextBehavior, ContextCore};
use crate::error::ContextError;
use crate::group::{action_group, ActionScope};
use crate::status::StatusProvider;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct StatusOverrideOptions {
    pub provider: Arc<dyn StatusProvider>,
}

impl fmt::Debug for StatusOverrideOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusOverrideOptions").finish_non_exhaustive()
    }
}

/// Routes status output to another provider while alive. Owns `global.status`.
pub struct StatusOverride {
    options: StatusOverrideOptions,
    previous: Option<Arc<dyn StatusProvider>>,
}

impl StatusOverride {
    pub fn new(provider: Arc<dyn StatusProvider>) -> Self {
        Self::with_options(StatusOverrideOptions { provider })
    }

    pub fn with_options(options: StatusOverrideOptions) -> Self {
        Self {
            options,
            previous: None,
        }
    }

    pub fn options(&self) -> &StatusOverrideOptions {
        &self.options
    }
}

impl fmt::Debug for StatusOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusOverride")
            .field("options", &self.options)
            .field("restores_previous", &self.previous.is_some())
            .finish()
    }
}

impl ContextBehavior for StatusOverride {
    fn groups(&self) -> Vec<String> {
        vec![action_group(ActionScope::Global, "status", &[])]
    }

    fn create_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError> {
        let session = ctx.session();
        let previous = session.status_provider();
        session.set_status_provider(self.options.provider.clone())?;
        self.previous = Some(previous);
        Ok(())
    }

    fn dispose_context(&mut self, ctx: &mut ContextCore) -> Result<(), ContextError> {
        if let Some(previous) = self.previous.take() {
            ctx.session().set_status_provider(previous)?;
        }
        Ok(())
    }
}

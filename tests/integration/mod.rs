//! Integration tests for scoped contexts and action groups

mod application_state;
mod config_integration;

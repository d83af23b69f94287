//! Application layer for the pull-request workflow.

pub mod command_handlers;
pub mod query_handlers;
pub mod validator;

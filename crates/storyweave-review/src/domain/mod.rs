//! Domain types for the pull-request workflow.

pub mod commands;
pub mod diff;
pub mod pull_request;

//! Application layer for the chapter tree context.

pub mod command_handlers;
pub mod query_handlers;
pub mod tree_builder;

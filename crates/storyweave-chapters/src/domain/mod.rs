//! Domain types for the chapter tree.

pub mod chapter;
pub mod commands;
pub mod tree;
pub mod version;

//! Storyweave Chapters — the story content tree.
//!
//! Owns the chapter entity and its immutable version snapshots, the tree
//! builder that places new chapters under their parent, and the handlers
//! that compose permission checks with the store's conditional insert.

pub mod application;
pub mod domain;
pub mod repository;

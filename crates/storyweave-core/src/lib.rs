//! Storyweave Core — shared domain abstractions.
//!
//! This crate defines the error taxonomy, the clock abstraction, and the
//! contracts for collaborators the core consumes but does not own (story
//! lookup, user directory). It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod story;
pub mod user;

//! Storyweave Rules — pure collaboration predicates.
//!
//! Role→capability lookup, the story status transition table, ownership
//! checks, and the proposal-uniqueness predicate, all over already-loaded
//! entities. Nothing in this crate performs I/O or mutates state.

mod ownership;
mod permissions;
mod proposals;
mod transitions;

pub use ownership::{can_edit_story, can_publish_story, effective_role, is_story_creator};
pub use permissions::{Capabilities, capabilities};
pub use proposals::has_duplicate_open_pr;
pub use transitions::{allowed_transitions, is_valid_status_transition};

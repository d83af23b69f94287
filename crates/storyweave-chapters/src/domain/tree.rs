//! Tree placement for new chapters.
//!
//! The ancestor chain and depth of a chapter are derived here, and only
//! here, so the invariants `ancestor_ids == parent.ancestor_ids ++ [parent.id]`
//! and `depth == ancestor_ids.len()` hold by construction.

use uuid::Uuid;

use super::chapter::Chapter;

/// Where a new chapter attaches in its story's tree.
#[derive(Debug, Clone)]
pub struct TreePosition {
    /// Ancestor chain for the new chapter, root first.
    pub ancestor_ids: Vec<Uuid>,
    /// Depth of the new chapter.
    pub depth: u32,
    /// True iff the new chapter is the story root.
    pub is_root: bool,
    /// The loaded parent chapter; `None` for the root.
    pub parent: Option<Chapter>,
}

/// Position of a story's root chapter.
#[must_use]
pub fn root_position() -> TreePosition {
    TreePosition {
        ancestor_ids: Vec::new(),
        depth: 0,
        is_root: true,
        parent: None,
    }
}

/// Position of a chapter branching off `parent`.
#[must_use]
pub fn child_position(parent: Chapter) -> TreePosition {
    let mut ancestor_ids = parent.ancestor_ids.clone();
    ancestor_ids.push(parent.id);
    TreePosition {
        depth: parent.depth + 1,
        ancestor_ids,
        is_root: false,
        parent: Some(parent),
    }
}

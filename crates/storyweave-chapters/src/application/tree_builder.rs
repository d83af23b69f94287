//! Tree placement resolution.
//!
//! Resolves where a new chapter attaches in its story's tree and enforces the
//! structural rules that placement depends on: one root per story, root
//! creation reserved for the story creator, and no branching from deleted
//! content. Reads only; the repository's conditional insert closes the race
//! a concurrent duplicate root would otherwise slip through.

use uuid::Uuid;

use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::Story;
use storyweave_rules::is_story_creator;

use crate::domain::chapter::ChapterStatus;
use crate::domain::tree::{self, TreePosition};
use crate::repository::ChapterRepository;

/// Resolves the tree position for a chapter created under
/// `parent_chapter_id`, or as the story root when no parent is given.
///
/// # Errors
///
/// Root creation fails with [`DomainError::Conflict`] when the story already
/// has a root, then [`DomainError::Forbidden`] when `user_id` is not the
/// story creator. Branch creation fails with [`DomainError::NotFound`] when
/// the parent does not exist, [`DomainError::Validation`] when it belongs to
/// another story, and [`DomainError::RuleViolation`] when it is deleted.
pub async fn resolve_position(
    story: &Story,
    parent_chapter_id: Option<Uuid>,
    user_id: Uuid,
    chapters: &dyn ChapterRepository,
) -> Result<TreePosition, DomainError> {
    let Some(parent_id) = parent_chapter_id else {
        if chapters.find_root(story.id).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "story {} already has a root chapter",
                story.id
            )));
        }
        if !is_story_creator(user_id, story) {
            return Err(DomainError::Forbidden(
                "only the story creator may create the root chapter".to_owned(),
            ));
        }
        return Ok(tree::root_position());
    };

    let parent = chapters
        .find_by_id(parent_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::Chapter,
            reference: parent_id.to_string(),
        })?;

    if parent.story_id != story.id {
        return Err(DomainError::Validation {
            code: "parent_story_mismatch",
            message: format!("chapter {parent_id} belongs to another story"),
        });
    }
    if parent.status == ChapterStatus::Deleted {
        return Err(DomainError::RuleViolation(
            "cannot branch from a deleted chapter".to_owned(),
        ));
    }

    Ok(tree::child_position(parent))
}

// Tests live in tests/tree_builder.rs: the in-memory store used as a test
// double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

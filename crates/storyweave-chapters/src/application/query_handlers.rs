//! Query handlers for the chapter tree context.

use uuid::Uuid;

use storyweave_core::error::{DomainError, ResourceKind};

use crate::domain::chapter::Chapter;
use crate::domain::version::ChapterVersion;
use crate::repository::ChapterRepository;

/// Retrieves a chapter by id.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no such chapter exists.
pub async fn get_chapter_by_id(
    chapter_id: Uuid,
    chapters: &dyn ChapterRepository,
) -> Result<Chapter, DomainError> {
    chapters
        .find_by_id(chapter_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::Chapter,
            reference: chapter_id.to_string(),
        })
}

/// Retrieves a chapter's version history, oldest first.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no such chapter exists.
pub async fn get_chapter_versions(
    chapter_id: Uuid,
    chapters: &dyn ChapterRepository,
) -> Result<Vec<ChapterVersion>, DomainError> {
    if chapters.find_by_id(chapter_id).await?.is_none() {
        return Err(DomainError::NotFound {
            kind: ResourceKind::Chapter,
            reference: chapter_id.to_string(),
        });
    }
    chapters.list_versions(chapter_id).await
}

// Tests live in tests/query_handlers.rs: the in-memory store used as a test
// double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

//! Chapter repository contract.

use async_trait::async_trait;
use uuid::Uuid;

use storyweave_core::error::DomainError;

use crate::domain::chapter::Chapter;
use crate::domain::version::ChapterVersion;

/// Contract for chapter storage.
///
/// Implementations own the uniqueness guarantees the tree depends on; the
/// services above perform reads but never rely on read-then-write windows.
#[async_trait]
pub trait ChapterRepository: Send + Sync {
    /// Loads a chapter by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chapter>, DomainError>;

    /// Loads a chapter by slug within a story.
    async fn find_by_slug(
        &self,
        story_id: Uuid,
        slug: &str,
    ) -> Result<Option<Chapter>, DomainError>;

    /// Returns the story's root chapter, if one exists.
    async fn find_root(&self, story_id: Uuid) -> Result<Option<Chapter>, DomainError>;

    /// Conditionally inserts a new chapter together with its version-1
    /// snapshot.
    ///
    /// Storage must enforce, atomically with the write: id uniqueness, slug
    /// uniqueness within the story, and at most one root chapter per story.
    /// A lost race surfaces as [`DomainError::Conflict`], never as a
    /// duplicate row.
    async fn insert(
        &self,
        chapter: &Chapter,
        initial_version: &ChapterVersion,
    ) -> Result<(), DomainError>;

    /// Returns all version snapshots for a chapter, oldest first.
    async fn list_versions(&self, chapter_id: Uuid) -> Result<Vec<ChapterVersion>, DomainError>;
}

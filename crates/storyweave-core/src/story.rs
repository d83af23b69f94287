//! Story read model and collaborator-role contract.
//!
//! Story CRUD lives outside the core; the workflow only needs a read model
//! plus the role lookup, so this module defines exactly that contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lifecycle status of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
    /// Visible to collaborators only.
    Draft,
    /// Publicly readable.
    Published,
    /// Read-only, hidden from discovery.
    Archived,
    /// Soft-deleted. Terminal.
    Deleted,
}

/// A named permission tier granted to a user on a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollaboratorRole {
    /// The story creator's tier. Holds every capability.
    Owner,
    /// Writes chapters and runs the full review workflow.
    Editor,
    /// Reviews proposals but does not write chapters.
    Reviewer,
    /// Writes chapters and submits proposals only.
    Contributor,
}

/// Read model of a story aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Story identifier.
    pub id: Uuid,
    /// URL slug, unique across stories.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// The user who created the story.
    pub creator_id: Uuid,
    /// Current lifecycle status.
    pub status: StoryStatus,
}

/// Contract for story lookup and collaborator-role resolution.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Looks up a story by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, DomainError>;

    /// Looks up a story by its URL slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Story>, DomainError>;

    /// Returns the role explicitly granted to `user_id` on `story_id`, if
    /// any. The creator's implicit `Owner` tier is resolved by the rules
    /// layer, not here.
    async fn collaborator_role(
        &self,
        user_id: Uuid,
        story_id: Uuid,
    ) -> Result<Option<CollaboratorRole>, DomainError>;
}

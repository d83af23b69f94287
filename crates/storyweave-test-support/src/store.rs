//! Test stores — failing repository implementations for tests.

use async_trait::async_trait;
use storyweave_chapters::domain::chapter::Chapter;
use storyweave_chapters::domain::version::ChapterVersion;
use storyweave_chapters::repository::ChapterRepository;
use storyweave_core::error::DomainError;
use storyweave_core::story::{CollaboratorRole, Story, StoryRepository};
use storyweave_core::user::UserDirectory;
use storyweave_review::domain::pull_request::PullRequest;
use storyweave_review::repository::{ChapterWrite, PullRequestRepository};
use uuid::Uuid;

fn refused() -> DomainError {
    DomainError::Storage("connection refused".to_owned())
}

/// A store that fails every repository call with a storage error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingStore;

#[async_trait]
impl StoryRepository for FailingStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Story>, DomainError> {
        Err(refused())
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Story>, DomainError> {
        Err(refused())
    }

    async fn collaborator_role(
        &self,
        _user_id: Uuid,
        _story_id: Uuid,
    ) -> Result<Option<CollaboratorRole>, DomainError> {
        Err(refused())
    }
}

#[async_trait]
impl UserDirectory for FailingStore {
    async fn display_name(&self, _user_id: Uuid) -> Result<Option<String>, DomainError> {
        Err(refused())
    }
}

#[async_trait]
impl ChapterRepository for FailingStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Chapter>, DomainError> {
        Err(refused())
    }

    async fn find_by_slug(
        &self,
        _story_id: Uuid,
        _slug: &str,
    ) -> Result<Option<Chapter>, DomainError> {
        Err(refused())
    }

    async fn find_root(&self, _story_id: Uuid) -> Result<Option<Chapter>, DomainError> {
        Err(refused())
    }

    async fn insert(
        &self,
        _chapter: &Chapter,
        _initial_version: &ChapterVersion,
    ) -> Result<(), DomainError> {
        Err(refused())
    }

    async fn list_versions(&self, _chapter_id: Uuid) -> Result<Vec<ChapterVersion>, DomainError> {
        Err(refused())
    }
}

#[async_trait]
impl PullRequestRepository for FailingStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<PullRequest>, DomainError> {
        Err(refused())
    }

    async fn insert(&self, _pr: &PullRequest) -> Result<(), DomainError> {
        Err(refused())
    }

    async fn update(&self, _pr: &PullRequest) -> Result<(), DomainError> {
        Err(refused())
    }

    async fn open_target_ids(&self, _author_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Err(refused())
    }

    async fn commit_merge(
        &self,
        _pr: &PullRequest,
        _write: ChapterWrite<'_>,
        _snapshot: &ChapterVersion,
    ) -> Result<(), DomainError> {
        Err(refused())
    }
}

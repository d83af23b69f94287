//! Pull request repository contract.

use async_trait::async_trait;
use uuid::Uuid;

use storyweave_chapters::domain::chapter::Chapter;
use storyweave_chapters::domain::version::ChapterVersion;
use storyweave_core::error::DomainError;

use crate::domain::pull_request::PullRequest;

/// The chapter write a merge carries.
///
/// `NewChapter` proposals insert; edit and delete proposals replace the
/// stored chapter conditional on its version not having moved since the
/// merge was prepared.
#[derive(Debug)]
pub enum ChapterWrite<'a> {
    /// Insert a chapter materialized by the merge.
    Insert(&'a Chapter),
    /// Replace the stored chapter if its version still matches.
    Update {
        /// The post-merge chapter.
        chapter: &'a Chapter,
        /// The version the stored chapter must still have.
        expected_version: i64,
    },
}

/// Contract for pull request storage.
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Loads a pull request by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PullRequest>, DomainError>;

    /// Conditionally inserts a new pull request.
    ///
    /// Storage must enforce, atomically with the write, that the author has
    /// no other open pull request targeting the same chapter. A lost race
    /// surfaces as [`DomainError::Conflict`].
    async fn insert(&self, pr: &PullRequest) -> Result<(), DomainError>;

    /// Replaces a stored pull request.
    async fn update(&self, pr: &PullRequest) -> Result<(), DomainError>;

    /// Returns the target chapter ids of the author's open pull requests.
    async fn open_target_ids(&self, author_id: Uuid) -> Result<Vec<Uuid>, DomainError>;

    /// Commits a merge as one atomic unit: the chapter write, the version
    /// snapshot, and the pull request's transition to `MERGED`.
    ///
    /// Storage must verify that its stored copy of the pull request is still
    /// `APPROVED` and, for updates, that the chapter version matches
    /// `expected_version`; either check failing surfaces as
    /// [`DomainError::Conflict`] with nothing written.
    async fn commit_merge(
        &self,
        pr: &PullRequest,
        write: ChapterWrite<'_>,
        snapshot: &ChapterVersion,
    ) -> Result<(), DomainError>;
}

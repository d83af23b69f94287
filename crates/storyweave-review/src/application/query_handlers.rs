//! Query handlers for the review context.

use uuid::Uuid;

use storyweave_core::error::{DomainError, ResourceKind};

use crate::domain::pull_request::PullRequest;
use crate::repository::PullRequestRepository;

/// Retrieves a pull request by id, change payload and timeline included.
///
/// # Errors
///
/// Returns `DomainError::NotFound` when no such pull request exists.
pub async fn get_pull_request_by_id(
    pr_id: Uuid,
    prs: &dyn PullRequestRepository,
) -> Result<PullRequest, DomainError> {
    prs.find_by_id(pr_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::PullRequest,
            reference: pr_id.to_string(),
        })
}

// Tests live in tests/query_handlers.rs: the in-memory store used as a test
// double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

//! Commands for the pull-request workflow.

use uuid::Uuid;

use super::diff::PrType;
use super::pull_request::{AutoApprovePolicy, PrLabel, Vote};

/// Command to submit a proposal.
#[derive(Debug, Clone)]
pub struct CreatePullRequest {
    /// Pre-allocated pull request id.
    pub pr_id: Uuid,
    /// Pre-allocated chapter id, used when a `NewChapter` proposal merges.
    pub new_chapter_id: Uuid,
    /// The proposing user.
    pub user_id: Uuid,
    /// Slug of the story the proposal targets.
    pub story_slug: String,
    /// Slug of the chapter to edit or delete; absent for `NewChapter`.
    pub chapter_slug: Option<String>,
    /// Slug of the parent chapter a `NewChapter` proposal attaches under.
    pub parent_chapter_slug: Option<String>,
    /// Kind of change proposed.
    pub pr_type: PrType,
    /// Proposal title.
    pub title: String,
    /// Free-form rationale.
    pub description: Option<String>,
    /// The content the proposal wants in place.
    pub proposed_content: String,
    /// Whether the proposal starts as a draft.
    pub draft: bool,
    /// Editorial tags.
    pub labels: Vec<PrLabel>,
    /// Auto-approval rule.
    pub auto_approve: AutoApprovePolicy,
}

/// Command to approve an open proposal.
#[derive(Debug, Clone)]
pub struct ApprovePullRequest {
    /// The proposal to approve.
    pub pr_id: Uuid,
    /// The acting reviewer.
    pub reviewer_id: Uuid,
    /// Optional review notes.
    pub notes: Option<String>,
}

/// Command to reject an open proposal.
#[derive(Debug, Clone)]
pub struct RejectPullRequest {
    /// The proposal to reject.
    pub pr_id: Uuid,
    /// The acting reviewer.
    pub reviewer_id: Uuid,
    /// Required reason for the rejection.
    pub reason: String,
}

/// Command to withdraw a proposal.
#[derive(Debug, Clone)]
pub struct ClosePullRequest {
    /// The proposal to close.
    pub pr_id: Uuid,
    /// The acting user; the author, or a collaborator who may approve.
    pub user_id: Uuid,
}

/// Command to merge an approved proposal into the chapter tree.
#[derive(Debug, Clone)]
pub struct MergePullRequest {
    /// The proposal to merge.
    pub pr_id: Uuid,
    /// The acting user.
    pub merger_id: Uuid,
}

/// Command to cast a community vote on an open proposal.
#[derive(Debug, Clone)]
pub struct CastVote {
    /// The proposal voted on.
    pub pr_id: Uuid,
    /// The voting user.
    pub voter_id: Uuid,
    /// Direction of the vote.
    pub vote: Vote,
}

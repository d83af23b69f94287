//! Routes for the pull-request review workflow.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use storyweave_review::application::{command_handlers, query_handlers};
use storyweave_review::domain::commands::{
    ApprovePullRequest, CastVote, ClosePullRequest, CreatePullRequest, MergePullRequest,
    RejectPullRequest,
};
use storyweave_review::domain::diff::PrType;
use storyweave_review::domain::pull_request::{AutoApprovePolicy, PrLabel, PullRequest, Vote};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreatePullRequestRequest {
    /// The proposing user.
    pub user_id: Uuid,
    /// Slug of the story the proposal targets.
    pub story_slug: String,
    /// Kind of change proposed.
    pub pr_type: PrType,
    /// Slug of the chapter to edit or delete; absent for `NEW_CHAPTER`.
    pub chapter_slug: Option<String>,
    /// Slug of the parent chapter a `NEW_CHAPTER` proposal attaches under.
    pub parent_chapter_slug: Option<String>,
    /// Proposal title.
    pub title: String,
    /// Free-form rationale.
    pub description: Option<String>,
    /// The content the proposal wants in place.
    pub proposed_content: String,
    /// Whether the proposal starts as a draft.
    #[serde(default)]
    pub draft: bool,
    /// Editorial tags.
    #[serde(default)]
    pub labels: Vec<PrLabel>,
    /// Auto-approval rule; disabled when omitted.
    #[serde(default)]
    pub auto_approve: AutoApprovePolicy,
}

/// Request body for POST /{id}/approve.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    /// The acting reviewer.
    pub reviewer_id: Uuid,
    /// Optional review notes.
    pub notes: Option<String>,
}

/// Request body for POST /{id}/reject.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// The acting reviewer.
    pub reviewer_id: Uuid,
    /// Required reason for the rejection.
    pub reason: String,
}

/// Request body for POST /{id}/close.
#[derive(Debug, Deserialize)]
pub struct CloseRequest {
    /// The acting user.
    pub user_id: Uuid,
}

/// Request body for POST /{id}/merge.
#[derive(Debug, Deserialize)]
pub struct MergeRequest {
    /// The acting user.
    pub merger_id: Uuid,
}

/// Request body for POST /{id}/votes.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    /// The voting user.
    pub voter_id: Uuid,
    /// Direction of the vote.
    pub vote: Vote,
}

/// POST /
#[instrument(
    skip(state, request),
    fields(story_slug = %request.story_slug, user_id = %request.user_id)
)]
async fn create_pull_request(
    State(state): State<AppState>,
    Json(request): Json<CreatePullRequestRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = CreatePullRequest {
        pr_id: Uuid::new_v4(),
        new_chapter_id: Uuid::new_v4(),
        user_id: request.user_id,
        story_slug: request.story_slug,
        chapter_slug: request.chapter_slug,
        parent_chapter_slug: request.parent_chapter_slug,
        pr_type: request.pr_type,
        title: request.title,
        description: request.description,
        proposed_content: request.proposed_content,
        draft: request.draft,
        labels: request.labels,
        auto_approve: request.auto_approve,
    };

    info!(pr_id = %command.pr_id, "handling create_pull_request command");

    let pr = command_handlers::handle_create_pull_request(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.chapters,
        &*state.pull_requests,
        &*state.notifications,
    )
    .await?;

    Ok(Json(pr))
}

/// GET /{id}
#[instrument(skip(state), fields(pr_id = %id))]
async fn get_pull_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PullRequest>, ApiError> {
    let pr = query_handlers::get_pull_request_by_id(id, &*state.pull_requests).await?;
    Ok(Json(pr))
}

/// POST /{id}/approve
#[instrument(skip(state, request), fields(pr_id = %id, reviewer_id = %request.reviewer_id))]
async fn approve_pull_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ApproveRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = ApprovePullRequest {
        pr_id: id,
        reviewer_id: request.reviewer_id,
        notes: request.notes,
    };

    info!("handling approve_pull_request command");

    let pr = command_handlers::handle_approve_pull_request(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.pull_requests,
        &*state.notifications,
    )
    .await?;

    Ok(Json(pr))
}

/// POST /{id}/reject
#[instrument(skip(state, request), fields(pr_id = %id, reviewer_id = %request.reviewer_id))]
async fn reject_pull_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = RejectPullRequest {
        pr_id: id,
        reviewer_id: request.reviewer_id,
        reason: request.reason,
    };

    info!("handling reject_pull_request command");

    let pr = command_handlers::handle_reject_pull_request(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.pull_requests,
        &*state.notifications,
    )
    .await?;

    Ok(Json(pr))
}

/// POST /{id}/close
#[instrument(skip(state, request), fields(pr_id = %id, user_id = %request.user_id))]
async fn close_pull_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CloseRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = ClosePullRequest {
        pr_id: id,
        user_id: request.user_id,
    };

    info!("handling close_pull_request command");

    let pr = command_handlers::handle_close_pull_request(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.pull_requests,
    )
    .await?;

    Ok(Json(pr))
}

/// POST /{id}/merge
#[instrument(skip(state, request), fields(pr_id = %id, merger_id = %request.merger_id))]
async fn merge_pull_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<MergeRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = MergePullRequest {
        pr_id: id,
        merger_id: request.merger_id,
    };

    info!("handling merge_pull_request command");

    let pr = command_handlers::handle_merge_pull_request(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.chapters,
        &*state.pull_requests,
        &*state.notifications,
    )
    .await?;

    Ok(Json(pr))
}

/// POST /{id}/votes
#[instrument(skip(state, request), fields(pr_id = %id, voter_id = %request.voter_id))]
async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<PullRequest>, ApiError> {
    let command = CastVote {
        pr_id: id,
        voter_id: request.voter_id,
        vote: request.vote,
    };

    info!("handling cast_vote command");

    let pr = command_handlers::handle_cast_vote(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.pull_requests,
        &*state.notifications,
    )
    .await?;

    Ok(Json(pr))
}

/// Returns the router for the review workflow.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_pull_request))
        .route("/{id}", get(get_pull_request))
        .route("/{id}/approve", post(approve_pull_request))
        .route("/{id}/reject", post(reject_pull_request))
        .route("/{id}/close", post(close_pull_request))
        .route("/{id}/merge", post(merge_pull_request))
        .route("/{id}/votes", post(cast_vote))
}

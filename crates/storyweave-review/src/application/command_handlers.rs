//! Command handlers for the pull-request workflow.
//!
//! Orchestration over the validator, the diff resolver, and the state
//! machine: load, check permission, transition, persist. A merge prepares
//! its chapter write in memory and hands everything to the repository's
//! atomic commit; nothing here persists partial outcomes.

use tracing::warn;
use uuid::Uuid;

use storyweave_chapters::application::tree_builder;
use storyweave_chapters::domain::chapter::{
    Chapter, ChapterStatus, NewChapter, ReviewState, ReviewStatus,
};
use storyweave_chapters::domain::version::{ChapterVersion, EditKind};
use storyweave_chapters::repository::ChapterRepository;
use storyweave_core::clock::Clock;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::{Story, StoryRepository};
use storyweave_core::user::UserDirectory;
use storyweave_notifications::{NotificationContext, NotificationSink, NotificationType, build};
use storyweave_rules::{Capabilities, capabilities, effective_role};

use crate::application::validator;
use crate::domain::commands::{
    ApprovePullRequest, CastVote, ClosePullRequest, CreatePullRequest, MergePullRequest,
    RejectPullRequest,
};
use crate::domain::diff::{PrType, resolve_changes};
use crate::domain::pull_request::{NewPullRequest, PrStatus, PullRequest};
use crate::repository::{ChapterWrite, PullRequestRepository};

async fn load_pr(
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

async fn story_capabilities_for(
    user_id: Uuid,
    story_id: Uuid,
    stories: &dyn StoryRepository,
) -> Result<(Story, Capabilities), DomainError> {
    let story = stories
        .find_by_id(story_id)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::Story,
            reference: story_id.to_string(),
        })?;
    let assigned = stories.collaborator_role(user_id, story.id).await?;
    let role = effective_role(&story, user_id, assigned).ok_or_else(|| {
        DomainError::Forbidden(format!("user {user_id} holds no role on this story"))
    })?;
    Ok((story, capabilities(role)))
}

/// Notifies `recipient` about a workflow event on `pr`. Runs after the
/// triggering write has committed, so failures are logged and dropped.
/// Nobody is notified about their own action.
async fn notify_pr_event(
    kind: NotificationType,
    actor_id: Uuid,
    recipient: Uuid,
    pr: &PullRequest,
    story: Option<&Story>,
    users: &dyn UserDirectory,
    sink: &dyn NotificationSink,
) {
    if actor_id == recipient {
        return;
    }
    let actor = match users.display_name(actor_id).await {
        Ok(Some(name)) => name,
        Ok(None) => {
            warn!(%actor_id, "actor has no display name; skipping notification");
            return;
        }
        Err(error) => {
            warn!(%error, "display name lookup failed; skipping notification");
            return;
        }
    };

    let mut ctx = NotificationContext {
        actor: Some(actor),
        actor_id: Some(actor_id),
        pr_id: Some(pr.id),
        pr_title: Some(pr.title.clone()),
        rejection_reason: pr.rejection_reason.clone(),
        ..NotificationContext::default()
    };
    if let Some(story) = story {
        ctx.story_name = Some(story.title.clone());
        ctx.story_id = Some(story.id);
        ctx.story_slug = Some(story.slug.clone());
    }

    match build(kind, &ctx) {
        Ok(payload) => {
            if let Err(error) = sink.deliver(recipient, payload).await {
                warn!(%error, %recipient, "notification delivery failed");
            }
        }
        Err(error) => warn!(%error, "notification build failed"),
    }
}

fn merged_review_state(pr: &PullRequest) -> ReviewState {
    ReviewState {
        is_pr: true,
        status: ReviewStatus::Approved,
        submitted_at: Some(pr.created_at),
        reviewed_by: pr.reviewed_by,
        reviewed_at: pr.reviewed_at,
        rejection_reason: None,
    }
}

/// Handles the `CreatePullRequest` command: validates the proposal, resolves
/// its change payload, and persists it in state `OPEN`.
///
/// # Errors
///
/// Returns `DomainError` per the validator's contract, plus
/// `DomainError::Validation` for a blank title and `DomainError::Conflict`
/// when the insert loses the duplicate-open race.
pub async fn handle_create_pull_request(
    command: &CreatePullRequest,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    chapters: &dyn ChapterRepository,
    prs: &dyn PullRequestRepository,
    sink: &dyn NotificationSink,
) -> Result<PullRequest, DomainError> {
    if command.title.trim().is_empty() {
        return Err(DomainError::Validation {
            code: "empty_title",
            message: "proposal title must not be empty".to_owned(),
        });
    }

    let ctx = validator::validate_create(command, stories, chapters, prs).await?;

    let changes = resolve_changes(
        command.pr_type,
        ctx.target.as_ref().map(|c| c.content.as_str()),
        command.proposed_content.clone(),
    );

    let pr = PullRequest::open(
        NewPullRequest {
            id: command.pr_id,
            story_id: ctx.story.id,
            chapter_id: ctx.target_chapter_id(command.new_chapter_id),
            parent_chapter_id: ctx.parent_chapter_id(),
            author_id: command.user_id,
            pr_type: command.pr_type,
            title: command.title.clone(),
            description: command.description.clone(),
            changes,
            draft: command.draft,
            labels: command.labels.clone(),
            auto_approve: command.auto_approve,
        },
        clock.now(),
    );

    prs.insert(&pr).await?;

    if !pr.is_draft {
        notify_pr_event(
            NotificationType::PrSubmitted,
            pr.author_id,
            ctx.story.creator_id,
            &pr,
            Some(&ctx.story),
            users,
            sink,
        )
        .await;
    }

    Ok(pr)
}

/// Handles the `ApprovePullRequest` command.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` without `can_approve_prs`,
/// `DomainError::Conflict` on a finalized proposal, and
/// `DomainError::RuleViolation` when the proposal is not `OPEN`.
pub async fn handle_approve_pull_request(
    command: &ApprovePullRequest,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    prs: &dyn PullRequestRepository,
    sink: &dyn NotificationSink,
) -> Result<PullRequest, DomainError> {
    let mut pr = load_pr(command.pr_id, prs).await?;
    let (story, caps) = story_capabilities_for(command.reviewer_id, pr.story_id, stories).await?;
    if !caps.can_approve_prs {
        return Err(DomainError::Forbidden(
            "this role may not approve pull requests".to_owned(),
        ));
    }

    pr.approve(command.reviewer_id, command.notes.clone(), clock.now())?;
    prs.update(&pr).await?;

    notify_pr_event(
        NotificationType::PrApproved,
        command.reviewer_id,
        pr.author_id,
        &pr,
        Some(&story),
        users,
        sink,
    )
    .await;

    Ok(pr)
}

/// Handles the `RejectPullRequest` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank reason,
/// `DomainError::Forbidden` without `can_reject_prs`, and the state-machine
/// errors of [`PullRequest::reject`].
pub async fn handle_reject_pull_request(
    command: &RejectPullRequest,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    prs: &dyn PullRequestRepository,
    sink: &dyn NotificationSink,
) -> Result<PullRequest, DomainError> {
    if command.reason.trim().is_empty() {
        return Err(DomainError::Validation {
            code: "empty_rejection_reason",
            message: "a rejection needs a reason".to_owned(),
        });
    }

    let mut pr = load_pr(command.pr_id, prs).await?;
    let (story, caps) = story_capabilities_for(command.reviewer_id, pr.story_id, stories).await?;
    if !caps.can_reject_prs {
        return Err(DomainError::Forbidden(
            "this role may not reject pull requests".to_owned(),
        ));
    }

    pr.reject(command.reviewer_id, command.reason.clone(), clock.now())?;
    prs.update(&pr).await?;

    notify_pr_event(
        NotificationType::PrRejected,
        command.reviewer_id,
        pr.author_id,
        &pr,
        Some(&story),
        users,
        sink,
    )
    .await;

    Ok(pr)
}

/// Handles the `ClosePullRequest` command. The author may withdraw their own
/// proposal; reviewers (`can_approve_prs`) may close anyone's. Closing
/// produces no notification.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` for everyone else and
/// `DomainError::Conflict` on a finalized proposal.
pub async fn handle_close_pull_request(
    command: &ClosePullRequest,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    prs: &dyn PullRequestRepository,
) -> Result<PullRequest, DomainError> {
    let mut pr = load_pr(command.pr_id, prs).await?;
    if pr.author_id != command.user_id {
        let (_, caps) = story_capabilities_for(command.user_id, pr.story_id, stories).await?;
        if !caps.can_approve_prs {
            return Err(DomainError::Forbidden(
                "only the author or a reviewer may close a pull request".to_owned(),
            ));
        }
    }

    pr.close(command.user_id, clock.now())?;
    prs.update(&pr).await?;
    Ok(pr)
}

/// Handles the `MergePullRequest` command: transitions the proposal to
/// `MERGED` and applies its change to the chapter tree in one atomic commit.
///
/// A `NewChapter` merge materializes the chapter at its resolved tree
/// position; an edit or delete replaces the target's content conditional on
/// the content not having moved since submission. Either way the commit
/// writes the chapter, its new version snapshot, and the merged proposal
/// together or not at all.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` without `can_merge_prs`,
/// `DomainError::Conflict` on a finalized proposal or stale content,
/// `DomainError::RuleViolation` when the proposal is not `APPROVED` or the
/// target is deleted, and `DomainError::NotFound` when the target vanished.
pub async fn handle_merge_pull_request(
    command: &MergePullRequest,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    chapters: &dyn ChapterRepository,
    prs: &dyn PullRequestRepository,
    sink: &dyn NotificationSink,
) -> Result<PullRequest, DomainError> {
    let mut pr = load_pr(command.pr_id, prs).await?;
    let (story, caps) = story_capabilities_for(command.merger_id, pr.story_id, stories).await?;
    if !caps.can_merge_prs {
        return Err(DomainError::Forbidden(
            "this role may not merge pull requests".to_owned(),
        ));
    }

    let now = clock.now();
    // In-memory transition; nothing is durable until commit_merge.
    pr.mark_merged(command.merger_id, now)?;

    match pr.pr_type {
        PrType::NewChapter => {
            let position =
                tree_builder::resolve_position(&story, pr.parent_chapter_id, pr.author_id, chapters)
                    .await?;
            let chapter = Chapter::create(
                NewChapter {
                    id: pr.chapter_id,
                    story_id: story.id,
                    position,
                    author_id: pr.author_id,
                    title: pr.title.clone(),
                    content: pr.changes.proposed.clone(),
                    draft: false,
                    review: merged_review_state(&pr),
                },
                now,
            );
            let snapshot =
                ChapterVersion::capture(&chapter, EditKind::PrMerge, command.merger_id, now);
            prs.commit_merge(&pr, ChapterWrite::Insert(&chapter), &snapshot)
                .await?;
        }
        PrType::EditChapter | PrType::DeleteChapter => {
            let current = chapters.find_by_id(pr.chapter_id).await?.ok_or_else(|| {
                DomainError::NotFound {
                    kind: ResourceKind::Chapter,
                    reference: pr.chapter_id.to_string(),
                }
            })?;
            if current.status == ChapterStatus::Deleted {
                return Err(DomainError::RuleViolation(
                    "target chapter has been deleted".to_owned(),
                ));
            }
            if pr.changes.original.as_deref() != Some(current.content.as_str()) {
                return Err(DomainError::Conflict(
                    "chapter content changed since the proposal was submitted".to_owned(),
                ));
            }

            let expected_version = current.version;
            let mut updated = current;
            updated.apply_merge(
                &pr.changes.proposed,
                pr.pr_type == PrType::DeleteChapter,
                now,
            );
            let snapshot =
                ChapterVersion::capture(&updated, EditKind::PrMerge, command.merger_id, now);
            prs.commit_merge(
                &pr,
                ChapterWrite::Update {
                    chapter: &updated,
                    expected_version,
                },
                &snapshot,
            )
            .await?;
        }
    }

    notify_pr_event(
        NotificationType::PrMerged,
        command.merger_id,
        pr.author_id,
        &pr,
        Some(&story),
        users,
        sink,
    )
    .await;

    Ok(pr)
}

/// Handles the `CastVote` command. Votes carry no permission requirement;
/// when the vote pushes an auto-approvable proposal over its threshold
/// inside the time window, the proposal transitions to `APPROVED` with no
/// human reviewer.
///
/// # Errors
///
/// Returns `DomainError::Conflict` when the proposal is not `OPEN`.
pub async fn handle_cast_vote(
    command: &CastVote,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    prs: &dyn PullRequestRepository,
    sink: &dyn NotificationSink,
) -> Result<PullRequest, DomainError> {
    let mut pr = load_pr(command.pr_id, prs).await?;
    if pr.status != PrStatus::Open {
        return Err(DomainError::Conflict(format!(
            "pull request {} is not open for voting",
            pr.id
        )));
    }

    pr.record_vote(command.vote);
    let now = clock.now();
    let auto_approved = pr.should_auto_approve(now);
    if auto_approved {
        pr.auto_approve(command.voter_id, now)?;
    }
    prs.update(&pr).await?;

    if auto_approved {
        let story = match stories.find_by_id(pr.story_id).await {
            Ok(story) => story,
            Err(error) => {
                warn!(%error, "story lookup failed for notification");
                None
            }
        };
        notify_pr_event(
            NotificationType::PrApproved,
            command.voter_id,
            pr.author_id,
            &pr,
            story.as_ref(),
            users,
            sink,
        )
        .await;
    }

    Ok(pr)
}

// Tests live in tests/command_handlers.rs: the in-memory store used as a test
// double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

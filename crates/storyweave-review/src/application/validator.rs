//! Proposal admission checks.
//!
//! Pure gatekeeping ahead of persistence: permission, referential integrity,
//! and the duplicate-open-proposal rule. Everything loaded here is returned
//! so the create handler never re-reads what was already checked.

use uuid::Uuid;

use storyweave_chapters::domain::chapter::{Chapter, ChapterStatus};
use storyweave_chapters::repository::ChapterRepository;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::{Story, StoryRepository};
use storyweave_rules::{Capabilities, capabilities, effective_role, has_duplicate_open_pr};

use crate::domain::commands::CreatePullRequest;
use crate::domain::diff::PrType;
use crate::repository::PullRequestRepository;

/// Everything a validated proposal needs to materialize.
#[derive(Debug)]
pub struct ProposalContext {
    /// The story the proposal targets.
    pub story: Story,
    /// What the proposing user may do on that story.
    pub capabilities: Capabilities,
    /// The chapter being edited or deleted; `None` for `NewChapter`.
    pub target: Option<Chapter>,
    /// The parent a `NewChapter` proposal attaches under; `None` otherwise.
    pub parent: Option<Chapter>,
}

impl ProposalContext {
    /// The chapter id the proposal targets: the loaded target's id, or the
    /// pre-allocated id a `NewChapter` proposal will take on merge.
    #[must_use]
    pub fn target_chapter_id(&self, new_chapter_id: Uuid) -> Uuid {
        self.target.as_ref().map_or(new_chapter_id, |c| c.id)
    }

    /// The parent of the proposal's target chapter, when one is known.
    #[must_use]
    pub fn parent_chapter_id(&self) -> Option<Uuid> {
        match (&self.target, &self.parent) {
            (Some(target), _) => target.parent_chapter_id,
            (None, parent) => parent.as_ref().map(|p| p.id),
        }
    }
}

pub(crate) async fn load_story_for(
    user_id: Uuid,
    story_slug: &str,
    stories: &dyn StoryRepository,
) -> Result<(Story, Capabilities), DomainError> {
    let story = stories
        .find_by_slug(story_slug)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::Story,
            reference: story_slug.to_owned(),
        })?;
    let assigned = stories.collaborator_role(user_id, story.id).await?;
    let role = effective_role(&story, user_id, assigned).ok_or_else(|| {
        DomainError::Forbidden(format!("user {user_id} holds no role on this story"))
    })?;
    Ok((story, capabilities(role)))
}

async fn load_story_chapter(
    story_id: Uuid,
    slug: &str,
    chapters: &dyn ChapterRepository,
) -> Result<Chapter, DomainError> {
    chapters
        .find_by_slug(story_id, slug)
        .await?
        .ok_or_else(|| DomainError::NotFound {
            kind: ResourceKind::Chapter,
            reference: slug.to_owned(),
        })
}

/// Admits or rejects a proposal before anything is written.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` when the author may not write chapters,
/// `DomainError::Validation` for missing references or a nonsensical
/// auto-approve rule, `DomainError::NotFound` when a referenced chapter is
/// absent from the story, `DomainError::RuleViolation` when the proposal
/// touches deleted content, and `DomainError::Conflict` when the author
/// already has an open proposal against the same chapter.
pub async fn validate_create(
    command: &CreatePullRequest,
    stories: &dyn StoryRepository,
    chapters: &dyn ChapterRepository,
    prs: &dyn PullRequestRepository,
) -> Result<ProposalContext, DomainError> {
    let (story, caps) = load_story_for(command.user_id, &command.story_slug, stories).await?;
    if !caps.can_write_chapters {
        return Err(DomainError::Forbidden(
            "this role may not propose changes".to_owned(),
        ));
    }

    if command.auto_approve.enabled
        && (command.auto_approve.threshold < 1 || command.auto_approve.time_window_secs < 1)
    {
        return Err(DomainError::Validation {
            code: "invalid_auto_approve_policy",
            message: "auto-approve needs a positive threshold and time window".to_owned(),
        });
    }

    let (target, parent) = match command.pr_type {
        PrType::NewChapter => {
            let Some(parent_slug) = command.parent_chapter_slug.as_deref() else {
                return Err(DomainError::Validation {
                    code: "missing_parent_chapter",
                    message: "a new-chapter proposal needs a parent chapter".to_owned(),
                });
            };
            let parent = load_story_chapter(story.id, parent_slug, chapters).await?;
            if parent.status == ChapterStatus::Deleted {
                return Err(DomainError::RuleViolation(
                    "cannot branch from a deleted chapter".to_owned(),
                ));
            }
            (None, Some(parent))
        }
        PrType::EditChapter | PrType::DeleteChapter => {
            let Some(chapter_slug) = command.chapter_slug.as_deref() else {
                return Err(DomainError::Validation {
                    code: "missing_target_chapter",
                    message: "this proposal kind needs a target chapter".to_owned(),
                });
            };
            let target = load_story_chapter(story.id, chapter_slug, chapters).await?;
            if target.status == ChapterStatus::Deleted {
                return Err(DomainError::RuleViolation(
                    "cannot propose changes to a deleted chapter".to_owned(),
                ));
            }

            let open_targets = prs.open_target_ids(command.user_id).await?;
            if has_duplicate_open_pr(target.id, open_targets) {
                return Err(DomainError::Conflict(
                    "author already has an open pull request for this chapter".to_owned(),
                ));
            }
            (Some(target), None)
        }
    };

    Ok(ProposalContext {
        story,
        capabilities: caps,
        target,
        parent,
    })
}

// Tests live in tests/validator.rs: the in-memory store used as a test
// double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

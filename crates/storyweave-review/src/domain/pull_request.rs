//! The pull-request entity and its review state machine.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storyweave_core::error::DomainError;

use super::diff::{ChangeSet, PrType};

/// Workflow state of a pull request.
///
/// `Rejected`, `Closed`, and `Merged` are terminal; a finalized pull request
/// never changes state again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrStatus {
    /// Submitted and under review.
    Open,
    /// Accepted by a reviewer or by auto-approval; awaiting merge.
    Approved,
    /// Turned down. Terminal.
    Rejected,
    /// Withdrawn or abandoned. Terminal.
    Closed,
    /// Applied to the chapter tree. Terminal.
    Merged,
}

impl PrStatus {
    /// True iff no transition may leave this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Closed | Self::Merged)
    }

    /// The states reachable from this one.
    #[must_use]
    pub const fn allowed_transitions(self) -> &'static [Self] {
        match self {
            Self::Open => &[Self::Approved, Self::Rejected, Self::Closed],
            Self::Approved => &[Self::Merged, Self::Closed],
            Self::Rejected | Self::Closed | Self::Merged => &[],
        }
    }

    /// True iff `next` is directly reachable from this state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_transitions().contains(&next)
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "OPEN",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
            Self::Merged => "MERGED",
        };
        f.write_str(name)
    }
}

/// Editorial tags a proposal can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrLabel {
    Plot,
    Dialogue,
    Grammar,
    Pacing,
    Worldbuilding,
    Continuity,
}

/// A vote cast on an open proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Vote {
    Up,
    Down,
}

/// Community vote counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Votes {
    /// Upvote count.
    pub upvotes: u32,
    /// Downvote count.
    pub downvotes: u32,
}

impl Votes {
    /// Net score, `upvotes − downvotes`.
    #[must_use]
    pub fn score(self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }
}

/// Auto-approval rule attached to a proposal. The default rule is disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoApprovePolicy {
    /// Whether the rule is active.
    pub enabled: bool,
    /// Net vote score that triggers approval.
    pub threshold: i64,
    /// Seconds after creation during which the rule applies.
    pub time_window_secs: i64,
}

/// Engagement counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrStats {
    /// Page view count.
    pub views: u64,
    /// Discussion thread count.
    pub discussions: u64,
}

/// A recorded workflow action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineAction {
    Created,
    Approved,
    AutoApproved,
    Rejected,
    Closed,
    Merged,
}

/// One append-only audit entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// What happened.
    pub action: TimelineAction,
    /// Who did it. For auto-approval, the voter whose vote crossed the
    /// threshold.
    pub performed_by: Uuid,
    /// When it happened.
    pub performed_at: DateTime<Utc>,
}

/// Inputs for opening a pull request.
#[derive(Debug)]
pub struct NewPullRequest {
    /// Pre-allocated pull request id.
    pub id: Uuid,
    /// The story the proposal targets.
    pub story_id: Uuid,
    /// Target chapter. For `NewChapter` proposals, the pre-allocated id the
    /// chapter will take if merged.
    pub chapter_id: Uuid,
    /// Parent of the target chapter, when known.
    pub parent_chapter_id: Option<Uuid>,
    /// The proposing user.
    pub author_id: Uuid,
    /// Kind of change proposed.
    pub pr_type: PrType,
    /// Proposal title. For `NewChapter`, also the merged chapter's title.
    pub title: String,
    /// Free-form rationale.
    pub description: Option<String>,
    /// Resolved change payload.
    pub changes: ChangeSet,
    /// Whether the proposal starts as a draft.
    pub draft: bool,
    /// Editorial tags.
    pub labels: Vec<PrLabel>,
    /// Auto-approval rule.
    pub auto_approve: AutoApprovePolicy,
}

/// A proposed change to the chapter tree, tracked through review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request identifier.
    pub id: Uuid,
    /// The story the proposal targets.
    pub story_id: Uuid,
    /// Target chapter; for `NewChapter`, the id the chapter takes on merge.
    pub chapter_id: Uuid,
    /// Parent of the target chapter, when known.
    pub parent_chapter_id: Option<Uuid>,
    /// The proposing user.
    pub author_id: Uuid,
    /// Kind of change proposed.
    pub pr_type: PrType,
    /// Proposal title.
    pub title: String,
    /// Free-form rationale.
    pub description: Option<String>,
    /// Change payload resolved at submission time.
    pub changes: ChangeSet,
    /// Workflow state.
    pub status: PrStatus,
    /// Whether the proposal is a draft.
    pub is_draft: bool,
    /// Reviewer who decided; `None` for auto-approval.
    pub reviewed_by: Option<Uuid>,
    /// When the review decision was made.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reviewer notes attached on approval.
    pub review_notes: Option<String>,
    /// Reason recorded on rejection.
    pub rejection_reason: Option<String>,
    /// When the proposal was merged.
    pub merged_at: Option<DateTime<Utc>>,
    /// Who merged it.
    pub merged_by: Option<Uuid>,
    /// Community votes.
    pub votes: Votes,
    /// Comment count.
    pub comment_count: u64,
    /// Editorial tags.
    pub labels: Vec<PrLabel>,
    /// Auto-approval rule.
    pub auto_approve: AutoApprovePolicy,
    /// Engagement counters.
    pub stats: PrStats,
    /// Append-only audit trail, oldest first.
    pub timeline: Vec<TimelineEntry>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last state change.
    pub updated_at: DateTime<Utc>,
}

impl PullRequest {
    /// Opens a new pull request in state `OPEN` with a `CREATED` timeline
    /// entry.
    #[must_use]
    pub fn open(params: NewPullRequest, at: DateTime<Utc>) -> Self {
        Self {
            id: params.id,
            story_id: params.story_id,
            chapter_id: params.chapter_id,
            parent_chapter_id: params.parent_chapter_id,
            author_id: params.author_id,
            pr_type: params.pr_type,
            title: params.title,
            description: params.description,
            changes: params.changes,
            status: PrStatus::Open,
            is_draft: params.draft,
            reviewed_by: None,
            reviewed_at: None,
            review_notes: None,
            rejection_reason: None,
            merged_at: None,
            merged_by: None,
            votes: Votes::default(),
            comment_count: 0,
            labels: params.labels,
            auto_approve: params.auto_approve,
            stats: PrStats::default(),
            timeline: vec![TimelineEntry {
                action: TimelineAction::Created,
                performed_by: params.author_id,
                performed_at: at,
            }],
            created_at: at,
            updated_at: at,
        }
    }

    /// Guards a state transition. Finalized proposals conflict; reachable
    /// states that are simply not adjacent violate the workflow rules.
    fn guard_transition(&self, next: PrStatus) -> Result<(), DomainError> {
        if self.status.is_terminal() {
            return Err(DomainError::Conflict(format!(
                "pull request {} is already finalized as {}",
                self.id, self.status
            )));
        }
        if !self.status.can_transition_to(next) {
            return Err(DomainError::RuleViolation(format!(
                "invalid pull request transition {} -> {next}",
                self.status
            )));
        }
        Ok(())
    }

    fn record(&mut self, action: TimelineAction, performed_by: Uuid, at: DateTime<Utc>) {
        self.timeline.push(TimelineEntry {
            action,
            performed_by,
            performed_at: at,
        });
        self.updated_at = at;
    }

    /// Approves the proposal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] when already finalized and
    /// [`DomainError::RuleViolation`] when not currently `OPEN`.
    pub fn approve(
        &mut self,
        reviewer_id: Uuid,
        notes: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.guard_transition(PrStatus::Approved)?;
        self.status = PrStatus::Approved;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(at);
        self.review_notes = notes;
        self.record(TimelineAction::Approved, reviewer_id, at);
        Ok(())
    }

    /// Approves the proposal on behalf of the community vote rule. No human
    /// reviewer is recorded; the timeline names the voter whose vote crossed
    /// the threshold.
    ///
    /// # Errors
    ///
    /// Same guard as [`PullRequest::approve`].
    pub fn auto_approve(
        &mut self,
        triggered_by: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.guard_transition(PrStatus::Approved)?;
        self.status = PrStatus::Approved;
        self.reviewed_at = Some(at);
        self.record(TimelineAction::AutoApproved, triggered_by, at);
        Ok(())
    }

    /// Rejects the proposal with a reason.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] when already finalized and
    /// [`DomainError::RuleViolation`] when not currently `OPEN`.
    pub fn reject(
        &mut self,
        reviewer_id: Uuid,
        reason: String,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        self.guard_transition(PrStatus::Rejected)?;
        self.status = PrStatus::Rejected;
        self.reviewed_by = Some(reviewer_id);
        self.reviewed_at = Some(at);
        self.rejection_reason = Some(reason);
        self.record(TimelineAction::Rejected, reviewer_id, at);
        Ok(())
    }

    /// Withdraws the proposal.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] when already finalized.
    pub fn close(&mut self, actor_id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.guard_transition(PrStatus::Closed)?;
        self.status = PrStatus::Closed;
        self.record(TimelineAction::Closed, actor_id, at);
        Ok(())
    }

    /// Marks the proposal merged. Callers persist the paired chapter write
    /// and this state change as one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Conflict`] when already finalized and
    /// [`DomainError::RuleViolation`] when not currently `APPROVED`.
    pub fn mark_merged(&mut self, merger_id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        self.guard_transition(PrStatus::Merged)?;
        self.status = PrStatus::Merged;
        self.merged_by = Some(merger_id);
        self.merged_at = Some(at);
        self.record(TimelineAction::Merged, merger_id, at);
        Ok(())
    }

    /// Counts a vote. Callers gate on [`PrStatus::Open`].
    pub fn record_vote(&mut self, vote: Vote) {
        match vote {
            Vote::Up => self.votes.upvotes += 1,
            Vote::Down => self.votes.downvotes += 1,
        }
    }

    /// True iff the auto-approval rule fires: enabled, score at or above the
    /// threshold, and still inside the time window measured from creation.
    #[must_use]
    pub fn should_auto_approve(&self, at: DateTime<Utc>) -> bool {
        self.status == PrStatus::Open
            && self.auto_approve.enabled
            && self.votes.score() >= self.auto_approve.threshold
            && at.signed_duration_since(self.created_at)
                <= Duration::seconds(self.auto_approve.time_window_secs)
    }
}

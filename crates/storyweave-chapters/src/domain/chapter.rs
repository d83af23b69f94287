//! The chapter entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tree::TreePosition;

/// Lifecycle status of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChapterStatus {
    /// Visible to its author and story collaborators only.
    Draft,
    /// Part of the readable tree.
    Active,
    /// Soft-deleted. The node stays in the tree; nothing may branch from it.
    Deleted,
}

/// Review outcome recorded on a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewStatus {
    /// Submitted, awaiting a decision.
    Pending,
    /// Accepted into the tree.
    Approved,
    /// Turned down.
    Rejected,
}

/// Review state embedded in a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Whether this chapter arrived through the pull-request workflow.
    pub is_pr: bool,
    /// Outcome of the review.
    pub status: ReviewStatus,
    /// When the submission entered review.
    pub submitted_at: Option<DateTime<Utc>>,
    /// Reviewer who decided, if a human did.
    pub reviewed_by: Option<Uuid>,
    /// When the decision was made.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reason recorded on rejection.
    pub rejection_reason: Option<String>,
}

impl ReviewState {
    /// State for a chapter created directly by a collaborator: no review
    /// happened, the content lands approved.
    #[must_use]
    pub fn direct() -> Self {
        Self {
            is_pr: false,
            status: ReviewStatus::Approved,
            submitted_at: None,
            reviewed_by: None,
            reviewed_at: None,
            rejection_reason: None,
        }
    }
}

/// Engagement and moderation counters on a chapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterStats {
    /// Read count.
    pub reads: u64,
    /// Comment count.
    pub comments: u64,
    /// Number of chapters branching directly off this one.
    pub child_branches: u32,
    /// Number of open reports against this chapter.
    pub report_count: u32,
    /// Whether moderation has flagged this chapter.
    pub is_flagged: bool,
}

/// A node in a story's branching content tree.
///
/// `ancestor_ids` and `depth` are set once at creation and never change;
/// `version` only ever increases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter identifier.
    pub id: Uuid,
    /// The story this chapter belongs to.
    pub story_id: Uuid,
    /// Parent node; `None` only for the story root.
    pub parent_chapter_id: Option<Uuid>,
    /// Ancestor chain, root first, excluding this chapter.
    pub ancestor_ids: Vec<Uuid>,
    /// Distance from the root; always `ancestor_ids.len()`.
    pub depth: u32,
    /// URL slug, unique within the story.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Narrative content.
    pub content: String,
    /// The user who wrote this chapter.
    pub author_id: Uuid,
    /// Content version, starting at 1.
    pub version: i64,
    /// Lifecycle status.
    pub status: ChapterStatus,
    /// Embedded review state.
    pub review: ReviewState,
    /// Engagement and moderation counters.
    pub stats: ChapterStats,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last content change.
    pub updated_at: DateTime<Utc>,
}

/// Inputs for materializing a new chapter.
#[derive(Debug)]
pub struct NewChapter {
    /// Pre-allocated chapter id.
    pub id: Uuid,
    /// Owning story.
    pub story_id: Uuid,
    /// Resolved position in the tree.
    pub position: TreePosition,
    /// Author of the content.
    pub author_id: Uuid,
    /// Display title.
    pub title: String,
    /// Narrative content.
    pub content: String,
    /// Whether the chapter starts as a draft.
    pub draft: bool,
    /// Review state to embed.
    pub review: ReviewState,
}

impl Chapter {
    /// Materializes a chapter at its resolved tree position.
    #[must_use]
    pub fn create(params: NewChapter, at: DateTime<Utc>) -> Self {
        let slug = derive_slug(&params.title, params.id);
        let status = if params.draft {
            ChapterStatus::Draft
        } else {
            ChapterStatus::Active
        };
        Self {
            id: params.id,
            story_id: params.story_id,
            parent_chapter_id: params.position.parent.as_ref().map(|p| p.id),
            ancestor_ids: params.position.ancestor_ids,
            depth: params.position.depth,
            slug,
            title: params.title,
            content: params.content,
            author_id: params.author_id,
            version: 1,
            status,
            review: params.review,
            stats: ChapterStats::default(),
            created_at: at,
            updated_at: at,
        }
    }

    /// True iff this chapter is its story's root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_chapter_id.is_none()
    }

    /// Applies a merged proposal: content replaced, version advanced, and for
    /// deletion proposals the status tombstoned.
    pub fn apply_merge(&mut self, proposed: &str, delete: bool, at: DateTime<Utc>) {
        self.content = proposed.to_owned();
        self.version += 1;
        if delete {
            self.status = ChapterStatus::Deleted;
        }
        self.updated_at = at;
    }
}

/// Derives a URL slug from a chapter title and id.
///
/// Lowercased alphanumeric runs joined by hyphens, suffixed with the first
/// eight hex characters of the id so sibling chapters sharing a title stay
/// distinct.
#[must_use]
pub fn derive_slug(title: &str, id: Uuid) -> String {
    let stem = title
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let id_hex = id.simple().to_string();
    let tag = &id_hex[..8];
    if stem.is_empty() {
        format!("chapter-{tag}")
    } else {
        format!("{stem}-{tag}")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::tree;

    #[test]
    fn test_create_root_chapter_sets_tree_metadata_and_version_one() {
        // Arrange
        let id = Uuid::new_v4();
        let story_id = Uuid::new_v4();
        let author_id = Uuid::new_v4();
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

        // Act
        let chapter = Chapter::create(
            NewChapter {
                id,
                story_id,
                position: tree::root_position(),
                author_id,
                title: "Prologue".to_owned(),
                content: "It begins.".to_owned(),
                draft: false,
                review: ReviewState::direct(),
            },
            at,
        );

        // Assert
        assert!(chapter.is_root());
        assert!(chapter.ancestor_ids.is_empty());
        assert_eq!(chapter.depth, 0);
        assert_eq!(chapter.version, 1);
        assert_eq!(chapter.status, ChapterStatus::Active);
        assert_eq!(chapter.created_at, at);
        assert_eq!(chapter.updated_at, at);
        assert!(chapter.slug.starts_with("prologue-"));
    }

    #[test]
    fn test_create_draft_chapter_starts_in_draft_status() {
        let chapter = Chapter::create(
            NewChapter {
                id: Uuid::new_v4(),
                story_id: Uuid::new_v4(),
                position: tree::root_position(),
                author_id: Uuid::new_v4(),
                title: "Prologue".to_owned(),
                content: String::new(),
                draft: true,
                review: ReviewState::direct(),
            },
            Utc::now(),
        );

        assert_eq!(chapter.status, ChapterStatus::Draft);
    }

    #[test]
    fn test_apply_merge_replaces_content_and_advances_version() {
        // Arrange
        let mut chapter = Chapter::create(
            NewChapter {
                id: Uuid::new_v4(),
                story_id: Uuid::new_v4(),
                position: tree::root_position(),
                author_id: Uuid::new_v4(),
                title: "Prologue".to_owned(),
                content: "Old text.".to_owned(),
                draft: false,
                review: ReviewState::direct(),
            },
            Utc::now(),
        );
        let merged_at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();

        // Act
        chapter.apply_merge("New text.", false, merged_at);

        // Assert
        assert_eq!(chapter.content, "New text.");
        assert_eq!(chapter.version, 2);
        assert_eq!(chapter.status, ChapterStatus::Active);
        assert_eq!(chapter.updated_at, merged_at);
    }

    #[test]
    fn test_apply_merge_with_delete_tombstones_the_chapter() {
        let mut chapter = Chapter::create(
            NewChapter {
                id: Uuid::new_v4(),
                story_id: Uuid::new_v4(),
                position: tree::root_position(),
                author_id: Uuid::new_v4(),
                title: "Prologue".to_owned(),
                content: "Doomed text.".to_owned(),
                draft: false,
                review: ReviewState::direct(),
            },
            Utc::now(),
        );

        chapter.apply_merge("", true, Utc::now());

        assert_eq!(chapter.status, ChapterStatus::Deleted);
        assert_eq!(chapter.content, "");
        assert_eq!(chapter.version, 2);
    }

    #[test]
    fn test_derive_slug_normalizes_punctuation_and_case() {
        let id = Uuid::new_v4();
        let slug = derive_slug("The King's  Road!", id);

        let tag = &id.simple().to_string()[..8];
        assert_eq!(slug, format!("the-king-s-road-{tag}"));
    }

    #[test]
    fn test_derive_slug_falls_back_for_non_ascii_titles() {
        let id = Uuid::new_v4();
        let slug = derive_slug("幕間", id);

        assert!(slug.starts_with("chapter-"));
    }
}

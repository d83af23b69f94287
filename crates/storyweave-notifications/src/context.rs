//! Notification context and per-field validation metadata.

use uuid::Uuid;

/// A context field a notification type may require or use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextField {
    /// Display name of the acting user.
    Actor,
    /// Id of the acting user.
    ActorId,
    /// Username of the acting user, preferred for profile links.
    ActorUsername,
    /// Story title.
    StoryName,
    /// Story id.
    StoryId,
    /// Story URL slug.
    StorySlug,
    /// Chapter title.
    ChapterTitle,
    /// Chapter id.
    ChapterId,
    /// Chapter URL slug.
    ChapterSlug,
    /// Pull request id.
    PrId,
    /// Pull request title.
    PrTitle,
    /// Comment id.
    CommentId,
    /// Short excerpt of a comment.
    CommentExcerpt,
    /// Collaborator role name.
    Role,
    /// Badge name.
    BadgeName,
    /// Reason attached to a rejection.
    RejectionReason,
}

/// Error code shared by fields without a dedicated one.
pub const GENERIC_MISSING_FIELD: &str = "missing_required_field";

impl ContextField {
    /// Wire name of the field, matching inbound event payloads.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::ActorId => "actorId",
            Self::ActorUsername => "actorUsername",
            Self::StoryName => "storyName",
            Self::StoryId => "storyId",
            Self::StorySlug => "storySlug",
            Self::ChapterTitle => "chapterTitle",
            Self::ChapterId => "chapterId",
            Self::ChapterSlug => "chapterSlug",
            Self::PrId => "prId",
            Self::PrTitle => "prTitle",
            Self::CommentId => "commentId",
            Self::CommentExcerpt => "commentExcerpt",
            Self::Role => "role",
            Self::BadgeName => "badgeName",
            Self::RejectionReason => "rejectionReason",
        }
    }

    /// Error code reported when this field is required but absent. Common
    /// fields carry a dedicated code; the rest fall back to
    /// [`GENERIC_MISSING_FIELD`].
    #[must_use]
    pub const fn missing_code(self) -> &'static str {
        match self {
            Self::Actor => "missing_actor",
            Self::ActorId => "missing_actor_id",
            Self::StoryName => "missing_story_name",
            Self::ChapterTitle => "missing_chapter_title",
            Self::PrId => "missing_pr_id",
            Self::PrTitle => "missing_pr_title",
            Self::Role => "missing_role",
            Self::BadgeName => "missing_badge_name",
            _ => GENERIC_MISSING_FIELD,
        }
    }
}

/// Context assembled by a workflow event and consumed by the factory.
///
/// Every field is optional at the type level; each notification type declares
/// which ones it requires. Fields used only for deep-links are never
/// required — the URL resolver degrades to `None` instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationContext {
    /// Display name of the acting user.
    pub actor: Option<String>,
    /// Id of the acting user.
    pub actor_id: Option<Uuid>,
    /// Username of the acting user.
    pub actor_username: Option<String>,
    /// Story title.
    pub story_name: Option<String>,
    /// Story id.
    pub story_id: Option<Uuid>,
    /// Story URL slug.
    pub story_slug: Option<String>,
    /// Chapter title.
    pub chapter_title: Option<String>,
    /// Chapter id.
    pub chapter_id: Option<Uuid>,
    /// Chapter URL slug.
    pub chapter_slug: Option<String>,
    /// Pull request id.
    pub pr_id: Option<Uuid>,
    /// Pull request title.
    pub pr_title: Option<String>,
    /// Comment id.
    pub comment_id: Option<Uuid>,
    /// Short excerpt of a comment.
    pub comment_excerpt: Option<String>,
    /// Collaborator role name.
    pub role: Option<String>,
    /// Badge name.
    pub badge_name: Option<String>,
    /// Reason attached to a rejection.
    pub rejection_reason: Option<String>,
}

impl NotificationContext {
    /// Returns the rendered value of `field`, if present. Ids render in
    /// canonical hyphenated form.
    #[must_use]
    pub fn get(&self, field: ContextField) -> Option<String> {
        match field {
            ContextField::Actor => self.actor.clone(),
            ContextField::ActorId => self.actor_id.map(|id| id.to_string()),
            ContextField::ActorUsername => self.actor_username.clone(),
            ContextField::StoryName => self.story_name.clone(),
            ContextField::StoryId => self.story_id.map(|id| id.to_string()),
            ContextField::StorySlug => self.story_slug.clone(),
            ContextField::ChapterTitle => self.chapter_title.clone(),
            ContextField::ChapterId => self.chapter_id.map(|id| id.to_string()),
            ContextField::ChapterSlug => self.chapter_slug.clone(),
            ContextField::PrId => self.pr_id.map(|id| id.to_string()),
            ContextField::PrTitle => self.pr_title.clone(),
            ContextField::CommentId => self.comment_id.map(|id| id.to_string()),
            ContextField::CommentExcerpt => self.comment_excerpt.clone(),
            ContextField::Role => self.role.clone(),
            ContextField::BadgeName => self.badge_name.clone(),
            ContextField::RejectionReason => self.rejection_reason.clone(),
        }
    }

    /// True iff `field` carries a value.
    #[must_use]
    pub fn has(&self, field: ContextField) -> bool {
        self.get(field).is_some()
    }
}

/// A required field found missing, with its error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField {
    /// The absent field.
    pub field: ContextField,
    /// The code reported for it.
    pub code: &'static str,
}

/// Outcome of validating a context against a type's requirements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// True iff every required field was present.
    pub is_valid: bool,
    /// Every missing field, in declaration order.
    pub errors: Vec<MissingField>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_renders_ids_in_hyphenated_form() {
        let id = Uuid::new_v4();
        let ctx = NotificationContext {
            actor_id: Some(id),
            ..NotificationContext::default()
        };

        assert_eq!(ctx.get(ContextField::ActorId), Some(id.to_string()));
        assert!(ctx.has(ContextField::ActorId));
        assert!(!ctx.has(ContextField::Actor));
    }

    #[test]
    fn test_common_fields_carry_dedicated_codes() {
        assert_eq!(ContextField::Actor.missing_code(), "missing_actor");
        assert_eq!(ContextField::ActorId.missing_code(), "missing_actor_id");
        assert_eq!(ContextField::Role.missing_code(), "missing_role");
    }

    #[test]
    fn test_link_only_fields_fall_back_to_generic_code() {
        assert_eq!(ContextField::StorySlug.missing_code(), GENERIC_MISSING_FIELD);
        assert_eq!(ContextField::CommentId.missing_code(), GENERIC_MISSING_FIELD);
        assert_eq!(
            ContextField::RejectionReason.missing_code(),
            GENERIC_MISSING_FIELD
        );
    }
}

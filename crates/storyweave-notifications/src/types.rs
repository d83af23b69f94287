//! The closed set of notification types and their per-type configuration.

use serde::{Deserialize, Serialize};

use crate::actions::ActionCategory;
use crate::context::ContextField;

/// Every notification the platform can produce.
///
/// Each variant fixes its required context fields, its deep-link category,
/// and its text template; adding a variant without extending the matches
/// below is a compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Someone started following the recipient.
    NewFollower,
    /// Someone commented on the recipient's chapter.
    NewComment,
    /// Someone replied to the recipient's comment.
    CommentReply,
    /// A collaborator published a chapter in a story the recipient owns.
    ChapterPublished,
    /// The recipient's submitted chapter was approved.
    ChapterApproved,
    /// The recipient's submitted chapter was rejected.
    ChapterRejected,
    /// A pull request was opened against the recipient's story.
    PrSubmitted,
    /// The recipient's pull request was approved.
    PrApproved,
    /// The recipient's pull request was rejected.
    PrRejected,
    /// The recipient's pull request was merged.
    PrMerged,
    /// The recipient was invited to collaborate on a story.
    CollabInvitation,
    /// The recipient's collaborator role changed.
    CollabRoleChanged,
    /// The recipient was removed from a story's collaborators.
    CollabRemoved,
    /// The recipient earned a badge.
    BadgeEarned,
}

impl NotificationType {
    /// Context fields this type's template interpolates; all must be present
    /// for the payload to build.
    #[must_use]
    pub const fn required_fields(self) -> &'static [ContextField] {
        match self {
            Self::NewFollower => &[ContextField::Actor, ContextField::ActorId],
            Self::NewComment => &[ContextField::Actor, ContextField::ChapterTitle],
            Self::CommentReply => &[ContextField::Actor],
            Self::ChapterPublished => &[
                ContextField::Actor,
                ContextField::StoryName,
                ContextField::ChapterTitle,
            ],
            Self::ChapterApproved | Self::ChapterRejected => {
                &[ContextField::ChapterTitle, ContextField::StoryName]
            }
            Self::PrSubmitted => &[
                ContextField::Actor,
                ContextField::StoryName,
                ContextField::PrTitle,
            ],
            Self::PrApproved | Self::PrRejected => {
                &[ContextField::Actor, ContextField::PrTitle]
            }
            Self::PrMerged => &[
                ContextField::Actor,
                ContextField::PrTitle,
                ContextField::StoryName,
            ],
            Self::CollabInvitation => &[
                ContextField::Actor,
                ContextField::StoryName,
                ContextField::Role,
            ],
            Self::CollabRoleChanged => &[ContextField::StoryName, ContextField::Role],
            Self::CollabRemoved => &[ContextField::StoryName],
            Self::BadgeEarned => &[ContextField::BadgeName],
        }
    }

    /// The deep-link category for this type. `None` means the notification
    /// deliberately links nowhere.
    #[must_use]
    pub const fn action_category(self) -> Option<ActionCategory> {
        match self {
            Self::NewFollower => Some(ActionCategory::User),
            Self::NewComment | Self::CommentReply => Some(ActionCategory::Comment),
            Self::ChapterPublished | Self::ChapterApproved | Self::ChapterRejected => {
                Some(ActionCategory::Chapter)
            }
            Self::PrSubmitted | Self::PrApproved | Self::PrRejected | Self::PrMerged => {
                Some(ActionCategory::Pr)
            }
            Self::CollabInvitation | Self::CollabRoleChanged => {
                Some(ActionCategory::Collaborators)
            }
            // The recipient just lost access; there is nowhere useful to go.
            Self::CollabRemoved => None,
            Self::BadgeEarned => Some(ActionCategory::Badges),
        }
    }

    /// Every type, for exhaustive table tests.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NewFollower,
            Self::NewComment,
            Self::CommentReply,
            Self::ChapterPublished,
            Self::ChapterApproved,
            Self::ChapterRejected,
            Self::PrSubmitted,
            Self::PrApproved,
            Self::PrRejected,
            Self::PrMerged,
            Self::CollabInvitation,
            Self::CollabRoleChanged,
            Self::CollabRemoved,
            Self::BadgeEarned,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_type_requires_at_least_one_field() {
        for kind in NotificationType::all() {
            assert!(
                !kind.required_fields().is_empty(),
                "{kind:?} requires no fields"
            );
        }
    }

    #[test]
    fn test_serializes_to_screaming_snake_case() {
        let json = serde_json::to_string(&NotificationType::CollabInvitation).unwrap();
        assert_eq!(json, "\"COLLAB_INVITATION\"");
        let json = serde_json::to_string(&NotificationType::PrMerged).unwrap();
        assert_eq!(json, "\"PR_MERGED\"");
    }

    #[test]
    fn test_collab_removed_links_nowhere() {
        assert_eq!(NotificationType::CollabRemoved.action_category(), None);
    }
}

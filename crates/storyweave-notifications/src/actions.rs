//! Action URL resolution.
//!
//! Each notification type maps to at most one [`ActionCategory`]; the
//! category plus the context determine the deep link. Resolution degrades
//! gracefully: when the context lacks the identifiers a category needs, the
//! payload ships without an action URL instead of failing the build.

use crate::context::{ContextField, NotificationContext};

/// Where a notification's action link points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// The acting user's profile.
    User,
    /// A comment, anchored inside its chapter page.
    Comment,
    /// A chapter page.
    Chapter,
    /// A pull request page.
    Pr,
    /// A story's collaborator roster.
    Collaborators,
    /// The recipient's badge collection.
    Badges,
}

/// Slug when present, id otherwise. Slugs make friendlier links but older
/// records may predate slug backfill.
fn story_segment(ctx: &NotificationContext) -> Option<String> {
    ctx.get(ContextField::StorySlug)
        .or_else(|| ctx.get(ContextField::StoryId))
}

fn chapter_segment(ctx: &NotificationContext) -> Option<String> {
    ctx.get(ContextField::ChapterSlug)
        .or_else(|| ctx.get(ContextField::ChapterId))
}

fn chapter_url(ctx: &NotificationContext) -> Option<String> {
    let story = story_segment(ctx)?;
    let chapter = chapter_segment(ctx)?;
    Some(format!("/story/{story}/chapter/{chapter}"))
}

/// Resolves the action URL for `category`, or `None` when the context lacks
/// the identifiers that category needs.
#[must_use]
pub fn resolve_action_url(category: ActionCategory, ctx: &NotificationContext) -> Option<String> {
    match category {
        ActionCategory::User => ctx
            .get(ContextField::ActorUsername)
            .or_else(|| ctx.get(ContextField::ActorId))
            .map(|who| format!("/profile/{who}")),
        ActionCategory::Comment => {
            let base = chapter_url(ctx)?;
            Some(match ctx.get(ContextField::CommentId) {
                Some(comment_id) => format!("{base}#comment-{comment_id}"),
                None => base,
            })
        }
        ActionCategory::Chapter => chapter_url(ctx),
        ActionCategory::Pr => {
            let story = story_segment(ctx)?;
            let pr_id = ctx.get(ContextField::PrId)?;
            Some(format!("/story/{story}/pr/{pr_id}"))
        }
        ActionCategory::Collaborators => {
            story_segment(ctx).map(|story| format!("/story/{story}/collaborators"))
        }
        ActionCategory::Badges => Some("/profile/badges".to_owned()),
    }
}

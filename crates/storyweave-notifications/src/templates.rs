//! Per-type title and message templates.
//!
//! Rendering is pure string work over an already-validated context: the
//! factory checks required fields first, so a missing value here renders as
//! empty rather than panicking.

use crate::context::{ContextField, NotificationContext};
use crate::highlight::{HighlightKind, highlight};
use crate::types::NotificationType;

fn req(ctx: &NotificationContext, field: ContextField) -> String {
    ctx.get(field).unwrap_or_default()
}

fn actor(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Actor, &req(ctx, ContextField::Actor))
}

fn story(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Story, &req(ctx, ContextField::StoryName))
}

fn chapter(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Chapter, &req(ctx, ContextField::ChapterTitle))
}

fn pr(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Pr, &req(ctx, ContextField::PrTitle))
}

fn role(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Role, &req(ctx, ContextField::Role))
}

fn badge(ctx: &NotificationContext) -> String {
    highlight(HighlightKind::Badge, &req(ctx, ContextField::BadgeName))
}

/// Appends the comment excerpt, when one was captured, as a quoted marker.
fn with_excerpt(mut message: String, ctx: &NotificationContext) -> String {
    if let Some(excerpt) = ctx.get(ContextField::CommentExcerpt) {
        message.push(' ');
        message.push_str(&highlight(HighlightKind::Comment, &excerpt));
    }
    message
}

/// Appends the reviewer's stated reason, when one was given.
fn with_reason(mut message: String, ctx: &NotificationContext) -> String {
    if let Some(reason) = ctx.get(ContextField::RejectionReason) {
        message.push_str(" Reason: ");
        message.push_str(&reason);
    }
    message
}

/// Renders `(title, message)` for the given type from the context.
pub(crate) fn render(kind: NotificationType, ctx: &NotificationContext) -> (String, String) {
    match kind {
        NotificationType::NewFollower => (
            "New follower".to_owned(),
            format!("{} started following you.", actor(ctx)),
        ),
        NotificationType::NewComment => (
            format!("New comment on {}", chapter(ctx)),
            with_excerpt(
                format!("{} commented on your chapter {}.", actor(ctx), chapter(ctx)),
                ctx,
            ),
        ),
        NotificationType::CommentReply => (
            "New reply to your comment".to_owned(),
            with_excerpt(format!("{} replied to your comment.", actor(ctx)), ctx),
        ),
        NotificationType::ChapterPublished => (
            format!("New chapter in {}", story(ctx)),
            format!(
                "{} published {} in {}.",
                actor(ctx),
                chapter(ctx),
                story(ctx)
            ),
        ),
        NotificationType::ChapterApproved => (
            "Chapter approved".to_owned(),
            format!(
                "Your chapter {} in {} was approved.",
                chapter(ctx),
                story(ctx)
            ),
        ),
        NotificationType::ChapterRejected => (
            "Chapter rejected".to_owned(),
            with_reason(
                format!(
                    "Your chapter {} in {} was rejected.",
                    chapter(ctx),
                    story(ctx)
                ),
                ctx,
            ),
        ),
        NotificationType::PrSubmitted => (
            format!("New pull request for {}", story(ctx)),
            format!("{} submitted {} to {}.", actor(ctx), pr(ctx), story(ctx)),
        ),
        NotificationType::PrApproved => (
            "Pull request approved".to_owned(),
            format!("{} approved your pull request {}.", actor(ctx), pr(ctx)),
        ),
        NotificationType::PrRejected => (
            "Pull request rejected".to_owned(),
            with_reason(
                format!("{} rejected your pull request {}.", actor(ctx), pr(ctx)),
                ctx,
            ),
        ),
        NotificationType::PrMerged => (
            "Pull request merged".to_owned(),
            format!(
                "{} merged your pull request {} into {}.",
                actor(ctx),
                pr(ctx),
                story(ctx)
            ),
        ),
        NotificationType::CollabInvitation => (
            format!("{} invited you to {}", actor(ctx), story(ctx)),
            format!(
                "{} invited you to join {} as {}.",
                actor(ctx),
                story(ctx),
                role(ctx)
            ),
        ),
        NotificationType::CollabRoleChanged => (
            format!("Your role in {} changed", story(ctx)),
            format!("Your role in {} is now {}.", story(ctx), role(ctx)),
        ),
        NotificationType::CollabRemoved => (
            format!("Removed from {}", story(ctx)),
            format!("You were removed from {}.", story(ctx)),
        ),
        NotificationType::BadgeEarned => (
            "Badge earned".to_owned(),
            format!("You earned the {} badge!", badge(ctx)),
        ),
    }
}

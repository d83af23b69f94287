//! Command handlers for the chapter tree context.
//!
//! Application-level orchestration: load the story, check the caller's
//! capabilities, resolve the tree position, and hand the materialized
//! chapter to the repository's conditional insert.

use tracing::warn;
use uuid::Uuid;

use storyweave_core::clock::Clock;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::{Story, StoryRepository};
use storyweave_core::user::UserDirectory;
use storyweave_notifications::{
    NotificationContext, NotificationSink, NotificationType, build,
};
use storyweave_rules::{capabilities, effective_role};

use crate::application::tree_builder;
use crate::domain::chapter::{Chapter, ChapterStatus, NewChapter, ReviewState};
use crate::domain::commands::CreateChapter;
use crate::domain::version::{ChapterVersion, EditKind};
use crate::repository::ChapterRepository;

/// Loads a story by slug and resolves the capability set the user holds on
/// it.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown slug and
/// `DomainError::Forbidden` when the user holds no role on the story.
pub(crate) async fn load_story_for(
    user_id: Uuid,
    story_slug: &str,
    stories: &dyn StoryRepository,
) -> Result<(Story, storyweave_rules::Capabilities), DomainError> {
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

/// Handles the `CreateChapter` command: resolves the tree position, writes
/// the chapter with its version-1 snapshot, and notifies the story creator
/// when someone else published into their story.
///
/// # Errors
///
/// Returns `DomainError` when the caller may not write chapters, the title
/// is blank, placement fails, or storage rejects the insert.
pub async fn handle_create_chapter(
    command: &CreateChapter,
    clock: &dyn Clock,
    stories: &dyn StoryRepository,
    users: &dyn UserDirectory,
    chapters: &dyn ChapterRepository,
    sink: &dyn NotificationSink,
) -> Result<Chapter, DomainError> {
    if command.title.trim().is_empty() {
        return Err(DomainError::Validation {
            code: "empty_title",
            message: "chapter title must not be empty".to_owned(),
        });
    }

    let (story, caps) = load_story_for(command.user_id, &command.story_slug, stories).await?;
    if !caps.can_write_chapters {
        return Err(DomainError::Forbidden(
            "this role may not write chapters".to_owned(),
        ));
    }

    let position = tree_builder::resolve_position(
        &story,
        command.parent_chapter_id,
        command.user_id,
        chapters,
    )
    .await?;

    let chapter = Chapter::create(
        NewChapter {
            id: command.chapter_id,
            story_id: story.id,
            position,
            author_id: command.user_id,
            title: command.title.clone(),
            content: command.content.clone(),
            draft: command.draft,
            review: ReviewState::direct(),
        },
        clock.now(),
    );
    let initial_version =
        ChapterVersion::capture(&chapter, EditKind::Create, command.user_id, chapter.created_at);

    chapters.insert(&chapter, &initial_version).await?;

    if chapter.status == ChapterStatus::Active && chapter.author_id != story.creator_id {
        notify_chapter_published(&chapter, &story, users, sink).await;
    }

    Ok(chapter)
}

/// Tells the story creator a collaborator published a chapter. The chapter is
/// already durable here, so delivery problems are logged and dropped rather
/// than failing the command.
async fn notify_chapter_published(
    chapter: &Chapter,
    story: &Story,
    users: &dyn UserDirectory,
    sink: &dyn NotificationSink,
) {
    let actor = match users.display_name(chapter.author_id).await {
        Ok(Some(name)) => name,
        Ok(None) => {
            warn!(author_id = %chapter.author_id, "author has no display name; skipping notification");
            return;
        }
        Err(error) => {
            warn!(%error, "display name lookup failed; skipping notification");
            return;
        }
    };

    let ctx = NotificationContext {
        actor: Some(actor),
        story_name: Some(story.title.clone()),
        story_id: Some(story.id),
        story_slug: Some(story.slug.clone()),
        chapter_title: Some(chapter.title.clone()),
        chapter_id: Some(chapter.id),
        chapter_slug: Some(chapter.slug.clone()),
        ..NotificationContext::default()
    };
    match build(NotificationType::ChapterPublished, &ctx) {
        Ok(payload) => {
            if let Err(error) = sink.deliver(story.creator_id, payload).await {
                warn!(%error, recipient = %story.creator_id, "notification delivery failed");
            }
        }
        Err(error) => warn!(%error, "notification build failed"),
    }
}

// Tests live in tests/command_handlers.rs: the in-memory store used as a
// test double is a cyclic dev-dependency, so its types only unify with this
// crate's from an integration test.

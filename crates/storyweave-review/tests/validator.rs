//! Integration tests for the pull-request workflow proposal validator.

use chrono::Utc;
use storyweave_chapters::domain::chapter::{Chapter, ChapterStatus, NewChapter, ReviewState};
use storyweave_chapters::domain::tree;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::{CollaboratorRole, Story, StoryStatus};
use storyweave_store::MemoryStore;
use uuid::Uuid;

use storyweave_review::application::validator::validate_create;
use storyweave_review::domain::commands::CreatePullRequest;
use storyweave_review::domain::diff::{ChangeSet, PrType};
use storyweave_review::domain::pull_request::{AutoApprovePolicy, NewPullRequest, PullRequest};

fn seeded_story(store: &MemoryStore, creator_id: Uuid) -> Story {
    let story = Story {
        id: Uuid::new_v4(),
        slug: "the-hollow-crown".to_owned(),
        title: "The Hollow Crown".to_owned(),
        creator_id,
        status: StoryStatus::Published,
    };
    store.seed_story(story.clone());
    story
}

fn seeded_chapter(store: &MemoryStore, story_id: Uuid, author_id: Uuid) -> Chapter {
    let chapter = Chapter::create(
        NewChapter {
            id: Uuid::new_v4(),
            story_id,
            position: tree::root_position(),
            author_id,
            title: "Prologue".to_owned(),
            content: "It begins.".to_owned(),
            draft: false,
            review: ReviewState::direct(),
        },
        Utc::now(),
    );
    store.seed_chapter(chapter.clone());
    chapter
}

fn edit_command(user_id: Uuid, chapter_slug: &str) -> CreatePullRequest {
    CreatePullRequest {
        pr_id: Uuid::new_v4(),
        new_chapter_id: Uuid::new_v4(),
        user_id,
        story_slug: "the-hollow-crown".to_owned(),
        chapter_slug: Some(chapter_slug.to_owned()),
        parent_chapter_slug: None,
        pr_type: PrType::EditChapter,
        title: "Tighten act two".to_owned(),
        description: None,
        proposed_content: "It begins anew.".to_owned(),
        draft: false,
        labels: Vec::new(),
        auto_approve: AutoApprovePolicy::default(),
    }
}

#[tokio::test]
async fn test_edit_proposal_loads_the_target_chapter() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    let chapter = seeded_chapter(&store, story.id, creator);
    let command = edit_command(creator, &chapter.slug);

    // Act
    let ctx = validate_create(&command, &store, &store, &store)
        .await
        .unwrap();

    // Assert
    assert_eq!(ctx.story.id, story.id);
    assert_eq!(ctx.target.as_ref().map(|c| c.id), Some(chapter.id));
    assert!(ctx.parent.is_none());
    assert!(ctx.capabilities.can_write_chapters);
}

#[tokio::test]
async fn test_reviewer_role_may_not_propose() {
    // Arrange
    let creator = Uuid::new_v4();
    let reviewer = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    store.seed_collaborator(story.id, reviewer, CollaboratorRole::Reviewer);
    let chapter = seeded_chapter(&store, story.id, creator);
    let command = edit_command(reviewer, &chapter.slug);

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Forbidden(_))));
}

#[tokio::test]
async fn test_duplicate_open_proposal_is_a_conflict() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    let chapter = seeded_chapter(&store, story.id, creator);
    store.seed_pull_request(PullRequest::open(
        NewPullRequest {
            id: Uuid::new_v4(),
            story_id: story.id,
            chapter_id: chapter.id,
            parent_chapter_id: None,
            author_id: creator,
            pr_type: PrType::EditChapter,
            title: "First pass".to_owned(),
            description: None,
            changes: ChangeSet {
                original: Some(chapter.content.clone()),
                proposed: "different".to_owned(),
                diff: None,
            },
            draft: false,
            labels: Vec::new(),
            auto_approve: AutoApprovePolicy::default(),
        },
        Utc::now(),
    ));
    let command = edit_command(creator, &chapter.slug);

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(result, Err(DomainError::Conflict(_))));
}

#[tokio::test]
async fn test_new_chapter_proposal_requires_a_parent() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let _ = seeded_story(&store, creator);
    let mut command = edit_command(creator, "unused");
    command.pr_type = PrType::NewChapter;
    command.chapter_slug = None;
    command.parent_chapter_slug = None;

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::Validation {
            code: "missing_parent_chapter",
            ..
        })
    ));
}

#[tokio::test]
async fn test_unknown_target_slug_is_not_found() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let _ = seeded_story(&store, creator);
    let command = edit_command(creator, "no-such-chapter");

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            kind: ResourceKind::Chapter,
            ..
        })
    ));
}

#[tokio::test]
async fn test_proposals_against_deleted_chapters_violate_the_rules() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    let mut chapter = Chapter::create(
        NewChapter {
            id: Uuid::new_v4(),
            story_id: story.id,
            position: tree::root_position(),
            author_id: creator,
            title: "Prologue".to_owned(),
            content: "It begins.".to_owned(),
            draft: false,
            review: ReviewState::direct(),
        },
        Utc::now(),
    );
    chapter.status = ChapterStatus::Deleted;
    store.seed_chapter(chapter.clone());
    let command = edit_command(creator, &chapter.slug);

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(result, Err(DomainError::RuleViolation(_))));
}

#[tokio::test]
async fn test_new_chapter_under_deleted_parent_violates_the_rules() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    let mut parent = Chapter::create(
        NewChapter {
            id: Uuid::new_v4(),
            story_id: story.id,
            position: tree::root_position(),
            author_id: creator,
            title: "Prologue".to_owned(),
            content: "It begins.".to_owned(),
            draft: false,
            review: ReviewState::direct(),
        },
        Utc::now(),
    );
    parent.status = ChapterStatus::Deleted;
    store.seed_chapter(parent.clone());
    let mut command = edit_command(creator, "unused");
    command.pr_type = PrType::NewChapter;
    command.chapter_slug = None;
    command.parent_chapter_slug = Some(parent.slug.clone());

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(result, Err(DomainError::RuleViolation(_))));
}

#[tokio::test]
async fn test_enabled_auto_approve_needs_sane_numbers() {
    // Arrange
    let creator = Uuid::new_v4();
    let store = MemoryStore::new();
    let story = seeded_story(&store, creator);
    let chapter = seeded_chapter(&store, story.id, creator);
    let mut command = edit_command(creator, &chapter.slug);
    command.auto_approve = AutoApprovePolicy {
        enabled: true,
        threshold: 0,
        time_window_secs: 3600,
    };

    // Act
    let result = validate_create(&command, &store, &store, &store).await;

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::Validation {
            code: "invalid_auto_approve_policy",
            ..
        })
    ));
}

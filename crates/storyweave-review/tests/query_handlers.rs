//! Integration tests for the pull-request workflow query handlers.

use chrono::Utc;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_store::MemoryStore;
use uuid::Uuid;

use storyweave_review::application::query_handlers::get_pull_request_by_id;
use storyweave_review::domain::diff::{ChangeSet, PrType};
use storyweave_review::domain::pull_request::{AutoApprovePolicy, NewPullRequest, PullRequest};

#[tokio::test]
async fn test_get_pull_request_by_id_returns_the_proposal() {
    // Arrange
    let store = MemoryStore::new();
    let pr = PullRequest::open(
        NewPullRequest {
            id: Uuid::new_v4(),
            story_id: Uuid::new_v4(),
            chapter_id: Uuid::new_v4(),
            parent_chapter_id: None,
            author_id: Uuid::new_v4(),
            pr_type: PrType::EditChapter,
            title: "Tighten act two".to_owned(),
            description: None,
            changes: ChangeSet {
                original: Some("old".to_owned()),
                proposed: "new".to_owned(),
                diff: None,
            },
            draft: false,
            labels: Vec::new(),
            auto_approve: AutoApprovePolicy::default(),
        },
        Utc::now(),
    );
    store.seed_pull_request(pr.clone());

    // Act
    let found = get_pull_request_by_id(pr.id, &store).await.unwrap();

    // Assert
    assert_eq!(found.id, pr.id);
    assert_eq!(found.title, "Tighten act two");
    assert_eq!(found.changes.proposed, "new");
}

#[tokio::test]
async fn test_get_pull_request_by_id_for_unknown_id_is_not_found() {
    // Arrange
    let store = MemoryStore::new();

    // Act
    let result = get_pull_request_by_id(Uuid::new_v4(), &store).await;

    // Assert
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            kind: ResourceKind::PullRequest,
            ..
        })
    ));
}

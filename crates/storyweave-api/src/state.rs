//! Shared application state for the API server.

use std::sync::Arc;

use storyweave_chapters::repository::ChapterRepository;
use storyweave_core::clock::Clock;
use storyweave_core::story::StoryRepository;
use storyweave_core::user::UserDirectory;
use storyweave_notifications::NotificationSink;
use storyweave_review::repository::PullRequestRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Source of timestamps for every command the handlers run.
    pub clock: Arc<dyn Clock>,
    /// Story lookups and collaborator roles.
    pub stories: Arc<dyn StoryRepository>,
    /// Display-name resolution for notification text.
    pub users: Arc<dyn UserDirectory>,
    /// Chapter tree persistence.
    pub chapters: Arc<dyn ChapterRepository>,
    /// Pull request persistence.
    pub pull_requests: Arc<dyn PullRequestRepository>,
    /// Delivery target for post-commit notifications.
    pub notifications: Arc<dyn NotificationSink>,
}

impl AppState {
    /// Creates new application state from its collaborators.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        stories: Arc<dyn StoryRepository>,
        users: Arc<dyn UserDirectory>,
        chapters: Arc<dyn ChapterRepository>,
        pull_requests: Arc<dyn PullRequestRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            clock,
            stories,
            users,
            chapters,
            pull_requests,
            notifications,
        }
    }
}

//! In-memory storage adapter.
//!
//! [`MemoryStore`] implements every repository contract behind one
//! `std::sync::RwLock`, making it both the reference implementation of the
//! storage semantics (uniqueness constraints, compare-and-swap, the atomic
//! merge commit) and the backing store for tests and the demo server. The
//! lock is only ever held for synchronous table work, never across an await.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use storyweave_chapters::domain::chapter::Chapter;
use storyweave_chapters::domain::version::ChapterVersion;
use storyweave_chapters::repository::ChapterRepository;
use storyweave_core::error::{DomainError, ResourceKind};
use storyweave_core::story::{CollaboratorRole, Story, StoryRepository};
use storyweave_core::user::UserDirectory;
use storyweave_notifications::{NotificationPayload, NotificationSink};
use storyweave_review::domain::pull_request::{PrStatus, PullRequest};
use storyweave_review::repository::{ChapterWrite, PullRequestRepository};

#[derive(Debug, Default)]
struct Tables {
    stories: HashMap<Uuid, Story>,
    collaborators: HashMap<(Uuid, Uuid), CollaboratorRole>,
    users: HashMap<Uuid, String>,
    chapters: HashMap<Uuid, Chapter>,
    versions: HashMap<Uuid, Vec<ChapterVersion>>,
    pull_requests: HashMap<Uuid, PullRequest>,
    notifications: Vec<(Uuid, NotificationPayload)>,
}

impl Tables {
    /// The constraints a chapter insert must clear: id uniqueness, one root
    /// per story, slug uniqueness within the story. Checked in full before
    /// anything mutates.
    fn check_chapter_insert(&self, chapter: &Chapter) -> Result<(), DomainError> {
        if self.chapters.contains_key(&chapter.id) {
            return Err(DomainError::Conflict(format!(
                "chapter {} already exists",
                chapter.id
            )));
        }
        if chapter.is_root()
            && self
                .chapters
                .values()
                .any(|c| c.story_id == chapter.story_id && c.is_root())
        {
            return Err(DomainError::Conflict(format!(
                "story {} already has a root chapter",
                chapter.story_id
            )));
        }
        if self
            .chapters
            .values()
            .any(|c| c.story_id == chapter.story_id && c.slug == chapter.slug)
        {
            return Err(DomainError::Conflict(format!(
                "chapter slug '{}' is taken in this story",
                chapter.slug
            )));
        }
        Ok(())
    }

    fn apply_chapter_insert(&mut self, chapter: &Chapter, snapshot: &ChapterVersion) {
        if let Some(parent) = chapter
            .parent_chapter_id
            .and_then(|id| self.chapters.get_mut(&id))
        {
            parent.stats.child_branches += 1;
        }
        self.chapters.insert(chapter.id, chapter.clone());
        self.versions
            .entry(chapter.id)
            .or_default()
            .push(snapshot.clone());
    }
}

/// In-memory store implementing all of the repository traits plus the
/// notification sink.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

fn poisoned() -> DomainError {
    DomainError::Storage("store lock poisoned".to_owned())
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, DomainError> {
        self.tables.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, DomainError> {
        self.tables.write().map_err(|_| poisoned())
    }

    fn seed(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().expect("store lock poisoned")
    }

    fn snapshot(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().expect("store lock poisoned")
    }

    /// Seeds a story.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_story(&self, story: Story) {
        self.seed().stories.insert(story.id, story);
    }

    /// Grants `role` to `user_id` on `story_id`.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_collaborator(&self, story_id: Uuid, user_id: Uuid, role: CollaboratorRole) {
        self.seed().collaborators.insert((story_id, user_id), role);
    }

    /// Registers a display name for `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_user(&self, user_id: Uuid, display_name: &str) {
        self.seed().users.insert(user_id, display_name.to_owned());
    }

    /// Writes a chapter directly into the table, bypassing the insert
    /// constraints. Replaces any stored chapter with the same id and never
    /// touches branch counters; for arranged state, not for production
    /// writes.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_chapter(&self, chapter: Chapter) {
        self.seed().chapters.insert(chapter.id, chapter);
    }

    /// Seeds a chapter together with one version snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_chapter_with_version(&self, chapter: Chapter, snapshot: ChapterVersion) {
        let mut tables = self.seed();
        tables.versions.entry(chapter.id).or_default().push(snapshot);
        tables.chapters.insert(chapter.id, chapter);
    }

    /// Writes a pull request directly into the table, bypassing the insert
    /// constraints.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    pub fn seed_pull_request(&self, pr: PullRequest) {
        self.seed().pull_requests.insert(pr.id, pr);
    }

    /// Returns the stored chapter, if any.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn chapter(&self, id: Uuid) -> Option<Chapter> {
        self.snapshot().chapters.get(&id).cloned()
    }

    /// Returns the stored version snapshots for a chapter, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn chapter_versions(&self, chapter_id: Uuid) -> Vec<ChapterVersion> {
        self.snapshot()
            .versions
            .get(&chapter_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the stored pull request, if any.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn pull_request(&self, id: Uuid) -> Option<PullRequest> {
        self.snapshot().pull_requests.get(&id).cloned()
    }

    /// Returns every delivered notification in delivery order.
    ///
    /// # Panics
    ///
    /// Panics if the store lock is poisoned.
    #[must_use]
    pub fn delivered_notifications(&self) -> Vec<(Uuid, NotificationPayload)> {
        self.snapshot().notifications.clone()
    }
}

#[async_trait]
impl StoryRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Story>, DomainError> {
        Ok(self.read()?.stories.get(&id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Story>, DomainError> {
        Ok(self
            .read()?
            .stories
            .values()
            .find(|s| s.slug == slug)
            .cloned())
    }

    async fn collaborator_role(
        &self,
        user_id: Uuid,
        story_id: Uuid,
    ) -> Result<Option<CollaboratorRole>, DomainError> {
        Ok(self
            .read()?
            .collaborators
            .get(&(story_id, user_id))
            .copied())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, DomainError> {
        Ok(self.read()?.users.get(&user_id).cloned())
    }
}

#[async_trait]
impl ChapterRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Chapter>, DomainError> {
        Ok(self.read()?.chapters.get(&id).cloned())
    }

    async fn find_by_slug(
        &self,
        story_id: Uuid,
        slug: &str,
    ) -> Result<Option<Chapter>, DomainError> {
        Ok(self
            .read()?
            .chapters
            .values()
            .find(|c| c.story_id == story_id && c.slug == slug)
            .cloned())
    }

    async fn find_root(&self, story_id: Uuid) -> Result<Option<Chapter>, DomainError> {
        // Deleted roots still count: soft deletion keeps the node in the
        // tree, so the root slot stays occupied.
        Ok(self
            .read()?
            .chapters
            .values()
            .find(|c| c.story_id == story_id && c.is_root())
            .cloned())
    }

    async fn insert(
        &self,
        chapter: &Chapter,
        initial_version: &ChapterVersion,
    ) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        tables.check_chapter_insert(chapter)?;
        tables.apply_chapter_insert(chapter, initial_version);
        Ok(())
    }

    async fn list_versions(&self, chapter_id: Uuid) -> Result<Vec<ChapterVersion>, DomainError> {
        Ok(self
            .read()?
            .versions
            .get(&chapter_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl PullRequestRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PullRequest>, DomainError> {
        Ok(self.read()?.pull_requests.get(&id).cloned())
    }

    async fn insert(&self, pr: &PullRequest) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        if tables.pull_requests.contains_key(&pr.id) {
            return Err(DomainError::Conflict(format!(
                "pull request {} already exists",
                pr.id
            )));
        }
        let duplicate = tables.pull_requests.values().any(|existing| {
            existing.author_id == pr.author_id
                && existing.chapter_id == pr.chapter_id
                && existing.status == PrStatus::Open
        });
        if duplicate {
            return Err(DomainError::Conflict(
                "author already has an open pull request for this chapter".to_owned(),
            ));
        }
        tables.pull_requests.insert(pr.id, pr.clone());
        Ok(())
    }

    async fn update(&self, pr: &PullRequest) -> Result<(), DomainError> {
        let mut tables = self.write()?;
        if !tables.pull_requests.contains_key(&pr.id) {
            return Err(DomainError::NotFound {
                kind: ResourceKind::PullRequest,
                reference: pr.id.to_string(),
            });
        }
        tables.pull_requests.insert(pr.id, pr.clone());
        Ok(())
    }

    async fn open_target_ids(&self, author_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        Ok(self
            .read()?
            .pull_requests
            .values()
            .filter(|pr| pr.author_id == author_id && pr.status == PrStatus::Open)
            .map(|pr| pr.chapter_id)
            .collect())
    }

    async fn commit_merge(
        &self,
        pr: &PullRequest,
        write: ChapterWrite<'_>,
        snapshot: &ChapterVersion,
    ) -> Result<(), DomainError> {
        let mut tables = self.write()?;

        let stored = tables
            .pull_requests
            .get(&pr.id)
            .ok_or_else(|| DomainError::NotFound {
                kind: ResourceKind::PullRequest,
                reference: pr.id.to_string(),
            })?;
        if stored.status != PrStatus::Approved {
            return Err(DomainError::Conflict(format!(
                "pull request {} is no longer approved",
                pr.id
            )));
        }

        match write {
            ChapterWrite::Insert(chapter) => {
                tables.check_chapter_insert(chapter)?;
                tables.apply_chapter_insert(chapter, snapshot);
            }
            ChapterWrite::Update {
                chapter,
                expected_version,
            } => {
                let current =
                    tables
                        .chapters
                        .get(&chapter.id)
                        .ok_or_else(|| DomainError::NotFound {
                            kind: ResourceKind::Chapter,
                            reference: chapter.id.to_string(),
                        })?;
                if current.version != expected_version {
                    return Err(DomainError::Conflict(
                        "chapter version changed since the merge was prepared".to_owned(),
                    ));
                }
                tables.chapters.insert(chapter.id, chapter.clone());
                tables
                    .versions
                    .entry(chapter.id)
                    .or_default()
                    .push(snapshot.clone());
            }
        }

        tables.pull_requests.insert(pr.id, pr.clone());
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for MemoryStore {
    async fn deliver(
        &self,
        recipient: Uuid,
        payload: NotificationPayload,
    ) -> Result<(), DomainError> {
        self.write()?.notifications.push((recipient, payload));
        Ok(())
    }
}

//! Immutable chapter-version snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::chapter::Chapter;

/// How a chapter version came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditKind {
    /// The initial version written at chapter creation.
    Create,
    /// A version produced by merging an approved pull request.
    PrMerge,
}

/// An immutable snapshot of a chapter at one version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterVersion {
    /// Snapshot identifier.
    pub id: Uuid,
    /// The chapter this snapshot belongs to.
    pub chapter_id: Uuid,
    /// The chapter version captured.
    pub version: i64,
    /// Title at this version.
    pub title: String,
    /// Content at this version.
    pub content: String,
    /// SHA-256 hex digest of `content`.
    pub content_hash: String,
    /// What produced this version.
    pub edit_kind: EditKind,
    /// The user whose action produced this version.
    pub edited_by: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
}

impl ChapterVersion {
    /// Captures the chapter's current state as an immutable snapshot.
    #[must_use]
    pub fn capture(
        chapter: &Chapter,
        edit_kind: EditKind,
        edited_by: Uuid,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            chapter_id: chapter.id,
            version: chapter.version,
            title: chapter.title.clone(),
            content: chapter.content.clone(),
            content_hash: content_hash(&chapter.content),
            edit_kind,
            edited_by,
            created_at: at,
        }
    }
}

/// SHA-256 hex digest of chapter content.
#[must_use]
pub fn content_hash(content: &str) -> String {
    format!("{:x}", Sha256::digest(content.as_bytes()))
}

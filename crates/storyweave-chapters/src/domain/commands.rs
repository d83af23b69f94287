//! Commands for the chapter tree context.

use uuid::Uuid;

/// Command to create a chapter, either a story root or a branch off an
/// existing chapter.
#[derive(Debug, Clone)]
pub struct CreateChapter {
    /// Pre-allocated id for the new chapter.
    pub chapter_id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    /// Slug of the story to create the chapter in.
    pub story_slug: String,
    /// Parent chapter; `None` requests root creation.
    pub parent_chapter_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Narrative content.
    pub content: String,
    /// Whether the chapter starts as an unlisted draft.
    pub draft: bool,
}

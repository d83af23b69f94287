//! Routes for the chapter tree bounded context.

use axum::extract::{Path, State};
use axum::{Json, Router, routing::get, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use storyweave_chapters::application::{command_handlers, query_handlers};
use storyweave_chapters::domain::chapter::Chapter;
use storyweave_chapters::domain::commands::CreateChapter;
use storyweave_chapters::domain::version::ChapterVersion;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct CreateChapterRequest {
    /// The writing user.
    pub user_id: Uuid,
    /// Slug of the story to write into.
    pub story_slug: String,
    /// Parent chapter to branch from; omit to create the story root.
    pub parent_chapter_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Narrative content.
    pub content: String,
    /// Whether the chapter starts as an unlisted draft.
    #[serde(default)]
    pub draft: bool,
}

/// POST /
#[instrument(
    skip(state, request),
    fields(story_slug = %request.story_slug, user_id = %request.user_id)
)]
async fn create_chapter(
    State(state): State<AppState>,
    Json(request): Json<CreateChapterRequest>,
) -> Result<Json<Chapter>, ApiError> {
    let command = CreateChapter {
        chapter_id: Uuid::new_v4(),
        user_id: request.user_id,
        story_slug: request.story_slug,
        parent_chapter_id: request.parent_chapter_id,
        title: request.title,
        content: request.content,
        draft: request.draft,
    };

    info!(chapter_id = %command.chapter_id, "handling create_chapter command");

    let chapter = command_handlers::handle_create_chapter(
        &command,
        state.clock.as_ref(),
        &*state.stories,
        &*state.users,
        &*state.chapters,
        &*state.notifications,
    )
    .await?;

    Ok(Json(chapter))
}

/// GET /{id}
#[instrument(skip(state), fields(chapter_id = %id))]
async fn get_chapter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Chapter>, ApiError> {
    let chapter = query_handlers::get_chapter_by_id(id, &*state.chapters).await?;
    Ok(Json(chapter))
}

/// GET /{id}/versions
#[instrument(skip(state), fields(chapter_id = %id))]
async fn get_chapter_versions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ChapterVersion>>, ApiError> {
    let versions = query_handlers::get_chapter_versions(id, &*state.chapters).await?;
    Ok(Json(versions))
}

/// Returns the router for the chapter context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_chapter))
        .route("/{id}", get(get_chapter))
        .route("/{id}/versions", get(get_chapter_versions))
}

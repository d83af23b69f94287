//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use storyweave_core::clock::Clock;
use storyweave_core::story::{CollaboratorRole, Story, StoryStatus};
use storyweave_store::MemoryStore;
use storyweave_test_support::FixedClock;
use tower::ServiceExt;
use uuid::Uuid;

use storyweave_api::routes;
use storyweave_api::state::AppState;

/// Fixed timestamp used across all integration tests.
fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 3, 1, 9, 0, 0).unwrap(),
    ))
}

/// Build the full app router over a fresh in-memory store with a pinned
/// clock. Uses the same route structure as `main.rs`.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let app = app_over(&store);
    (app, store)
}

/// Build the app router over an existing store. `oneshot` consumes the
/// router, so multi-request tests rebuild it between calls.
pub fn app_over(store: &Arc<MemoryStore>) -> Router {
    let app_state = AppState::new(
        fixed_clock(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/chapters", routes::chapters::router())
        .nest("/api/v1/pull-requests", routes::pull_requests::router())
        .with_state(app_state)
}

/// Seed a published story and its owner; returns `(story_id, owner_id)`.
pub fn seed_story_with_owner(store: &MemoryStore, slug: &str) -> (Uuid, Uuid) {
    let story_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();
    store.seed_story(Story {
        id: story_id,
        slug: slug.to_owned(),
        title: "The Hollow Crown".to_owned(),
        creator_id: owner_id,
        status: StoryStatus::Published,
    });
    store.seed_collaborator(story_id, owner_id, CollaboratorRole::Owner);
    store.seed_user(owner_id, "Alice");
    (story_id, owner_id)
}

/// Add a collaborator with the given role; returns the new user's id.
pub fn seed_collaborator(
    store: &MemoryStore,
    story_id: Uuid,
    name: &str,
    role: CollaboratorRole,
) -> Uuid {
    let user_id = Uuid::new_v4();
    store.seed_collaborator(story_id, user_id, role);
    store.seed_user(user_id, name);
    user_id
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

//! HTTP API for the storyweave branching-narrative engine.
//!
//! Exposes the chapter tree and the pull-request review workflow as JSON
//! endpoints. Route handlers stay thin: they translate request bodies into
//! domain commands, hand them to the application layer, and map every
//! `DomainError` onto a status code through [`error::ApiError`].

pub mod error;
pub mod routes;
pub mod state;

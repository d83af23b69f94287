//! Route modules organized by bounded context.

pub mod chapters;
pub mod health;
pub mod pull_requests;

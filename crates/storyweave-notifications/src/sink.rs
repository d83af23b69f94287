//! Delivery boundary.

use async_trait::async_trait;
use storyweave_core::error::DomainError;
use uuid::Uuid;

use crate::factory::NotificationPayload;

/// Hands a built payload to whatever transport persists or pushes it.
///
/// Workflows call this after their own state has committed; a failed
/// delivery must not roll the triggering operation back.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers `payload` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Storage`] when the transport cannot accept the
    /// payload.
    async fn deliver(&self, recipient: Uuid, payload: NotificationPayload)
    -> Result<(), DomainError>;
}

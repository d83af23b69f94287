//! Test sinks — `NotificationSink` implementations for tests.

use async_trait::async_trait;
use storyweave_core::error::DomainError;
use storyweave_notifications::{NotificationPayload, NotificationSink};
use uuid::Uuid;

/// A sink that always returns a storage error. Useful for asserting that
/// delivery failures never fail the triggering operation.
#[derive(Debug)]
pub struct FailingSink;

#[async_trait]
impl NotificationSink for FailingSink {
    async fn deliver(
        &self,
        _recipient: Uuid,
        _payload: NotificationPayload,
    ) -> Result<(), DomainError> {
        Err(DomainError::Storage("delivery transport down".to_owned()))
    }
}

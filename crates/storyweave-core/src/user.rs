//! User directory contract.
//!
//! Identity resolution is external. The workflow needs display names when it
//! builds notification text, nothing more.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

/// Contract for resolving user display names.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the display name for `user_id`, if the directory knows them.
    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, DomainError>;
}

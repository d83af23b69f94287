//! Building validated notification payloads.
//!
//! `build` is deterministic: the same type and context always produce the
//! same payload, byte for byte, so delivery can be retried or deduplicated
//! without diffing rendered text.

use serde::{Deserialize, Serialize};
use storyweave_core::error::DomainError;

use crate::actions::resolve_action_url;
use crate::context::{MissingField, NotificationContext, ValidationReport};
use crate::templates;
use crate::types::NotificationType;

/// A fully rendered notification, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    /// Which notification this is.
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// Short headline, with highlight markers.
    pub title: String,
    /// Full body, with highlight markers.
    pub message: String,
    /// Deep link into the app, when one could be resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

/// Checks `ctx` against the fields `kind` requires, reporting every missing
/// field in declaration order.
#[must_use]
pub fn validate(kind: NotificationType, ctx: &NotificationContext) -> ValidationReport {
    let errors: Vec<MissingField> = kind
        .required_fields()
        .iter()
        .filter(|field| !ctx.has(**field))
        .map(|field| MissingField {
            field: *field,
            code: field.missing_code(),
        })
        .collect();
    ValidationReport {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Builds the payload for `kind` from `ctx`.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] carrying the first missing field's
/// code when the context does not satisfy the type's requirements.
pub fn build(
    kind: NotificationType,
    ctx: &NotificationContext,
) -> Result<NotificationPayload, DomainError> {
    let report = validate(kind, ctx);
    if let Some(missing) = report.errors.first() {
        return Err(DomainError::Validation {
            code: missing.code,
            message: format!(
                "notification {kind:?} requires context field '{}'",
                missing.field.name()
            ),
        });
    }

    let (title, message) = templates::render(kind, ctx);
    let action_url = kind
        .action_category()
        .and_then(|category| resolve_action_url(category, ctx));

    Ok(NotificationPayload {
        kind,
        title,
        message,
        action_url,
    })
}

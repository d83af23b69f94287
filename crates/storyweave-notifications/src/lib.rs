//! Storyweave Notifications — turns workflow events into typed, validated,
//! user-facing messages with generated deep-links.
//!
//! The factory is a pure computation: the same `(type, context)` pair always
//! yields the same payload, byte for byte. Persistence and delivery live
//! behind the [`NotificationSink`] contract.

mod actions;
mod context;
mod factory;
mod highlight;
mod sink;
mod templates;
mod types;

pub use actions::{ActionCategory, resolve_action_url};
pub use context::{
    ContextField, GENERIC_MISSING_FIELD, MissingField, NotificationContext, ValidationReport,
};
pub use factory::{NotificationPayload, build, validate};
pub use highlight::{HighlightKind, highlight};
pub use sink::NotificationSink;
pub use types::NotificationType;

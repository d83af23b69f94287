//! Semantic highlight markers.
//!
//! Notification text wraps entity references in `[[kind:text]]` markers so a
//! presentation layer can style them. This is a pure string transform.

use std::fmt;

/// The kinds of entity notification text may reference inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// The user whose action triggered the notification.
    Actor,
    /// A story title.
    Story,
    /// A chapter title.
    Chapter,
    /// A pull request title.
    Pr,
    /// A comment excerpt.
    Comment,
    /// A collaborator role name.
    Role,
    /// A badge name.
    Badge,
}

impl HighlightKind {
    /// Marker tag for this kind.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Actor => "actor",
            Self::Story => "story",
            Self::Chapter => "chapter",
            Self::Pr => "pr",
            Self::Comment => "comment",
            Self::Role => "role",
            Self::Badge => "badge",
        }
    }
}

impl fmt::Display for HighlightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Wraps `text` in a `[[kind:text]]` marker.
#[must_use]
pub fn highlight(kind: HighlightKind, text: &str) -> String {
    format!("[[{kind}:{text}]]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_text_with_kind_tag() {
        assert_eq!(highlight(HighlightKind::Actor, "Alice"), "[[actor:Alice]]");
        assert_eq!(highlight(HighlightKind::Story, "Quest"), "[[story:Quest]]");
        assert_eq!(highlight(HighlightKind::Role, "Editor"), "[[role:Editor]]");
        assert_eq!(highlight(HighlightKind::Badge, "Wordsmith"), "[[badge:Wordsmith]]");
    }
}

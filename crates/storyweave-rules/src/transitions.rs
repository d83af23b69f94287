//! Story status transition table.

use storyweave_core::story::StoryStatus;

/// Returns the statuses reachable from `current`.
#[must_use]
pub const fn allowed_transitions(current: StoryStatus) -> &'static [StoryStatus] {
    match current {
        StoryStatus::Draft => &[
            StoryStatus::Published,
            StoryStatus::Archived,
            StoryStatus::Deleted,
        ],
        StoryStatus::Published => &[StoryStatus::Archived, StoryStatus::Deleted],
        StoryStatus::Archived => &[StoryStatus::Deleted],
        // Terminal.
        StoryStatus::Deleted => &[],
    }
}

/// True iff a story may move from `current` to `next`.
#[must_use]
pub fn is_valid_status_transition(current: StoryStatus, next: StoryStatus) -> bool {
    allowed_transitions(current).contains(&next)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [StoryStatus; 4] = [
        StoryStatus::Draft,
        StoryStatus::Published,
        StoryStatus::Archived,
        StoryStatus::Deleted,
    ];

    #[test]
    fn test_draft_may_publish_archive_or_delete() {
        assert!(is_valid_status_transition(
            StoryStatus::Draft,
            StoryStatus::Published
        ));
        assert!(is_valid_status_transition(
            StoryStatus::Draft,
            StoryStatus::Archived
        ));
        assert!(is_valid_status_transition(
            StoryStatus::Draft,
            StoryStatus::Deleted
        ));
        assert!(!is_valid_status_transition(
            StoryStatus::Draft,
            StoryStatus::Draft
        ));
    }

    #[test]
    fn test_published_may_archive_or_delete_only() {
        assert!(is_valid_status_transition(
            StoryStatus::Published,
            StoryStatus::Archived
        ));
        assert!(is_valid_status_transition(
            StoryStatus::Published,
            StoryStatus::Deleted
        ));
        assert!(!is_valid_status_transition(
            StoryStatus::Published,
            StoryStatus::Draft
        ));
        assert!(!is_valid_status_transition(
            StoryStatus::Published,
            StoryStatus::Published
        ));
    }

    #[test]
    fn test_archived_may_only_delete() {
        for next in ALL {
            assert_eq!(
                is_valid_status_transition(StoryStatus::Archived, next),
                next == StoryStatus::Deleted
            );
        }
    }

    #[test]
    fn test_deleted_is_terminal() {
        for next in ALL {
            assert!(!is_valid_status_transition(StoryStatus::Deleted, next));
        }
        assert!(allowed_transitions(StoryStatus::Deleted).is_empty());
    }

    #[test]
    fn test_no_transition_reenters_draft() {
        for current in ALL {
            assert!(!is_valid_status_transition(current, StoryStatus::Draft));
        }
    }
}

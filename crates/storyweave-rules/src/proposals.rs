//! Proposal-uniqueness predicate.

use uuid::Uuid;

/// True iff `chapter_id` already appears among the chapter ids targeted by an
/// author's currently open pull requests.
///
/// The caller supplies the target ids of the author's open proposals; this
/// predicate does no loading of its own.
#[must_use]
pub fn has_duplicate_open_pr<I>(chapter_id: Uuid, open_target_ids: I) -> bool
where
    I: IntoIterator<Item = Uuid>,
{
    open_target_ids.into_iter().any(|id| id == chapter_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_when_target_is_among_open_proposals() {
        let target = Uuid::new_v4();
        let open = vec![Uuid::new_v4(), target, Uuid::new_v4()];

        assert!(has_duplicate_open_pr(target, open));
    }

    #[test]
    fn test_no_duplicate_when_target_absent() {
        let target = Uuid::new_v4();
        let open = vec![Uuid::new_v4(), Uuid::new_v4()];

        assert!(!has_duplicate_open_pr(target, open));
    }

    #[test]
    fn test_no_duplicate_with_no_open_proposals() {
        assert!(!has_duplicate_open_pr(Uuid::new_v4(), []));
    }
}

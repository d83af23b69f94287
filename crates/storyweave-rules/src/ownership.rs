//! Ownership predicates.
//!
//! Plain equality/role checks over loaded entities. Each predicate answers
//! "is this user authorized", true meaning yes.

use storyweave_core::story::{CollaboratorRole, Story};
use uuid::Uuid;

use crate::permissions::capabilities;

/// True iff `user_id` created the story.
#[must_use]
pub fn is_story_creator(user_id: Uuid, story: &Story) -> bool {
    story.creator_id == user_id
}

/// Resolves the role `user_id` effectively holds on `story`: the creator is
/// always `Owner`; otherwise the explicitly assigned role applies.
#[must_use]
pub fn effective_role(
    story: &Story,
    user_id: Uuid,
    assigned: Option<CollaboratorRole>,
) -> Option<CollaboratorRole> {
    if is_story_creator(user_id, story) {
        Some(CollaboratorRole::Owner)
    } else {
        assigned
    }
}

/// True iff `user_id` may edit the story's settings.
#[must_use]
pub fn can_edit_story(user_id: Uuid, story: &Story, assigned: Option<CollaboratorRole>) -> bool {
    effective_role(story, user_id, assigned)
        .is_some_and(|role| capabilities(role).can_manage_collaborators)
}

/// True iff `user_id` may publish the story. Publishing is reserved for the
/// creator.
#[must_use]
pub fn can_publish_story(user_id: Uuid, story: &Story) -> bool {
    is_story_creator(user_id, story)
}

#[cfg(test)]
mod tests {
    use storyweave_core::story::StoryStatus;

    use super::*;

    fn story(creator_id: Uuid) -> Story {
        Story {
            id: Uuid::new_v4(),
            slug: "the-hollow-crown".to_owned(),
            title: "The Hollow Crown".to_owned(),
            creator_id,
            status: StoryStatus::Published,
        }
    }

    #[test]
    fn test_creator_predicate_is_true_for_the_creator_only() {
        let creator = Uuid::new_v4();
        let story = story(creator);

        assert!(is_story_creator(creator, &story));
        assert!(!is_story_creator(Uuid::new_v4(), &story));
    }

    #[test]
    fn test_effective_role_promotes_creator_to_owner() {
        let creator = Uuid::new_v4();
        let story = story(creator);

        // Even with no assigned role, the creator is Owner.
        assert_eq!(
            effective_role(&story, creator, None),
            Some(CollaboratorRole::Owner)
        );
        // An assigned role never downgrades the creator.
        assert_eq!(
            effective_role(&story, creator, Some(CollaboratorRole::Reviewer)),
            Some(CollaboratorRole::Owner)
        );
    }

    #[test]
    fn test_effective_role_passes_through_assigned_role_for_others() {
        let story = story(Uuid::new_v4());
        let user = Uuid::new_v4();

        assert_eq!(
            effective_role(&story, user, Some(CollaboratorRole::Editor)),
            Some(CollaboratorRole::Editor)
        );
        assert_eq!(effective_role(&story, user, None), None);
    }

    #[test]
    fn test_can_edit_story_requires_collaborator_management() {
        let creator = Uuid::new_v4();
        let story = story(creator);
        let other = Uuid::new_v4();

        assert!(can_edit_story(creator, &story, None));
        assert!(!can_edit_story(other, &story, Some(CollaboratorRole::Editor)));
        assert!(!can_edit_story(other, &story, None));
    }

    #[test]
    fn test_can_publish_story_is_creator_only() {
        let creator = Uuid::new_v4();
        let story = story(creator);

        assert!(can_publish_story(creator, &story));
        assert!(!can_publish_story(Uuid::new_v4(), &story));
    }
}

//! Role→capability table.

use storyweave_core::story::CollaboratorRole;

/// The fixed capability set attached to a collaborator role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// May create chapters and propose changes.
    pub can_write_chapters: bool,
    /// May approve open pull requests.
    pub can_approve_prs: bool,
    /// May reject open pull requests.
    pub can_reject_prs: bool,
    /// May merge approved pull requests.
    pub can_merge_prs: bool,
    /// May invite, remove, and re-tier collaborators.
    pub can_manage_collaborators: bool,
}

/// Returns the capability set for `role`.
///
/// The mapping is a compile-time constant; there is no dynamic lookup.
#[must_use]
pub const fn capabilities(role: CollaboratorRole) -> Capabilities {
    match role {
        CollaboratorRole::Owner => Capabilities {
            can_write_chapters: true,
            can_approve_prs: true,
            can_reject_prs: true,
            can_merge_prs: true,
            can_manage_collaborators: true,
        },
        CollaboratorRole::Editor => Capabilities {
            can_write_chapters: true,
            can_approve_prs: true,
            can_reject_prs: true,
            can_merge_prs: true,
            can_manage_collaborators: false,
        },
        CollaboratorRole::Reviewer => Capabilities {
            can_write_chapters: false,
            can_approve_prs: true,
            can_reject_prs: true,
            can_merge_prs: false,
            can_manage_collaborators: false,
        },
        CollaboratorRole::Contributor => Capabilities {
            can_write_chapters: true,
            can_approve_prs: false,
            can_reject_prs: false,
            can_merge_prs: false,
            can_manage_collaborators: false,
        },
    }
}

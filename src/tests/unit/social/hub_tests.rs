//! Users, groups and role-gated access.

use crate::core::permissions::{Capability, Role};
use crate::core::social::{
    demo_hub, GroupDraft, InviteOutcome, ProfileUpdate, SocialError, SocialHub, UserDraft,
    UserStatus, CONFIRM_DELETE_GROUP, CONFIRM_DELETE_USER,
};

fn hub_as(user_id: &str) -> SocialHub {
    demo_hub(user_id).unwrap()
}

fn group_names(groups: Vec<&crate::core::social::Group>) -> Vec<&str> {
    groups.into_iter().map(|g| g.name.as_str()).collect()
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_hub_requires_known_current_user() {
    let err = demo_hub("nobody").unwrap_err();
    assert!(matches!(err, SocialError::NotFound { kind: "User", .. }));
}

#[test]
fn test_switch_user() {
    let mut hub = hub_as("u1");
    assert_eq!(hub.current_role(), Role::Admin);

    hub.switch_user("u2").unwrap();
    assert_eq!(hub.current_user_id(), "u2");
    assert_eq!(hub.current_role(), Role::Member);

    assert!(hub.switch_user("ghost").is_err());
    assert_eq!(hub.current_user_id(), "u2");
}

#[test]
fn test_capabilities_follow_role() {
    let hub = hub_as("u5");
    assert!(hub.can(Capability::UseCoPilot));
    assert!(!hub.can(Capability::ManageUsers));
    assert!(!hub.can(Capability::SeePrivateGroups));
}

#[test]
fn test_search_users_matches_name_and_email() {
    let hub = hub_as("u1");
    let names: Vec<&str> = hub.search_users("ALICE").iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, ["Alice Walker"]);

    assert_eq!(hub.search_users("example.com").len(), 4);
    assert_eq!(hub.search_users("").len(), hub.users().len());
}

// =============================================================================
// Group Visibility
// =============================================================================

#[test]
fn test_admin_sees_private_groups() {
    let hub = hub_as("u1");
    assert_eq!(group_names(hub.visible_groups()), ["The Obsidian Spires", "Secret Council"]);
    assert_eq!(hub.my_groups().len(), 2);
}

#[test]
fn test_member_sees_public_and_own_groups() {
    let hub = hub_as("u2");
    assert_eq!(group_names(hub.visible_groups()), ["The Obsidian Spires"]);
    assert_eq!(group_names(hub.my_groups()), ["The Obsidian Spires"]);
    assert!(hub.has_dnd_access());
}

#[test]
fn test_dm_outside_any_group_still_has_access() {
    let hub = hub_as("u5");
    assert_eq!(group_names(hub.visible_groups()), ["The Obsidian Spires"]);
    assert!(hub.my_groups().is_empty());
    assert!(hub.has_dnd_access());
}

#[test]
fn test_private_group_member_sees_it() {
    let mut hub = hub_as("u1");
    let mut draft = GroupDraft::from(hub.group("g2").unwrap());
    draft.toggle_member("u3");
    hub.save_group(draft).unwrap();

    hub.switch_user("u3").unwrap();
    assert_eq!(hub.visible_groups().len(), 2);

    hub.switch_user("u4").unwrap();
    assert_eq!(hub.visible_groups().len(), 1);
}

#[test]
fn test_member_without_groups_has_no_access() {
    let mut hub = hub_as("u1");
    let id = hub.save_user(UserDraft::new("Newcomer")).unwrap().id.clone();

    hub.switch_user(&id).unwrap();
    assert!(hub.my_groups().is_empty());
    assert!(!hub.has_dnd_access());
}

// =============================================================================
// Saving Groups
// =============================================================================

#[test]
fn test_create_group_puts_creator_first_once() {
    let mut hub = hub_as("u1");
    let mut draft = GroupDraft::new("Tuesday One-Shots").private();
    draft.member_ids = vec!["u3".to_string(), "u1".to_string(), "u2".to_string()];

    let group = hub.save_group(draft).unwrap();
    assert_eq!(group.member_ids, ["u1", "u3", "u2"]);
    assert!(group.is_private);
    assert!(!group.id.is_empty());
    assert_eq!(hub.groups().len(), 3);
}

#[test]
fn test_update_group_keeps_id() {
    let mut hub = hub_as("u1");
    let mut draft = GroupDraft::from(hub.group("g1").unwrap());
    draft.name = "The Obsidian Spires (Season 2)".to_string();
    draft.description = "Level 8 now.".to_string();

    let group = hub.save_group(draft).unwrap();
    assert_eq!(group.id, "g1");
    assert_eq!(group.name, "The Obsidian Spires (Season 2)");
    assert_eq!(hub.groups().len(), 2);
}

#[test]
fn test_save_group_rejects_blank_name_and_unknown_id() {
    let mut hub = hub_as("u1");
    assert!(matches!(
        hub.save_group(GroupDraft::new("  ")),
        Err(SocialError::Invalid { field: "name", .. })
    ));

    let mut draft = GroupDraft::new("Ghost");
    draft.id = Some("g404".to_string());
    assert!(matches!(hub.save_group(draft), Err(SocialError::NotFound { .. })));
}

#[test]
fn test_delete_group_needs_confirmation() {
    let mut hub = hub_as("u1");
    hub.send_group_message("g1", "see you thursday").unwrap();

    let mut asked = None;
    let deleted = hub
        .delete_group("g1", |prompt| {
            asked = Some(prompt.to_string());
            false
        })
        .unwrap();
    assert!(!deleted);
    assert_eq!(asked.as_deref(), Some(CONFIRM_DELETE_GROUP));
    assert!(hub.group("g1").is_some());

    assert!(hub.delete_group("g1", |_| true).unwrap());
    assert!(hub.group("g1").is_none());
    assert!(hub.group_messages("g1").is_empty());
}

#[test]
fn test_non_admin_cannot_manage_groups() {
    for user_id in ["u2", "u5"] {
        let mut hub = hub_as(user_id);
        let mut draft = GroupDraft::from(hub.group("g1").unwrap());
        draft.name = "Renamed".to_string();

        assert!(matches!(hub.save_group(draft), Err(SocialError::Forbidden(_))));
        assert!(matches!(hub.save_group(GroupDraft::new("Side table")), Err(SocialError::Forbidden(_))));

        let mut asked = false;
        let result = hub.delete_group("g2", |_| {
            asked = true;
            true
        });
        assert!(matches!(result, Err(SocialError::Forbidden(_))));
        assert!(!asked);
        assert!(hub.group("g2").is_some());
        assert_eq!(hub.group("g1").unwrap().name, "The Obsidian Spires");
        assert_eq!(hub.groups().len(), 2);
    }
}

// =============================================================================
// Invitations
// =============================================================================

#[test]
fn test_invite_existing_user_adds_to_draft() {
    let hub = hub_as("u1");
    let mut draft = GroupDraft::from(hub.group("g2").unwrap());

    let outcome = hub.invite_by_email(&mut draft, "  EVE@example.com ").unwrap();
    assert_eq!(
        outcome,
        InviteOutcome::Added {
            user_id: "u5".to_string(),
            name: "Eve Stranger".to_string()
        }
    );
    assert_eq!(outcome.to_string(), "Added Eve Stranger to the group!");
    assert!(draft.member_ids.contains(&"u5".to_string()));
    // The saved group is untouched until the draft is saved.
    assert!(!hub.group("g2").unwrap().has_member("u5"));
}

#[test]
fn test_invite_existing_member_is_rejected() {
    let hub = hub_as("u1");
    let mut draft = GroupDraft::from(hub.group("g1").unwrap());

    let err = hub.invite_by_email(&mut draft, "bob@example.com").unwrap_err();
    assert_eq!(err.to_string(), "Bob Builder is already in the group.");
}

#[test]
fn test_invite_unknown_email_sends_invitation() {
    let hub = hub_as("u1");
    let mut draft = GroupDraft::new("New Table");

    let outcome = hub.invite_by_email(&mut draft, "stranger@tavern.org").unwrap();
    assert_eq!(outcome.to_string(), "Invitation sent to stranger@tavern.org.");
    assert!(draft.member_ids.is_empty());
}

#[test]
fn test_invite_invalid_email() {
    let hub = hub_as("u1");
    let mut draft = GroupDraft::new("New Table");
    assert_eq!(hub.invite_by_email(&mut draft, "not-an-email"), Err(SocialError::InvalidEmail));
    assert_eq!(hub.invite_by_email(&mut draft, "   "), Err(SocialError::InvalidEmail));
}

// =============================================================================
// User Management
// =============================================================================

#[test]
fn test_admin_creates_user_with_defaults() {
    let mut hub = hub_as("u1");
    let user = hub.save_user(UserDraft::new("Mira")).unwrap();

    assert_eq!(user.role, Role::Member);
    assert_eq!(user.status, UserStatus::Offline);
    assert!(user.email.ends_with("@example.com"));
    assert!(user.avatar_url.contains("seed=Mira"));
}

#[test]
fn test_admin_updates_role() {
    let mut hub = hub_as("u1");
    let draft = UserDraft {
        id: Some("u2".to_string()),
        name: "Alice Walker".to_string(),
        role: Some(Role::DungeonMaster),
        ..UserDraft::default()
    };

    let user = hub.save_user(draft).unwrap();
    assert_eq!(user.role, Role::DungeonMaster);
    assert_eq!(user.email, "alice@example.com");
}

#[test]
fn test_non_admin_cannot_manage_users() {
    let mut hub = hub_as("u5");
    assert!(matches!(hub.save_user(UserDraft::new("Sneaky")), Err(SocialError::Forbidden(_))));
    assert!(matches!(hub.delete_user("u2", |_| true), Err(SocialError::Forbidden(_))));
    assert!(hub.user("u2").is_some());
}

#[test]
fn test_cannot_delete_self() {
    let mut hub = hub_as("u1");
    assert_eq!(hub.delete_user("u1", |_| true), Err(SocialError::CannotDeleteSelf));
}

#[test]
fn test_delete_user_needs_confirmation() {
    let mut hub = hub_as("u1");

    let mut asked = None;
    assert!(!hub
        .delete_user("u4", |prompt| {
            asked = Some(prompt.to_string());
            false
        })
        .unwrap());
    assert_eq!(asked.as_deref(), Some(CONFIRM_DELETE_USER));

    assert!(hub.delete_user("u4", |_| true).unwrap());
    assert!(hub.user("u4").is_none());
}

#[test]
fn test_update_profile_cannot_change_role() {
    let mut hub = hub_as("u2");
    let user = hub
        .update_profile(ProfileUpdate {
            name: "Alice W.".to_string(),
            status: Some(UserStatus::Busy),
            ..ProfileUpdate::default()
        })
        .unwrap();

    assert_eq!(user.name, "Alice W.");
    assert_eq!(user.status, UserStatus::Busy);
    assert_eq!(user.role, Role::Member);
    assert_eq!(user.email, "alice@example.com");

    assert!(hub.update_profile(ProfileUpdate::default()).is_err());
}

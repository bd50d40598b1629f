//! Demo roster used when no saved hub exists.

use chrono::{Duration, Utc};

use super::error::SocialResult;
use super::hub::SocialHub;
use super::models::{
    default_avatar_url, CalendarEvent, CalendarProvider, CalendarSettings, EventType, Group,
    PrivacyLevel, User, UserStatus,
};
use crate::core::permissions::Role;

fn user(id: &str, name: &str, email: &str, seed: &str, status: UserStatus, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        avatar_url: default_avatar_url(seed),
        status,
        role,
        calendar_settings: None,
    }
}

pub fn demo_users() -> Vec<User> {
    let mut admin = user("u1", "DM Admin", "dm@macrul.com", "Admin", UserStatus::Online, Role::Admin);
    admin.calendar_settings = Some(CalendarSettings {
        sync_enabled: true,
        provider: CalendarProvider::Google,
        privacy_level: PrivacyLevel::FullDetails,
    });
    let mut alice = user("u2", "Alice Walker", "alice@example.com", "Alice", UserStatus::InGame, Role::Member);
    alice.calendar_settings = Some(CalendarSettings {
        sync_enabled: true,
        provider: CalendarProvider::Google,
        privacy_level: PrivacyLevel::FreeBusy,
    });

    vec![
        admin,
        alice,
        user("u3", "Bob Builder", "bob@example.com", "Bob", UserStatus::Offline, Role::Member),
        user("u4", "Charlie Day", "charlie@example.com", "Charlie", UserStatus::Busy, Role::Member),
        user("u5", "Eve Stranger", "eve@example.com", "Eve", UserStatus::Online, Role::DungeonMaster),
    ]
}

pub fn demo_groups() -> Vec<Group> {
    vec![
        Group {
            id: "g1".to_string(),
            name: "The Obsidian Spires".to_string(),
            description: "Weekly D&D sessions. Level 5 campaign.".to_string(),
            member_ids: vec!["u1".into(), "u2".into(), "u3".into(), "u4".into()],
            is_private: false,
            image_url: None,
            campaign_id: Some("demo-1".to_string()),
            settings: None,
        },
        Group {
            id: "g2".to_string(),
            name: "Secret Council".to_string(),
            description: "DM Planning and Worldbuilding group.".to_string(),
            member_ids: vec!["u1".into()],
            is_private: true,
            image_url: None,
            campaign_id: None,
            settings: None,
        },
    ]
}

pub fn demo_events() -> Vec<CalendarEvent> {
    let now = Utc::now();
    vec![
        CalendarEvent {
            id: "e1".to_string(),
            title: "D&D Session 4".to_string(),
            start_time: now + Duration::days(1),
            end_time: now + Duration::days(1) + Duration::hours(3),
            location: None,
            event_type: EventType::Dnd,
            group_id: Some("g1".to_string()),
        },
        CalendarEvent {
            id: "e2".to_string(),
            title: "Character Creation".to_string(),
            start_time: now + Duration::days(2),
            end_time: now + Duration::days(2) + Duration::hours(2),
            location: None,
            event_type: EventType::Dnd,
            group_id: Some("g1".to_string()),
        },
    ]
}

/// A hub signed in as `current_user_id` over the demo roster.
pub fn demo_hub(current_user_id: &str) -> SocialResult<SocialHub> {
    SocialHub::with_data(current_user_id, demo_users(), demo_groups(), demo_events())
}

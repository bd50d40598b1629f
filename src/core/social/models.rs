//! Social Hub Data Models
//!
//! Users, groups, group chat, direct messages and the shared calendar.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::permissions::Role;

// ============================================================================
// Users
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UserStatus {
    Online,
    #[default]
    Offline,
    Busy,
    InGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarProvider {
    Google,
    Outlook,
    Apple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrivacyLevel {
    FreeBusy,
    FullDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarSettings {
    pub sync_enabled: bool,
    pub provider: CalendarProvider,
    pub privacy_level: PrivacyLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub status: UserStatus,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_settings: Option<CalendarSettings>,
}

impl User {
    /// Case-insensitive match on name or email.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        query.is_empty()
            || self.name.to_lowercase().contains(&query)
            || self.email.to_lowercase().contains(&query)
    }
}

pub fn default_avatar_url(seed: &str) -> String {
    format!("https://api.dicebear.com/9.x/avataaars/svg?seed={seed}")
}

// ============================================================================
// Groups
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSettings {
    /// Hours before unread messages are emailed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_unread_delay: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub name: String,
    pub description: String,
    pub member_ids: Vec<String>,
    /// Private ("airlocked") groups are hidden from non-members.
    pub is_private: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<GroupSettings>,
}

impl Group {
    pub fn has_member(&self, user_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == user_id)
    }
}

/// A group being created or edited. `id: None` creates a new group on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDraft {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub member_ids: Vec<String>,
    pub is_private: bool,
    pub image_url: Option<String>,
    pub campaign_id: Option<String>,
    pub settings: Option<GroupSettings>,
}

impl GroupDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    /// Add or remove `user_id` from the draft's member list.
    pub fn toggle_member(&mut self, user_id: &str) {
        if let Some(pos) = self.member_ids.iter().position(|id| id == user_id) {
            self.member_ids.remove(pos);
        } else {
            self.member_ids.push(user_id.to_string());
        }
    }
}

impl From<&Group> for GroupDraft {
    fn from(group: &Group) -> Self {
        Self {
            id: Some(group.id.clone()),
            name: group.name.clone(),
            description: group.description.clone(),
            member_ids: group.member_ids.clone(),
            is_private: group.is_private,
            image_url: group.image_url.clone(),
            campaign_id: group.campaign_id.clone(),
            settings: group.settings,
        }
    }
}

/// Result of inviting someone to a group by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteOutcome {
    /// A registered user was added to the draft's members.
    Added { user_id: String, name: String },
    /// No account uses this address; an invitation goes out instead.
    InvitationSent { email: String },
}

impl std::fmt::Display for InviteOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InviteOutcome::Added { name, .. } => write!(f, "Added {name} to the group!"),
            InviteOutcome::InvitationSent { email } => write!(f, "Invitation sent to {email}."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Direct Messages
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessage {
    pub id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmThread {
    pub id: String,
    pub participant_ids: Vec<String>,
    pub messages: Vec<DirectMessage>,
    pub last_updated: DateTime<Utc>,
    pub unread_count: u32,
    #[serde(default)]
    pub is_group_chat: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DmThread {
    pub fn involves(&self, user_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == user_id)
    }

    pub fn last_message(&self) -> Option<&DirectMessage> {
        self.messages.last()
    }
}

// ============================================================================
// Calendar
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Dnd,
    Hangout,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

//! Social Hub
//!
//! In-memory roster of users, groups, chats and events, seen from the point of
//! view of one signed-in user.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::error::{SocialError, SocialResult};
use super::models::{
    default_avatar_url, CalendarEvent, CalendarSettings, DirectMessage, DmThread, EventType,
    Group, GroupDraft, GroupMessage, InviteOutcome, User, UserStatus,
};
use crate::core::campaign::models::new_id;
use crate::core::permissions::{Capability, Role};

pub const CONFIRM_DELETE_GROUP: &str = "Are you sure you want to delete this group?";
pub const CONFIRM_DELETE_USER: &str = "Are you sure you want to remove this user? This cannot be undone.";

/// An account being created or edited by an admin. `id: None` creates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub id: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Option<Role>,
}

impl UserDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Fields a user may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub status: Option<UserStatus>,
    pub calendar_settings: Option<CalendarSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub event_type: EventType,
    pub group_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SocialHub {
    current_user_id: String,
    users: Vec<User>,
    groups: Vec<Group>,
    group_messages: HashMap<String, Vec<GroupMessage>>,
    threads: Vec<DmThread>,
    events: Vec<CalendarEvent>,
}

impl SocialHub {
    pub fn new(current_user: User) -> Self {
        Self {
            current_user_id: current_user.id.clone(),
            users: vec![current_user],
            groups: Vec::new(),
            group_messages: HashMap::new(),
            threads: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Build from existing records. The signed-in user must be among `users`.
    pub fn with_data(
        current_user_id: &str,
        users: Vec<User>,
        groups: Vec<Group>,
        events: Vec<CalendarEvent>,
    ) -> SocialResult<Self> {
        if !users.iter().any(|u| u.id == current_user_id) {
            return Err(SocialError::not_found("User", current_user_id));
        }
        Ok(Self {
            current_user_id: current_user_id.to_string(),
            users,
            groups,
            group_messages: HashMap::new(),
            threads: Vec::new(),
            events,
        })
    }

    // ------------------------------------------------------------------
    // Identity and access
    // ------------------------------------------------------------------

    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user(&self.current_user_id)
    }

    pub fn current_role(&self) -> Role {
        self.current_user().map(|u| u.role).unwrap_or_default()
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.current_role().can(capability)
    }

    /// View the hub as another existing user.
    pub fn switch_user(&mut self, user_id: &str) -> SocialResult<()> {
        if self.user(user_id).is_none() {
            return Err(SocialError::not_found("User", user_id));
        }
        log::debug!("Switched active user to {}", user_id);
        self.current_user_id = user_id.to_string();
        Ok(())
    }

    fn require(&self, capability: Capability, action: &'static str) -> SocialResult<()> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(SocialError::Forbidden(action))
        }
    }

    // ------------------------------------------------------------------
    // Groups
    // ------------------------------------------------------------------

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Groups the current user may see: their own, every public group, and
    /// private ones too for admins.
    pub fn visible_groups(&self) -> Vec<&Group> {
        let sees_private = self.can(Capability::SeePrivateGroups);
        self.groups
            .iter()
            .filter(|g| g.has_member(&self.current_user_id) || sees_private || !g.is_private)
            .collect()
    }

    pub fn my_groups(&self) -> Vec<&Group> {
        self.visible_groups()
            .into_iter()
            .filter(|g| g.has_member(&self.current_user_id))
            .collect()
    }

    /// Whether the current user may enter the tabletop at all.
    pub fn has_dnd_access(&self) -> bool {
        !self.my_groups().is_empty() || self.can(Capability::UseCoPilot)
    }

    /// Create (creator first in the member list) or update a group.
    pub fn save_group(&mut self, draft: GroupDraft) -> SocialResult<&Group> {
        self.require(Capability::ManageGroups, "Managing groups")?;
        if draft.name.trim().is_empty() {
            return Err(SocialError::required("name"));
        }

        let index = match &draft.id {
            Some(id) => {
                let index = self
                    .groups
                    .iter()
                    .position(|g| &g.id == id)
                    .ok_or_else(|| SocialError::not_found("Group", id.as_str()))?;
                let group = &mut self.groups[index];
                group.name = draft.name;
                group.description = draft.description;
                group.member_ids = draft.member_ids;
                group.is_private = draft.is_private;
                group.image_url = draft.image_url;
                group.campaign_id = draft.campaign_id;
                group.settings = draft.settings;
                index
            }
            None => {
                let mut member_ids = vec![self.current_user_id.clone()];
                member_ids.extend(draft.member_ids.into_iter().filter(|id| *id != self.current_user_id));
                let group = Group {
                    id: new_id(),
                    name: draft.name,
                    description: draft.description,
                    member_ids,
                    is_private: draft.is_private,
                    image_url: draft.image_url,
                    campaign_id: draft.campaign_id,
                    settings: draft.settings,
                };
                log::info!("Created group '{}' ({})", group.name, group.id);
                self.groups.push(group);
                self.groups.len() - 1
            }
        };
        Ok(&self.groups[index])
    }

    pub fn delete_group(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> SocialResult<bool> {
        self.require(Capability::ManageGroups, "Managing groups")?;
        let index = self
            .groups
            .iter()
            .position(|g| g.id == id)
            .ok_or_else(|| SocialError::not_found("Group", id))?;
        if !confirm(CONFIRM_DELETE_GROUP) {
            return Ok(false);
        }
        let group = self.groups.remove(index);
        self.group_messages.remove(&group.id);
        log::info!("Deleted group '{}'", group.name);
        Ok(true)
    }

    /// Invite by email into a group that is being edited.
    pub fn invite_by_email(&self, draft: &mut GroupDraft, email: &str) -> SocialResult<InviteOutcome> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(SocialError::InvalidEmail);
        }

        let existing = self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email));
        match existing {
            Some(user) if draft.member_ids.contains(&user.id) => Err(SocialError::AlreadyMember {
                name: user.name.clone(),
            }),
            Some(user) => {
                draft.member_ids.push(user.id.clone());
                Ok(InviteOutcome::Added {
                    user_id: user.id.clone(),
                    name: user.name.clone(),
                })
            }
            None => {
                log::info!("Sending group invitation to {}", email);
                Ok(InviteOutcome::InvitationSent {
                    email: email.to_string(),
                })
            }
        }
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Case-insensitive search over names and emails.
    pub fn search_users(&self, query: &str) -> Vec<&User> {
        self.users.iter().filter(|u| u.matches(query)).collect()
    }

    /// Admin create-or-update of an account.
    pub fn save_user(&mut self, draft: UserDraft) -> SocialResult<&User> {
        self.require(Capability::ManageUsers, "Managing users")?;
        if draft.name.trim().is_empty() {
            return Err(SocialError::required("name"));
        }

        let index = match &draft.id {
            Some(id) => {
                let index = self
                    .users
                    .iter()
                    .position(|u| &u.id == id)
                    .ok_or_else(|| SocialError::not_found("User", id.as_str()))?;
                let user = &mut self.users[index];
                user.name = draft.name;
                if let Some(email) = draft.email.filter(|e| !e.trim().is_empty()) {
                    user.email = email;
                }
                if let Some(avatar) = draft.avatar_url.filter(|a| !a.trim().is_empty()) {
                    user.avatar_url = avatar;
                }
                if let Some(role) = draft.role {
                    user.role = role;
                }
                index
            }
            None => {
                let email = draft
                    .email
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| format!("user{}@example.com", Utc::now().timestamp_millis()));
                let avatar_url = draft
                    .avatar_url
                    .filter(|a| !a.trim().is_empty())
                    .unwrap_or_else(|| default_avatar_url(&draft.name));
                let user = User {
                    id: new_id(),
                    name: draft.name,
                    email,
                    avatar_url,
                    status: UserStatus::Offline,
                    role: draft.role.unwrap_or_default(),
                    calendar_settings: None,
                };
                log::info!("Added user '{}' as {}", user.name, user.role);
                self.users.push(user);
                self.users.len() - 1
            }
        };
        Ok(&self.users[index])
    }

    /// Remove an account. Never removes the signed-in user.
    pub fn delete_user(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> SocialResult<bool> {
        if id == self.current_user_id {
            return Err(SocialError::CannotDeleteSelf);
        }
        self.require(Capability::ManageUsers, "Managing users")?;
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| SocialError::not_found("User", id))?;
        if !confirm(CONFIRM_DELETE_USER) {
            return Ok(false);
        }
        let user = self.users.remove(index);
        log::info!("Removed user '{}'", user.name);
        Ok(true)
    }

    /// Update the signed-in user's own profile. The role is not editable here.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> SocialResult<&User> {
        if update.name.trim().is_empty() {
            return Err(SocialError::required("name"));
        }
        let current = self.current_user_id.clone();
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == current)
            .ok_or_else(|| SocialError::not_found("User", current.as_str()))?;

        user.name = update.name;
        if let Some(email) = update.email.filter(|e| !e.trim().is_empty()) {
            user.email = email;
        }
        if let Some(avatar) = update.avatar_url.filter(|a| !a.trim().is_empty()) {
            user.avatar_url = avatar;
        }
        if let Some(status) = update.status {
            user.status = status;
        }
        if update.calendar_settings.is_some() {
            user.calendar_settings = update.calendar_settings;
        }
        Ok(&*user)
    }

    // ------------------------------------------------------------------
    // Group chat
    // ------------------------------------------------------------------

    pub fn group_messages(&self, group_id: &str) -> &[GroupMessage] {
        self.group_messages.get(group_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Post to a group's chat. Blank text is ignored.
    pub fn send_group_message(&mut self, group_id: &str, text: &str) -> SocialResult<Option<&GroupMessage>> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        if self.group(group_id).is_none() {
            return Err(SocialError::not_found("Group", group_id));
        }
        let sender_name = self
            .current_user()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| self.current_user_id.clone());

        let message = GroupMessage {
            id: new_id(),
            sender_id: self.current_user_id.clone(),
            sender_name,
            text: text.to_string(),
            timestamp: Utc::now(),
        };
        let transcript = self.group_messages.entry(group_id.to_string()).or_default();
        transcript.push(message);
        Ok(transcript.last())
    }

    // ------------------------------------------------------------------
    // Direct messages
    // ------------------------------------------------------------------

    /// Threads the signed-in user takes part in, most recent first.
    pub fn threads(&self) -> Vec<&DmThread> {
        let mut threads: Vec<&DmThread> = self
            .threads
            .iter()
            .filter(|t| t.involves(&self.current_user_id))
            .collect();
        threads.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        threads
    }

    pub fn thread(&self, id: &str) -> Option<&DmThread> {
        self.threads.iter().find(|t| t.id == id)
    }

    /// Open a conversation with `target_user_id`, reusing an existing thread
    /// between the two users.
    pub fn create_thread(&mut self, target_user_id: &str) -> SocialResult<&DmThread> {
        if self.user(target_user_id).is_none() {
            return Err(SocialError::not_found("User", target_user_id));
        }

        let existing = self
            .threads
            .iter()
            .position(|t| t.involves(target_user_id) && t.involves(&self.current_user_id));
        let index = match existing {
            Some(index) => index,
            None => {
                self.threads.push(DmThread {
                    id: format!("thread-{}", new_id()),
                    participant_ids: vec![self.current_user_id.clone(), target_user_id.to_string()],
                    messages: Vec::new(),
                    last_updated: Utc::now(),
                    unread_count: 0,
                    is_group_chat: false,
                    name: None,
                });
                self.threads.len() - 1
            }
        };
        Ok(&self.threads[index])
    }

    /// Send a direct message. Blank content is ignored.
    pub fn send_direct_message(&mut self, thread_id: &str, content: &str) -> SocialResult<Option<&DirectMessage>> {
        if content.trim().is_empty() {
            return Ok(None);
        }
        let sender_id = self.current_user_id.clone();
        let thread = self
            .threads
            .iter_mut()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| SocialError::not_found("Thread", thread_id))?;

        let now = Utc::now();
        thread.messages.push(DirectMessage {
            id: new_id(),
            sender_id,
            content: content.to_string(),
            timestamp: now,
        });
        thread.last_updated = now;
        thread.unread_count = 0;
        Ok(thread.messages.last())
    }

    // ------------------------------------------------------------------
    // Calendar
    // ------------------------------------------------------------------

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn add_event(&mut self, draft: EventDraft) -> SocialResult<&CalendarEvent> {
        validate_event(&draft.title, draft.start_time, draft.end_time)?;
        self.events.push(CalendarEvent {
            id: new_id(),
            title: draft.title,
            start_time: draft.start_time,
            end_time: draft.end_time,
            location: draft.location,
            event_type: draft.event_type,
            group_id: draft.group_id,
        });
        Ok(&self.events[self.events.len() - 1])
    }

    pub fn update_event(&mut self, event: CalendarEvent) -> SocialResult<&CalendarEvent> {
        validate_event(&event.title, event.start_time, event.end_time)?;
        let index = self
            .events
            .iter()
            .position(|e| e.id == event.id)
            .ok_or_else(|| SocialError::not_found("Event", event.id.as_str()))?;
        self.events[index] = event;
        Ok(&self.events[index])
    }

    pub fn delete_event(&mut self, id: &str) -> SocialResult<CalendarEvent> {
        let index = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SocialError::not_found("Event", id))?;
        Ok(self.events.remove(index))
    }

    pub fn events_for_group(&self, group_id: &str) -> Vec<&CalendarEvent> {
        self.events
            .iter()
            .filter(|e| e.group_id.as_deref() == Some(group_id))
            .collect()
    }

    /// Events that have not ended by `now`, earliest start first.
    pub fn upcoming_events(&self, now: DateTime<Utc>) -> Vec<&CalendarEvent> {
        let mut upcoming: Vec<&CalendarEvent> = self.events.iter().filter(|e| e.end_time >= now).collect();
        upcoming.sort_by_key(|e| e.start_time);
        upcoming
    }
}

fn validate_event(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> SocialResult<()> {
    if title.trim().is_empty() {
        return Err(SocialError::required("title"));
    }
    if end < start {
        return Err(SocialError::Invalid {
            field: "end_time",
            reason: "ends before it starts".to_string(),
        });
    }
    Ok(())
}

//! Social Hub Module
//!
//! Users and roles, groups with private ("airlocked") visibility, group chat,
//! direct messages and the shared calendar.

pub mod error;
pub mod hub;
pub mod models;
pub mod seed;

pub use error::{SocialError, SocialResult};
pub use hub::{EventDraft, ProfileUpdate, SocialHub, UserDraft, CONFIRM_DELETE_GROUP, CONFIRM_DELETE_USER};
pub use models::{
    CalendarEvent, CalendarProvider, CalendarSettings, DirectMessage, DmThread, EventType, Group,
    GroupDraft, GroupMessage, GroupSettings, InviteOutcome, PrivacyLevel, User, UserStatus,
};
pub use seed::demo_hub;

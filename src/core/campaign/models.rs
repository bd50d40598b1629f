//! Campaign Data Models
//!
//! A `Campaign` owns everything played inside it: the party's characters, the
//! session log, the player chat, and the co-pilot transcript. Nothing outside
//! a campaign references these records, so a campaign is the unit that gets
//! swapped in and out of the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::cards::{self, Segment};

/// Sender id of the human DM in the player chat.
pub const DM_SENDER_ID: &str = "dm";
/// Sender id of the local player when the AI runs the table.
pub const PLAYER_SENDER_ID: &str = "user";
/// Sender id of the AI Dungeon Master.
pub const AI_DM_SENDER_ID: &str = "ai-dm";
/// Display name of the AI Dungeon Master.
pub const AI_DM_SENDER_NAME: &str = "Dungeon Master";

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ============================================================================
// Campaign
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub invite_code: String,
    pub description: String,
    #[serde(default)]
    pub characters: Vec<Character>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub player_chat: Vec<PlayerMessage>,
    #[serde(default)]
    pub ai_chat_history: Vec<Message>,
    /// When set, the AI narrates and the local user plays.
    #[serde(default)]
    pub is_ai_dm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
}

impl Campaign {
    pub fn character(&self, character_id: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == character_id)
    }

    pub fn character_mut(&mut self, character_id: &str) -> Option<&mut Character> {
        self.characters.iter_mut().find(|c| c.id == character_id)
    }

    /// Characters played by the given user.
    pub fn characters_for_player<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Character> + 'a {
        self.characters
            .iter()
            .filter(move |c| c.player_id.as_deref() == Some(user_id))
    }

    /// Shareable join link for this campaign's invite code.
    pub fn join_link(&self) -> String {
        super::invite::join_link(&self.invite_code)
    }
}

// ============================================================================
// Characters
// ============================================================================

/// The six ability scores, each kept within 1..=20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub str: u8,
    pub dex: u8,
    pub con: u8,
    pub int: u8,
    pub wis: u8,
    pub cha: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    #[default]
    None,
    Sent,
    Accepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: i32,
    pub max: i32,
    pub temp: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitDice {
    pub total: u32,
    pub current: u32,
    /// Die size, e.g. "d8".
    pub size: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeathSaves {
    pub successes: u8,
    pub failures: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    /// To-hit bonus as written on the sheet, e.g. "+5".
    pub bonus: String,
    /// Damage formula, e.g. "1d8+3".
    pub damage: String,
    #[serde(rename = "type")]
    pub damage_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Personality {
    pub traits: String,
    pub ideals: String,
    pub bonds: String,
    pub flaws: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: String,
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: String,
    pub level: u32,
    pub stats: AbilityScores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Registered user playing this character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    /// External invite when no user is assigned yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_email: Option<String>,
    #[serde(default)]
    pub invite_status: InviteStatus,

    // Extended 5e sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<HitPoints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_dice: Option<HitDice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_saves: Option<DeathSaves>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiency_bonus: Option<i32>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proficiencies: Option<String>,
    #[serde(default)]
    pub attacks: Vec<Attack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<Personality>,
}

// ============================================================================
// Session Log
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryType {
    #[default]
    Note,
    Decision,
    Quest,
    Interaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub content: String,
    #[serde(rename = "type")]
    pub entry_type: LogEntryType,
}

impl LogEntry {
    pub fn new(content: impl Into<String>, entry_type: LogEntryType) -> Self {
        Self {
            id: new_id(),
            timestamp: Utc::now(),
            content: content.into(),
            entry_type,
        }
    }
}

// ============================================================================
// Player Chat
// ============================================================================

/// Result of a dice roll attached to a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoll {
    pub total: i64,
    pub formula: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_whisper: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_result: Option<ChatRoll>,
    /// Generated image or map, as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl PlayerMessage {
    pub fn new(sender_id: impl Into<String>, sender_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            sender_id: sender_id.into(),
            sender_name: sender_name.into(),
            content: content.into(),
            timestamp: Utc::now(),
            is_whisper: false,
            roll_result: None,
            attachment_url: None,
        }
    }

    pub fn with_roll(mut self, total: i64, formula: impl Into<String>) -> Self {
        self.roll_result = Some(ChatRoll {
            total,
            formula: formula.into(),
        });
        self
    }

    pub fn with_attachment(mut self, url: impl Into<String>) -> Self {
        self.attachment_url = Some(url.into());
        self
    }

    pub fn is_roll(&self) -> bool {
        self.roll_result.is_some()
    }

    /// Whether the AI or the human DM wrote this message.
    pub fn is_from_dm(&self) -> bool {
        self.sender_id == DM_SENDER_ID || self.sender_id == AI_DM_SENDER_ID
    }
}

// ============================================================================
// Co-Pilot Chat
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Model,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_panic_response: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    pub fn model(content: impl Into<String>) -> Self {
        let content = content.into();
        let is_panic_response = cards::is_panic_response(&content);
        Self {
            is_panic_response,
            ..Self::new(MessageRole::Model, content)
        }
    }

    fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_panic_response: false,
        }
    }

    /// Display segments for this message. Only model output is scanned for
    /// cards; what the user typed is shown verbatim.
    pub fn segments(&self) -> Vec<Segment<'_>> {
        match self.role {
            MessageRole::User => vec![Segment::Text(&self.content)],
            MessageRole::Model | MessageRole::System => cards::segment(&self.content),
        }
    }

    pub fn is_safety_alert(&self) -> bool {
        self.role != MessageRole::User && cards::is_safety_alert(&self.content)
    }
}

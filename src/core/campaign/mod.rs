//! Campaign Management Module
//!
//! Campaigns, their characters and transcripts, and the in-memory store that
//! swaps whole campaign snapshots on every edit.

pub mod character;
pub mod dice;
pub mod error;
pub mod invite;
pub mod models;
pub mod store;
pub mod templates;

pub use character::{ability_modifier, format_modifier, pregenerated_drafts, random_pregenerated, CharacterDraft};
pub use dice::{DiceError, DiceNotation, DiceRoller, RollResult, STANDARD_DICE};
pub use error::{CampaignError, CampaignResult};
pub use invite::{generate_invite_code, join_link, normalize_invite_code};
pub use models::{
    Ability, AbilityScores, Attack, Campaign, Character, ChatRoll, DeathSaves, HitDice, HitPoints,
    InviteStatus, LogEntry, LogEntryType, Message, MessageRole, Personality, PlayerMessage,
    AI_DM_SENDER_ID, AI_DM_SENDER_NAME, DM_SENDER_ID, PLAYER_SENDER_ID,
};
pub use store::CampaignStore;
pub use templates::{builtin_templates, CampaignDraft, CampaignTemplate};

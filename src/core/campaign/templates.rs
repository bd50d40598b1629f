//! Campaign creation: blank drafts and importable adventure templates.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{CampaignError, CampaignResult};
use super::invite::generate_invite_code;
use super::models::{
    new_id, Campaign, LogEntry, LogEntryType, Message, PlayerMessage, AI_DM_SENDER_ID,
    AI_DM_SENDER_NAME,
};
use crate::core::llm::prompts::greeting_for;

const DEFAULT_DESCRIPTION: &str = "A generic fantasy adventure.";

/// Fields collected when creating a campaign from scratch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignDraft {
    pub name: String,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub ai_dm: bool,
}

impl CampaignDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_ai_dm(mut self, ai_dm: bool) -> Self {
        self.ai_dm = ai_dm;
        self
    }

    /// Build an empty campaign. The co-pilot transcript opens with the
    /// greeting that matches who runs the table.
    pub fn build(self, rng: &mut impl Rng) -> CampaignResult<Campaign> {
        if self.name.trim().is_empty() {
            return Err(CampaignError::required("name"));
        }

        Ok(Campaign {
            id: new_id(),
            name: self.name,
            invite_code: generate_invite_code(rng),
            description: self
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            characters: Vec::new(),
            logs: Vec::new(),
            player_chat: Vec::new(),
            ai_chat_history: vec![Message::model(greeting_for(self.ai_dm))],
            is_ai_dm: self.ai_dm,
            banner_url: self.banner_url.filter(|b| !b.trim().is_empty()),
        })
    }
}

/// A published adventure that can be imported as a ready-to-play campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub intro_text: String,
    pub difficulty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl CampaignTemplate {
    /// Imported adventures run in AI-DM mode so the importer can play. The AI
    /// DM opens the player chat with the template's intro text.
    pub fn instantiate(&self, rng: &mut impl Rng) -> Campaign {
        Campaign {
            id: new_id(),
            name: self.name.clone(),
            invite_code: generate_invite_code(rng),
            description: self.description.clone(),
            characters: Vec::new(),
            logs: vec![LogEntry::new(
                format!("Campaign started: {}", self.name),
                LogEntryType::Note,
            )],
            player_chat: vec![PlayerMessage::new(
                AI_DM_SENDER_ID,
                AI_DM_SENDER_NAME,
                self.intro_text.clone(),
            )],
            ai_chat_history: vec![Message::model(greeting_for(true))],
            is_ai_dm: true,
            banner_url: self.cover_image.clone(),
        }
    }
}

/// The adventures offered in the lobby's import list.
pub fn builtin_templates() -> Vec<CampaignTemplate> {
    vec![
        CampaignTemplate {
            id: "t1".to_string(),
            name: "The Sunless Citadel".to_string(),
            description: "A crumbling fortress buried in the earth where goblins and kobolds vie for power.".to_string(),
            intro_text: "You stand before the ravine. The old road winds down into the darkness...".to_string(),
            difficulty: "Level 1-3".to_string(),
            cover_image: Some("https://images.unsplash.com/photo-1519074069444-1ba4fff66d16?q=80&w=300&auto=format&fit=crop".to_string()),
        },
        CampaignTemplate {
            id: "t2".to_string(),
            name: "Curse of the Crystal Bay".to_string(),
            description: "Pirates, haunted coves, and a mystery that threatens the trade routes.".to_string(),
            intro_text: "The salt air stings your eyes as the ship pulls into the fog-shrouded harbor.".to_string(),
            difficulty: "Level 3-5".to_string(),
            cover_image: Some("https://images.unsplash.com/photo-1478479405421-ce83c92fb3ba?q=80&w=300&auto=format&fit=crop".to_string()),
        },
        CampaignTemplate {
            id: "t3".to_string(),
            name: "Shadows of the Spire".to_string(),
            description: "An urban intrigue adventure set in a city ruled by masked lords.".to_string(),
            intro_text: "Rain slicks the cobblestones of High Street. You have a message to deliver.".to_string(),
            difficulty: "Level 5-8".to_string(),
            cover_image: Some("https://images.unsplash.com/photo-1518709268805-4e9042af9f23?q=80&w=300&auto=format&fit=crop".to_string()),
        },
    ]
}

//! Campaign Store
//!
//! One authoritative copy of every campaign, handed out as immutable
//! `Arc<Campaign>` snapshots. Every edit clones the current snapshot, applies
//! the change and swaps the result in; readers holding an older snapshot keep
//! seeing it unchanged. The latest write for a campaign id wins.

use std::sync::Arc;

use super::character::CharacterDraft;
use super::error::{CampaignError, CampaignResult};
use super::invite::normalize_invite_code;
use super::models::{Campaign, Character, InviteStatus, LogEntry, LogEntryType, Message, PlayerMessage};
use crate::core::llm::prompts::greeting_for;

pub const CONFIRM_REMOVE_CHARACTER: &str = "Remove this character?";
pub const CONFIRM_DELETE_CAMPAIGN: &str = "Delete this campaign? This cannot be undone.";
pub const CONFIRM_CLEAR_CHAT: &str = "Clear chat history?";

#[derive(Debug, Default, Clone)]
pub struct CampaignStore {
    campaigns: Vec<Arc<Campaign>>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_campaigns(campaigns: impl IntoIterator<Item = Campaign>) -> Self {
        Self {
            campaigns: campaigns.into_iter().map(Arc::new).collect(),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Current snapshots, in creation order.
    pub fn list(&self) -> &[Arc<Campaign>] {
        &self.campaigns
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Arc<Campaign>> {
        self.campaigns.iter().find(|c| c.id == id).cloned()
    }

    /// Look a campaign up by invite code or join link.
    pub fn find_by_invite_code(&self, code: &str) -> Option<Arc<Campaign>> {
        let code = normalize_invite_code(code);
        self.campaigns.iter().find(|c| c.invite_code == code).cloned()
    }

    fn position(&self, id: &str) -> CampaignResult<usize> {
        self.campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| CampaignError::NotFound(id.to_string()))
    }

    // ========================================================================
    // Whole-object writes
    // ========================================================================

    pub fn insert(&mut self, campaign: Campaign) -> CampaignResult<Arc<Campaign>> {
        if self.campaigns.iter().any(|c| c.id == campaign.id) {
            return Err(CampaignError::AlreadyExists(campaign.id));
        }
        log::info!("Created campaign '{}' ({})", campaign.name, campaign.id);
        let snapshot = Arc::new(campaign);
        self.campaigns.push(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Swap in a new version of an existing campaign.
    pub fn replace(&mut self, campaign: Campaign) -> CampaignResult<Arc<Campaign>> {
        let idx = self.position(&campaign.id)?;
        let snapshot = Arc::new(campaign);
        self.campaigns[idx] = Arc::clone(&snapshot);
        Ok(snapshot)
    }

    /// Clone the current snapshot, edit the copy, and swap it in.
    pub fn update<F>(&mut self, id: &str, edit: F) -> CampaignResult<Arc<Campaign>>
    where
        F: FnOnce(&mut Campaign) -> CampaignResult<()>,
    {
        let idx = self.position(id)?;
        let mut next = Campaign::clone(&self.campaigns[idx]);
        edit(&mut next)?;
        let snapshot = Arc::new(next);
        self.campaigns[idx] = Arc::clone(&snapshot);
        Ok(snapshot)
    }

    /// Delete a campaign once `confirm` agrees. Returns whether it was removed.
    pub fn remove(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> CampaignResult<bool> {
        let idx = self.position(id)?;
        if !confirm(CONFIRM_DELETE_CAMPAIGN) {
            return Ok(false);
        }
        let removed = self.campaigns.remove(idx);
        log::info!("Deleted campaign '{}' ({})", removed.name, removed.id);
        Ok(true)
    }

    // ========================================================================
    // Campaign settings
    // ========================================================================

    pub fn rename(&mut self, id: &str, name: &str) -> CampaignResult<Arc<Campaign>> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CampaignError::required("name"));
        }
        self.update(id, |c| {
            c.name = name.to_string();
            Ok(())
        })
    }

    pub fn set_description(&mut self, id: &str, description: &str) -> CampaignResult<Arc<Campaign>> {
        self.update(id, |c| {
            c.description = description.to_string();
            Ok(())
        })
    }

    pub fn set_banner(&mut self, id: &str, banner_url: Option<String>) -> CampaignResult<Arc<Campaign>> {
        self.update(id, |c| {
            c.banner_url = banner_url.filter(|b| !b.trim().is_empty());
            Ok(())
        })
    }

    pub fn set_ai_dm(&mut self, id: &str, enabled: bool) -> CampaignResult<Arc<Campaign>> {
        log::debug!("Campaign {id}: AI-DM mode {}", if enabled { "on" } else { "off" });
        self.update(id, |c| {
            c.is_ai_dm = enabled;
            Ok(())
        })
    }

    // ========================================================================
    // Characters
    // ========================================================================

    pub fn add_character(&mut self, id: &str, draft: CharacterDraft) -> CampaignResult<Arc<Campaign>> {
        let character = draft.build()?;
        log::debug!("Campaign {id}: adding character '{}'", character.name);
        self.update(id, |c| {
            c.characters.push(character);
            Ok(())
        })
    }

    /// Replace a character's record wholesale (sheet edits).
    ///
    /// Edits follow the creation rules: name, race and class must not be blank,
    /// and scores and level are clamped into 1..=20.
    pub fn update_character(&mut self, id: &str, character: Character) -> CampaignResult<Arc<Campaign>> {
        let character = character.validated()?;
        self.update(id, |c| {
            let slot = c
                .character_mut(&character.id)
                .ok_or_else(|| CampaignError::character_not_found(id, &character.id))?;
            *slot = character;
            Ok(())
        })
    }

    /// Link a registered user to a character; the invite counts as accepted.
    pub fn assign_player(&mut self, id: &str, character_id: &str, user_id: &str) -> CampaignResult<Arc<Campaign>> {
        self.update(id, |c| {
            let character = c
                .character_mut(character_id)
                .ok_or_else(|| CampaignError::character_not_found(id, character_id))?;
            character.player_id = Some(user_id.to_string());
            character.invite_status = InviteStatus::Accepted;
            Ok(())
        })
    }

    /// Remove a character once `confirm` agrees. Returns whether it was removed.
    pub fn remove_character(
        &mut self,
        id: &str,
        character_id: &str,
        confirm: impl FnOnce(&str) -> bool,
    ) -> CampaignResult<bool> {
        let campaign = self.get(id).ok_or_else(|| CampaignError::NotFound(id.to_string()))?;
        if campaign.character(character_id).is_none() {
            return Err(CampaignError::character_not_found(id, character_id));
        }
        if !confirm(CONFIRM_REMOVE_CHARACTER) {
            return Ok(false);
        }
        self.update(id, |c| {
            c.characters.retain(|ch| ch.id != character_id);
            Ok(())
        })?;
        Ok(true)
    }

    // ========================================================================
    // Transcripts
    // ========================================================================

    pub fn append_log(&mut self, id: &str, content: &str, entry_type: LogEntryType) -> CampaignResult<Arc<Campaign>> {
        if content.trim().is_empty() {
            return Err(CampaignError::required("log entry"));
        }
        let entry = LogEntry::new(content, entry_type);
        self.update(id, |c| {
            c.logs.push(entry);
            Ok(())
        })
    }

    pub fn append_player_messages(
        &mut self,
        id: &str,
        messages: impl IntoIterator<Item = PlayerMessage>,
    ) -> CampaignResult<Arc<Campaign>> {
        self.update(id, |c| {
            c.player_chat.extend(messages);
            Ok(())
        })
    }

    pub fn append_ai_messages(
        &mut self,
        id: &str,
        messages: impl IntoIterator<Item = Message>,
    ) -> CampaignResult<Arc<Campaign>> {
        self.update(id, |c| {
            c.ai_chat_history.extend(messages);
            Ok(())
        })
    }

    /// Reset the co-pilot transcript to its greeting once `confirm` agrees.
    pub fn clear_ai_chat(&mut self, id: &str, confirm: impl FnOnce(&str) -> bool) -> CampaignResult<bool> {
        self.position(id)?;
        if !confirm(CONFIRM_CLEAR_CHAT) {
            return Ok(false);
        }
        self.update(id, |c| {
            c.ai_chat_history = vec![Message::model(greeting_for(c.is_ai_dm))];
            Ok(())
        })?;
        Ok(true)
    }
}

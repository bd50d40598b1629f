//! Party chat actions: messages, dice, meetings, shared images and the AI DM.
//!
//! Synchronous actions write straight into the store. The two AI-backed
//! actions are split in half so a caller can run generation on a task: first
//! build the message from a snapshot, then append it with [`deliver`].

use std::sync::Arc;

use crate::core::campaign::{
    Campaign, CampaignError, CampaignResult, CampaignStore, DiceNotation, DiceRoller, PlayerMessage, AI_DM_SENDER_ID,
    AI_DM_SENDER_NAME, DM_SENDER_ID, PLAYER_SENDER_ID,
};
use crate::core::llm::{CoPilot, Result as LLMResult};

pub const MEETING_ANNOUNCEMENT: &str = "I've started a video meeting for the party. Click to join!";

/// Who a party-chat message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sender {
    pub id: &'static str,
    pub name: &'static str,
}

impl Sender {
    pub const DM: Sender = Sender {
        id: DM_SENDER_ID,
        name: "DM (You)",
    };
    pub const PLAYER: Sender = Sender {
        id: PLAYER_SENDER_ID,
        name: "You",
    };
    pub const AI_DM: Sender = Sender {
        id: AI_DM_SENDER_ID,
        name: AI_DM_SENDER_NAME,
    };

    /// The local user: a player when the AI runs the table, the DM otherwise.
    pub fn local(campaign: &Campaign) -> Sender {
        if campaign.is_ai_dm {
            Sender::PLAYER
        } else {
            Sender::DM
        }
    }

    /// Shared images come from the AI DM in AI-DM mode.
    pub fn illustrator(campaign: &Campaign) -> Sender {
        if campaign.is_ai_dm {
            Sender::AI_DM
        } else {
            Sender::DM
        }
    }

    pub fn message(&self, content: impl Into<String>) -> PlayerMessage {
        PlayerMessage::new(self.id, self.name, content)
    }
}

fn local_sender(store: &CampaignStore, id: &str) -> CampaignResult<Sender> {
    let campaign = store
        .get(id)
        .ok_or_else(|| CampaignError::NotFound(id.to_string()))?;
    Ok(Sender::local(&campaign))
}

/// Post free text. Blank input is ignored and yields `None`.
pub fn post_message(store: &mut CampaignStore, id: &str, text: &str) -> CampaignResult<Option<Arc<Campaign>>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let sender = local_sender(store, id)?;
    store.append_player_messages(id, [sender.message(text)]).map(Some)
}

/// Roll a single die from the dice tray.
pub fn roll_die(
    store: &mut CampaignStore,
    id: &str,
    roller: &mut DiceRoller,
    sides: u32,
) -> CampaignResult<Arc<Campaign>> {
    let sender = local_sender(store, id)?;
    let result = roller.roll_die(sides);
    log::debug!("Rolled {} = {}", result.formula(), result.total);
    let message = sender
        .message(format!("Rolled D{sides}:"))
        .with_roll(result.total, result.formula());
    store.append_player_messages(id, [message])
}

/// Roll typed notation such as `2d6+3`.
pub fn roll_notation(
    store: &mut CampaignStore,
    id: &str,
    roller: &mut DiceRoller,
    notation: &str,
) -> CampaignResult<Arc<Campaign>> {
    let notation = DiceNotation::parse(notation)?;
    let sender = local_sender(store, id)?;
    let result = roller.roll(&notation);
    log::debug!("Rolled {} = {} {:?}", result.formula(), result.total, result.rolls);
    let message = sender
        .message(format!("Rolled {notation}:"))
        .with_roll(result.total, result.formula());
    store.append_player_messages(id, [message])
}

/// Announce a check, then post its d20 result.
pub fn request_roll(
    store: &mut CampaignStore,
    id: &str,
    roller: &mut DiceRoller,
    check: &str,
) -> CampaignResult<Arc<Campaign>> {
    let sender = local_sender(store, id)?;
    let result = roller.roll_die(20);
    let announcement = sender.message(format!("I am rolling for {check}"));
    let outcome = sender
        .message(format!("Result for {check}:"))
        .with_roll(result.total, result.formula());
    store.append_player_messages(id, [announcement, outcome])
}

pub fn start_meeting(store: &mut CampaignStore, id: &str) -> CampaignResult<Arc<Campaign>> {
    let sender = local_sender(store, id)?;
    store.append_player_messages(id, [sender.message(MEETING_ANNOUNCEMENT)])
}

/// Generate a scene for `prompt` and wrap it in a chat message.
///
/// `Ok(None)` for a blank prompt or when no image came back; the chat is left
/// untouched in both cases.
pub async fn illustrate(copilot: &CoPilot, campaign: &Campaign, prompt: &str) -> LLMResult<Option<PlayerMessage>> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Ok(None);
    }

    let Some(image) = copilot.illustrate(prompt).await? else {
        return Ok(None);
    };

    let sender = Sender::illustrator(campaign);
    let content = if campaign.is_ai_dm {
        "I have conjured this scene for you:".to_string()
    } else {
        format!("Shared visual: {prompt}")
    };
    Ok(Some(sender.message(content).with_attachment(image.data_url())))
}

/// Have the AI DM answer the party. `None` when the campaign is run by a
/// human.
pub async fn narrate(copilot: &CoPilot, campaign: &Campaign) -> Option<PlayerMessage> {
    if !campaign.is_ai_dm {
        return None;
    }
    let reply = copilot.narrate(&campaign.player_chat, &campaign.description).await;
    Some(Sender::AI_DM.message(reply))
}

/// Append a generated message to the campaign it was produced for.
pub fn deliver(store: &mut CampaignStore, id: &str, message: PlayerMessage) -> CampaignResult<Arc<Campaign>> {
    store.append_player_messages(id, [message])
}

/// Generate and post a shared image in one step. Returns whether a message
/// was added.
pub async fn share_image(
    store: &mut CampaignStore,
    copilot: &CoPilot,
    id: &str,
    prompt: &str,
) -> CampaignResult<bool> {
    let campaign = store
        .get(id)
        .ok_or_else(|| CampaignError::NotFound(id.to_string()))?;

    match illustrate(copilot, &campaign, prompt).await {
        Ok(Some(message)) => {
            deliver(store, id, message)?;
            Ok(true)
        }
        Ok(None) => Ok(false),
        Err(e) => {
            log::error!("Image generation failed: {}", e);
            Ok(false)
        }
    }
}

/// Let the AI DM respond in place. Returns the updated snapshot, or `None`
/// when the campaign has a human DM.
pub async fn respond_as_dm(
    store: &mut CampaignStore,
    copilot: &CoPilot,
    id: &str,
) -> CampaignResult<Option<Arc<Campaign>>> {
    let campaign = store
        .get(id)
        .ok_or_else(|| CampaignError::NotFound(id.to_string()))?;

    match narrate(copilot, &campaign).await {
        Some(message) => deliver(store, id, message).map(Some),
        None => Ok(None),
    }
}

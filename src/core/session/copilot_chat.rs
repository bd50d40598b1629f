//! Co-pilot chat actions.

use std::sync::Arc;

use crate::core::campaign::{Campaign, CampaignError, CampaignResult, CampaignStore, Message};
use crate::core::llm::prompts::PANIC_PROMPT;
use crate::core::llm::{CoPilot, QuickAction};

/// Record the user's question. Returns the transcript as it stood before the
/// question, which is what the model should see as history. `None` for blank
/// input.
pub fn push_question(store: &mut CampaignStore, id: &str, text: &str) -> CampaignResult<Option<Vec<Message>>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    let before = store
        .get(id)
        .ok_or_else(|| CampaignError::NotFound(id.to_string()))?
        .ai_chat_history
        .clone();
    store.append_ai_messages(id, [Message::user(text)])?;
    Ok(Some(before))
}

/// Produce the co-pilot's reply message. Never fails: provider problems
/// become fallback text.
pub async fn answer(copilot: &CoPilot, history: &[Message], text: &str) -> Message {
    Message::model(copilot.ask(history, text).await)
}

/// Ask the co-pilot and record both sides of the exchange.
pub async fn ask(
    store: &mut CampaignStore,
    copilot: &CoPilot,
    id: &str,
    text: &str,
) -> CampaignResult<Option<Arc<Campaign>>> {
    let Some(history) = push_question(store, id, text)? else {
        return Ok(None);
    };
    let reply = answer(copilot, &history, text).await;
    store.append_ai_messages(id, [reply]).map(Some)
}

/// The panic button: ask for story-recovery options.
pub async fn panic_button(store: &mut CampaignStore, copilot: &CoPilot, id: &str) -> CampaignResult<Option<Arc<Campaign>>> {
    log::info!("Panic button pressed for campaign {}", id);
    ask(store, copilot, id, PANIC_PROMPT).await
}

pub async fn quick_action(
    store: &mut CampaignStore,
    copilot: &CoPilot,
    id: &str,
    action: QuickAction,
) -> CampaignResult<Option<Arc<Campaign>>> {
    ask(store, copilot, id, action.prompt()).await
}

/// Reset the transcript to its greeting once `confirm` agrees.
pub fn clear(store: &mut CampaignStore, id: &str, confirm: impl FnOnce(&str) -> bool) -> CampaignResult<bool> {
    store.clear_ai_chat(id, confirm)
}

//! Co-pilot, AI Dungeon Master and illustrator.
//!
//! Text failures never escape this module: they are logged and replaced with
//! an in-character fallback so the chat always gets a reply.

use std::sync::Arc;

use crate::config::AiConfig;
use crate::core::campaign::{Message, MessageRole as ChatRole, PlayerMessage};

use super::prompts::{self, COPILOT_SYSTEM_INSTRUCTION};
use super::providers::GoogleProvider;
use super::router::{
    ChatMessage, ChatRequest, GeneratedImage, ImageProvider, LLMError, LLMProvider, Result,
};

/// Sampling settings for the two text personas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoPilotSettings {
    pub copilot_temperature: f32,
    pub dm_temperature: f32,
    pub dm_history_window: usize,
}

impl Default for CoPilotSettings {
    fn default() -> Self {
        Self::from(&AiConfig::default())
    }
}

impl From<&AiConfig> for CoPilotSettings {
    fn from(config: &AiConfig) -> Self {
        Self {
            copilot_temperature: config.copilot_temperature,
            dm_temperature: config.dm_temperature,
            dm_history_window: config.dm_history_window,
        }
    }
}

/// Which canned replies to use when generation fails.
struct Fallbacks {
    missing_key: &'static str,
    empty: &'static str,
    failure: &'static str,
}

const COPILOT_FALLBACKS: Fallbacks = Fallbacks {
    missing_key: prompts::COPILOT_MISSING_KEY,
    empty: prompts::COPILOT_EMPTY_REPLY,
    failure: prompts::COPILOT_FAILURE,
};

const DM_FALLBACKS: Fallbacks = Fallbacks {
    missing_key: prompts::DM_MISSING_KEY,
    empty: prompts::DM_EMPTY_REPLY,
    failure: prompts::DM_FAILURE,
};

#[derive(Clone)]
pub struct CoPilot {
    text: Option<Arc<dyn LLMProvider>>,
    images: Option<Arc<dyn ImageProvider>>,
    settings: CoPilotSettings,
}

impl CoPilot {
    pub fn new(
        text: Option<Arc<dyn LLMProvider>>,
        images: Option<Arc<dyn ImageProvider>>,
        settings: CoPilotSettings,
    ) -> Self {
        Self {
            text,
            images,
            settings,
        }
    }

    /// A co-pilot with no backend. Every text call answers with the
    /// missing-key fallback and images are never produced.
    pub fn offline() -> Self {
        Self::new(None, None, CoPilotSettings::default())
    }

    /// Wire the Google provider for both text and images when a key exists.
    pub fn from_config(config: &AiConfig) -> Self {
        let settings = CoPilotSettings::from(config);
        match GoogleProvider::from_config(config) {
            Some(provider) => {
                let provider = Arc::new(provider);
                log::info!(
                    "AI services ready (text: {}, images: {})",
                    provider.model(),
                    provider.image_model()
                );
                Self::new(Some(provider.clone()), Some(provider), settings)
            }
            None => {
                log::warn!("No API key configured; AI features are disabled");
                Self::new(None, None, settings)
            }
        }
    }

    pub fn is_configured(&self) -> bool {
        self.text.is_some()
    }

    pub fn settings(&self) -> &CoPilotSettings {
        &self.settings
    }

    /// Ask the DM co-pilot. `history` is the transcript before `new_text`;
    /// the new message is sent exactly once, after it.
    pub async fn ask(&self, history: &[Message], new_text: &str) -> String {
        let mut messages: Vec<ChatMessage> = history
            .iter()
            .filter_map(|msg| match msg.role {
                ChatRole::User => Some(ChatMessage::user(msg.content.as_str())),
                ChatRole::Model => Some(ChatMessage::assistant(msg.content.as_str())),
                ChatRole::System => None,
            })
            .collect();
        messages.push(ChatMessage::user(new_text));

        let request = ChatRequest::new(messages)
            .with_system(COPILOT_SYSTEM_INSTRUCTION)
            .with_temperature(self.settings.copilot_temperature);

        self.complete(request, &COPILOT_FALLBACKS).await
    }

    /// Let the AI DM respond to the most recent player-chat messages.
    pub async fn narrate(&self, chat: &[PlayerMessage], campaign_context: &str) -> String {
        let start = chat.len().saturating_sub(self.settings.dm_history_window);
        let messages = chat[start..]
            .iter()
            .map(|msg| {
                let line = format!("{}: {}", msg.sender_name, msg.content);
                if msg.is_from_dm() {
                    ChatMessage::assistant(line)
                } else {
                    ChatMessage::user(line)
                }
            })
            .collect();

        let request = ChatRequest::new(messages)
            .with_system(prompts::ai_dm_system_prompt(campaign_context))
            .with_temperature(self.settings.dm_temperature);

        self.complete(request, &DM_FALLBACKS).await
    }

    /// Render a scene. `Ok(None)` when no image service is configured or the
    /// model returned no picture.
    pub async fn illustrate(&self, prompt: &str) -> Result<Option<GeneratedImage>> {
        let Some(images) = &self.images else {
            log::debug!("Image generation skipped: no provider configured");
            return Ok(None);
        };
        images.generate_image(prompts::image_prompt(prompt)).await
    }

    async fn complete(&self, request: ChatRequest, fallbacks: &Fallbacks) -> String {
        let Some(provider) = &self.text else {
            return fallbacks.missing_key.to_string();
        };

        match provider.chat(request).await {
            Ok(response) if response.content.is_empty() => fallbacks.empty.to_string(),
            Ok(response) => {
                log::debug!(
                    "{} replied via {} in {}ms",
                    response.provider,
                    response.model,
                    response.latency_ms
                );
                response.content
            }
            Err(LLMError::EmptyResponse { provider }) => {
                log::warn!("{} returned no text", provider);
                fallbacks.empty.to_string()
            }
            Err(e) => {
                log::error!("Text generation failed: {}", e);
                fallbacks.failure.to_string()
            }
        }
    }
}

impl std::fmt::Debug for CoPilot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoPilot")
            .field("text", &self.text.as_ref().map(|p| p.id()))
            .field("images", &self.images.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

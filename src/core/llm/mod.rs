//! LLM Client Module
//!
//! # Module Structure
//!
//! - `router`: `LLMProvider`/`ImageProvider` traits, request and response types
//! - `providers`: the Gemini REST provider
//! - `prompts`: system instructions, greetings and fallback replies
//! - `copilot`: the co-pilot, AI DM and illustrator built on the traits

pub mod copilot;
pub mod prompts;
pub mod providers;
pub mod router;

pub use copilot::{CoPilot, CoPilotSettings};
pub use prompts::QuickAction;
pub use providers::GoogleProvider;
pub use router::{
    ChatMessage, ChatRequest, ChatResponse, GeneratedImage, ImageProvider, LLMError, LLMProvider,
    MessageRole, Result, TokenUsage,
};

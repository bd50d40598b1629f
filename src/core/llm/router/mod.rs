//! Provider traits and errors.
//!
//! Text and image generation are separate seams so a deployment can pair any
//! text model with any image model (or run without images at all).

pub mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use types::{
    ChatMessage, ChatRequest, ChatResponse, GeneratedImage, MessageRole, TokenUsage,
};

/// Errors raised while talking to a generative-AI provider.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The provider answered but produced no text.
    #[error("Empty response from {provider}")]
    EmptyResponse { provider: String },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// A text-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Stable provider identifier, e.g. "google".
    fn id(&self) -> &'static str;

    /// Send a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// An image-generation backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image for `prompt`. `Ok(None)` when the model answered
    /// without an image part.
    async fn generate_image(&self, prompt: String) -> Result<Option<GeneratedImage>>;
}

//! Gemini over the public `generateContent` REST endpoint.
//!
//! One provider serves both seams: the text model answers chats and the image
//! model returns inline pictures.

use crate::config::AiConfig;
use crate::core::llm::router::{
    ChatRequest, ChatResponse, GeneratedImage, ImageProvider, LLMError, LLMProvider, MessageRole,
    Result, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client authenticated with an `x-goog-api-key` header.
pub struct GoogleProvider {
    api_key: String,
    model: String,
    image_model: String,
    base_url: String,
    client: Client,
}

impl GoogleProvider {
    pub fn new(api_key: String, model: String, image_model: String) -> Self {
        Self::with_timeout(api_key, model, image_model, Duration::from_secs(300))
    }

    pub fn with_timeout(
        api_key: String,
        model: String,
        image_model: String,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
            log::warn!("Falling back to default HTTP client: {}", e);
            Client::new()
        });

        Self {
            api_key: api_key.trim().to_string(),
            model,
            image_model,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Build from the `[ai]` config section. `None` when no key is configured.
    pub fn from_config(config: &AiConfig) -> Option<Self> {
        let key = config.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())?;
        if !Self::is_valid_api_key_format(key) {
            log::warn!("Configured API key does not look like a Google key");
        }
        Some(
            Self::with_timeout(
                key.to_string(),
                config.text_model.clone(),
                config.image_model.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
            .with_base_url(config.base_url.clone()),
        )
    }

    /// Point the provider at another host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    /// Cheap shape check: Gemini keys start with `AIza`. Nothing is sent.
    pub fn is_valid_api_key_format(key: &str) -> bool {
        let trimmed = key.trim();
        !trimmed.is_empty() && trimmed.starts_with("AIza")
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_contents(request: &ChatRequest) -> Vec<Value> {
        request
            .messages
            .iter()
            .filter_map(|msg| {
                let role = match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "model",
                    MessageRole::System => return None,
                };
                Some(serde_json::json!({
                    "role": role,
                    "parts": [{ "text": msg.content }]
                }))
            })
            .collect()
    }

    fn build_body(request: &ChatRequest) -> Value {
        let mut body = serde_json::json!({ "contents": Self::build_contents(request) });

        if let Some(system) = &request.system_prompt {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system }]
            });
        }

        if request.temperature.is_some() || request.max_tokens.is_some() {
            let mut generation = serde_json::Map::new();
            if let Some(temp) = request.temperature {
                generation.insert("temperature".to_string(), serde_json::json!(temp));
            }
            if let Some(max) = request.max_tokens {
                generation.insert("maxOutputTokens".to_string(), serde_json::json!(max));
            }
            body["generationConfig"] = Value::Object(generation);
        }

        body
    }

    #[instrument(skip(self, body))]
    async fn post(&self, model: &str, body: &Value) -> Result<Value> {
        let resp = self
            .client
            .post(self.endpoint(model))
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        Ok(resp.json().await?)
    }

    fn first_candidate_parts(json: &Value) -> &[Value] {
        json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[async_trait]
impl LLMProvider for GoogleProvider {
    fn id(&self) -> &'static str {
        "google"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = Self::build_body(&request);

        let start = std::time::Instant::now();
        let json = self.post(&self.model, &body).await?;
        let latency = start.elapsed().as_millis() as u64;

        if json["candidates"].as_array().is_none() {
            return Err(LLMError::InvalidResponse("Missing candidates".to_string()));
        }

        let content: String = Self::first_candidate_parts(&json)
            .iter()
            .filter_map(|p| p["text"].as_str())
            .collect();

        if content.is_empty() {
            return Err(LLMError::EmptyResponse {
                provider: self.id().to_string(),
            });
        }

        let usage = json["usageMetadata"].as_object().map(|u| TokenUsage {
            input_tokens: u["promptTokenCount"].as_u64().unwrap_or(0) as u32,
            output_tokens: u["candidatesTokenCount"].as_u64().unwrap_or(0) as u32,
        });

        Ok(ChatResponse {
            content,
            model: self.model.clone(),
            provider: self.id().to_string(),
            usage,
            finish_reason: json["candidates"][0]["finishReason"]
                .as_str()
                .map(|s| s.to_string()),
            latency_ms: latency,
        })
    }
}

#[async_trait]
impl ImageProvider for GoogleProvider {
    async fn generate_image(&self, prompt: String) -> Result<Option<GeneratedImage>> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let json = self.post(&self.image_model, &body).await?;

        let image = Self::first_candidate_parts(&json).iter().find_map(|part| {
            let inline = part.get("inlineData")?;
            Some(GeneratedImage {
                mime_type: inline["mimeType"].as_str().unwrap_or("image/png").to_string(),
                data: inline["data"].as_str()?.to_string(),
            })
        });

        if image.is_none() {
            log::warn!("Image model {} returned no inline image", self.image_model);
        }
        Ok(image)
    }
}

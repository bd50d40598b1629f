//! Google Provider Unit Tests
//!
//! Request formatting and response parsing for text and image generation,
//! against a wiremock server standing in for the Generative Language API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::core::llm::providers::GoogleProvider;
use crate::core::llm::router::{
    ChatMessage, ChatRequest, ImageProvider, LLMError, LLMProvider, TokenUsage,
};

const API_KEY: &str = "AIzaTestApiKey";
const TEXT_PATH: &str = "/v1beta/models/gemini-test:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/gemini-image-test:generateContent";

fn provider(server: &MockServer) -> GoogleProvider {
    GoogleProvider::new(
        API_KEY.to_string(),
        "gemini-test".to_string(),
        "gemini-image-test".to_string(),
    )
    .with_base_url(server.uri())
}

fn text_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
    })
}

// =============================================================================
// Provider Identity
// =============================================================================

#[test]
fn test_provider_id_and_models() {
    let provider = GoogleProvider::new(
        API_KEY.to_string(),
        "gemini-test".to_string(),
        "gemini-image-test".to_string(),
    );
    assert_eq!(provider.id(), "google");
    assert_eq!(provider.model(), "gemini-test");
    assert_eq!(provider.image_model(), "gemini-image-test");
}

#[test]
fn test_api_key_format() {
    assert!(GoogleProvider::is_valid_api_key_format("AIzaValidApiKey12345"));
    assert!(GoogleProvider::is_valid_api_key_format("  AIzaValidKey  "));
    assert!(!GoogleProvider::is_valid_api_key_format(""));
    assert!(!GoogleProvider::is_valid_api_key_format("sk-openai-key"));
}

// =============================================================================
// Text Generation
// =============================================================================

#[tokio::test]
async fn test_chat_request_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "Who rules the city?" }] },
                { "role": "model", "parts": [{ "text": "A council of mages." }] },
                { "role": "user", "parts": [{ "text": "Name one." }] }
            ],
            "systemInstruction": { "parts": [{ "text": "You are a DM co-pilot." }] },
            "generationConfig": { "temperature": 0.5, "maxOutputTokens": 256 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Archmage Velka.")))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(vec![
        ChatMessage::user("Who rules the city?"),
        ChatMessage::assistant("A council of mages."),
        ChatMessage::user("Name one."),
    ])
    .with_system("You are a DM co-pilot.")
    .with_temperature(0.5)
    .with_max_tokens(256);

    let response = provider(&server).chat(request).await.unwrap();

    assert_eq!(response.content, "Archmage Velka.");
    assert_eq!(response.provider, "google");
    assert_eq!(response.model, "gemini-test");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    assert_eq!(
        response.usage,
        Some(TokenUsage {
            input_tokens: 12,
            output_tokens: 34
        })
    );
}

#[tokio::test]
async fn test_chat_joins_text_parts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "NPC CARD\n" }, { "text": "Name: Brann" }] }
            }]
        })))
        .mount(&server)
        .await;

    let response = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("npc")]))
        .await
        .unwrap();

    assert_eq!(response.content, "NPC CARD\nName: Brann");
    assert_eq!(response.usage, None);
}

#[tokio::test]
async fn test_chat_without_text_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::EmptyResponse { ref provider } if provider == "google"));
}

#[tokio::test]
async fn test_chat_missing_candidates_is_invalid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "promptFeedback": {} })))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_chat_api_error_keeps_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap_err();

    match err {
        LLMError::ApiError { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_base_url_trailing_slash_is_trimmed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GoogleProvider::new(
        API_KEY.to_string(),
        "gemini-test".to_string(),
        "gemini-image-test".to_string(),
    )
    .with_base_url(format!("{}/", server.uri()));

    let response = provider
        .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
        .await
        .unwrap();
    assert_eq!(response.content, "ok");
}

// =============================================================================
// Image Generation
// =============================================================================

#[tokio::test]
async fn test_generate_image_reads_inline_data() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "a misty bridge" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your scene." },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/4AAQ" } }
                ]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = provider(&server)
        .generate_image("a misty bridge".to_string())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.data, "/9j/4AAQ");
    assert_eq!(image.data_url(), "data:image/jpeg;base64,/9j/4AAQ");
}

#[tokio::test]
async fn test_generate_image_without_inline_data_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("I can't draw that.")))
        .mount(&server)
        .await;

    let image = provider(&server)
        .generate_image("anything".to_string())
        .await
        .unwrap();

    assert!(image.is_none());
}

#[tokio::test]
async fn test_generate_image_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let err = provider(&server)
        .generate_image("anything".to_string())
        .await
        .unwrap_err();

    assert!(matches!(err, LLMError::ApiError { status: 500, .. }));
}

//! Co-pilot, AI DM and illustrator tests against mocked providers.

use std::sync::Arc;

use crate::core::campaign::{Message, MessageRole as ChatRole};
use crate::core::llm::prompts::{
    self, COPILOT_EMPTY_REPLY, COPILOT_FAILURE, COPILOT_MISSING_KEY, COPILOT_SYSTEM_INSTRUCTION,
    DM_EMPTY_REPLY, DM_FAILURE, DM_MISSING_KEY,
};
use crate::core::llm::router::{MockImageProvider, MockLLMProvider};
use crate::core::llm::{
    ChatRequest, CoPilot, CoPilotSettings, ImageProvider, LLMError, LLMProvider, MessageRole,
};
use crate::core::session::player_chat;
use crate::tests::common::*;

fn settings() -> CoPilotSettings {
    CoPilotSettings {
        copilot_temperature: 0.7,
        dm_temperature: 0.9,
        dm_history_window: 10,
    }
}

fn text_only(provider: MockLLMProvider) -> CoPilot {
    let provider: Arc<dyn LLMProvider> = Arc::new(provider);
    CoPilot::new(Some(provider), None, settings())
}

fn images_only(provider: MockImageProvider) -> CoPilot {
    let provider: Arc<dyn ImageProvider> = Arc::new(provider);
    CoPilot::new(None, Some(provider), settings())
}

fn replying(content: &'static str) -> MockLLMProvider {
    let mut mock = MockLLMProvider::new();
    mock.expect_id().return_const("mock");
    mock.expect_chat()
        .times(1)
        .returning(move |_| Ok(text_response(content)));
    mock
}

fn failing(error: fn() -> LLMError) -> MockLLMProvider {
    let mut mock = MockLLMProvider::new();
    mock.expect_id().return_const("mock");
    mock.expect_chat().times(1).returning(move |_| Err(error()));
    mock
}

// ============================================================================
// ask
// ============================================================================

#[tokio::test]
async fn test_ask_sends_history_then_question_once() {
    let history = vec![
        Message::model(prompts::INITIAL_GREETING),
        Message::user("Four players, level 3"),
        Message::model("Great, what setting?"),
    ];

    let mut mock = MockLLMProvider::new();
    mock.expect_chat()
        .withf(|req: &ChatRequest| {
            let roles: Vec<MessageRole> = req.messages.iter().map(|m| m.role).collect();
            roles
                == [
                    MessageRole::Assistant,
                    MessageRole::User,
                    MessageRole::Assistant,
                    MessageRole::User,
                ]
                && req.messages.last().map(|m| m.content.as_str()) == Some("Give me a tavern")
                && req
                    .messages
                    .iter()
                    .filter(|m| m.content == "Give me a tavern")
                    .count()
                    == 1
                && req.system_prompt.as_deref() == Some(COPILOT_SYSTEM_INSTRUCTION)
                && req.temperature == Some(0.7)
        })
        .times(1)
        .returning(|_| Ok(text_response("LOCATION CARD\nName: The Gilded Eel")));

    let reply = text_only(mock).ask(&history, "Give me a tavern").await;
    assert_eq!(reply, "LOCATION CARD\nName: The Gilded Eel");
}

#[tokio::test]
async fn test_ask_skips_system_messages() {
    let history = vec![Message {
        role: ChatRole::System,
        ..Message::user("internal note")
    }];

    let mut mock = MockLLMProvider::new();
    mock.expect_chat()
        .withf(|req: &ChatRequest| req.messages.len() == 1)
        .times(1)
        .returning(|_| Ok(text_response("ok")));

    assert_eq!(text_only(mock).ask(&history, "hi").await, "ok");
}

#[tokio::test]
async fn test_ask_without_provider_uses_missing_key_reply() {
    let reply = CoPilot::offline().ask(&[], "hello").await;
    assert_eq!(reply, COPILOT_MISSING_KEY);
}

#[tokio::test]
async fn test_ask_empty_reply_uses_empty_fallback() {
    let reply = text_only(replying("")).ask(&[], "hello").await;
    assert_eq!(reply, COPILOT_EMPTY_REPLY);
}

#[tokio::test]
async fn test_ask_whitespace_reply_is_passed_through() {
    let reply = text_only(replying("   \n")).ask(&[], "hello").await;
    assert_eq!(reply, "   \n");
}

#[tokio::test]
async fn test_ask_empty_response_error_uses_empty_fallback() {
    let mock = failing(|| LLMError::EmptyResponse {
        provider: "mock".to_string(),
    });
    assert_eq!(text_only(mock).ask(&[], "hello").await, COPILOT_EMPTY_REPLY);
}

#[tokio::test]
async fn test_ask_api_error_uses_failure_fallback() {
    let mock = failing(|| LLMError::ApiError {
        status: 500,
        message: "boom".to_string(),
    });
    assert_eq!(text_only(mock).ask(&[], "hello").await, COPILOT_FAILURE);
}

// ============================================================================
// narrate
// ============================================================================

#[tokio::test]
async fn test_narrate_uses_last_ten_lines_and_dm_persona() {
    let chat = chat_lines(14);

    let mut mock = MockLLMProvider::new();
    mock.expect_chat()
        .withf(|req: &ChatRequest| {
            req.messages.len() == 10
                && req.messages[0].content == "You: line 4"
                && req.messages[1].content == "DM (You): line 5"
                && req.messages[1].role == MessageRole::Assistant
                && req.messages[0].role == MessageRole::User
                && req.temperature == Some(0.9)
                && req
                    .system_prompt
                    .as_deref()
                    .is_some_and(|s| s.contains("Campaign Context: A cursed harbour town"))
        })
        .times(1)
        .returning(|_| Ok(text_response("The fog rolls in.")));

    let reply = text_only(mock).narrate(&chat, "A cursed harbour town").await;
    assert_eq!(reply, "The fog rolls in.");
}

#[tokio::test]
async fn test_narrate_short_chat_sends_everything() {
    let chat = chat_lines(3);

    let mut mock = MockLLMProvider::new();
    mock.expect_chat()
        .withf(|req: &ChatRequest| req.messages.len() == 3)
        .times(1)
        .returning(|_| Ok(text_response("Roll for initiative.")));

    assert_eq!(text_only(mock).narrate(&chat, "").await, "Roll for initiative.");
}

#[tokio::test]
async fn test_narrate_fallbacks() {
    assert_eq!(CoPilot::offline().narrate(&chat_lines(1), "").await, DM_MISSING_KEY);
    assert_eq!(text_only(replying("")).narrate(&chat_lines(1), "").await, DM_EMPTY_REPLY);

    let mock = failing(|| LLMError::InvalidResponse("Missing candidates".to_string()));
    assert_eq!(text_only(mock).narrate(&chat_lines(1), "").await, DM_FAILURE);
}

// ============================================================================
// illustrate
// ============================================================================

#[tokio::test]
async fn test_illustrate_adds_style_prefix() {
    let mut mock = MockImageProvider::new();
    mock.expect_generate_image()
        .withf(|prompt: &String| *prompt == prompts::image_prompt("a ruined lighthouse"))
        .times(1)
        .returning(|_| Ok(Some(png_image())));

    let image = images_only(mock).illustrate("a ruined lighthouse").await.unwrap();
    assert_eq!(image, Some(png_image()));
}

#[tokio::test]
async fn test_illustrate_without_provider_is_none() {
    assert_eq!(CoPilot::offline().illustrate("anything").await.unwrap(), None);
}

#[tokio::test]
async fn test_illustrate_propagates_errors() {
    let mut mock = MockImageProvider::new();
    mock.expect_generate_image().returning(|_| {
        Err(LLMError::ApiError {
            status: 429,
            message: "quota".to_string(),
        })
    });

    let err = images_only(mock).illustrate("x").await.unwrap_err();
    assert!(matches!(err, LLMError::ApiError { status: 429, .. }));
}

// ============================================================================
// Shared images in party chat
// ============================================================================

#[tokio::test]
async fn test_share_image_posts_attachment_as_dm() {
    let (mut store, id) = store_with(create_test_campaign("Harbour"));

    let mut mock = MockImageProvider::new();
    mock.expect_generate_image()
        .times(1)
        .returning(|_| Ok(Some(png_image())));
    let copilot = images_only(mock);

    assert!(player_chat::share_image(&mut store, &copilot, &id, "the docks at dusk").await.unwrap());

    let campaign = store.get(&id).unwrap();
    let message = campaign.player_chat.last().unwrap();
    assert_eq!(message.sender_name, "DM (You)");
    assert_eq!(message.content, "Shared visual: the docks at dusk");
    assert_eq!(message.attachment_url.as_deref(), Some(png_image().data_url().as_str()));
}

#[tokio::test]
async fn test_share_image_in_ai_dm_mode_comes_from_ai_dm() {
    let (mut store, id) = store_with(create_ai_dm_campaign("Harbour"));

    let mut mock = MockImageProvider::new();
    mock.expect_generate_image().returning(|_| Ok(Some(png_image())));
    let copilot = images_only(mock);

    assert!(player_chat::share_image(&mut store, &copilot, &id, "a kraken").await.unwrap());

    let campaign = store.get(&id).unwrap();
    let message = campaign.player_chat.last().unwrap();
    assert_eq!(message.sender_name, "Dungeon Master");
    assert_eq!(message.content, "I have conjured this scene for you:");
}

#[tokio::test]
async fn test_share_image_failure_leaves_chat_untouched() {
    let (mut store, id) = store_with(create_test_campaign("Harbour"));

    let mut mock = MockImageProvider::new();
    mock.expect_generate_image().returning(|_| {
        Err(LLMError::ApiError {
            status: 500,
            message: "down".to_string(),
        })
    });
    let copilot = images_only(mock);

    assert!(!player_chat::share_image(&mut store, &copilot, &id, "a kraken").await.unwrap());
    assert!(store.get(&id).unwrap().player_chat.is_empty());
}

#[tokio::test]
async fn test_share_image_blank_prompt_never_calls_provider() {
    let (mut store, id) = store_with(create_test_campaign("Harbour"));

    let mut mock = MockImageProvider::new();
    mock.expect_generate_image().never();
    let copilot = images_only(mock);

    assert!(!player_chat::share_image(&mut store, &copilot, &id, "   ").await.unwrap());
}

#[tokio::test]
async fn test_respond_as_dm_appends_reply() {
    let (mut store, id) = store_with(create_ai_dm_campaign("Harbour"));
    player_chat::post_message(&mut store, &id, "I open the door").unwrap();

    let copilot = text_only(replying("A cold wind greets you."));
    let campaign = player_chat::respond_as_dm(&mut store, &copilot, &id)
        .await
        .unwrap()
        .unwrap();

    let reply = campaign.player_chat.last().unwrap();
    assert_eq!(reply.content, "A cold wind greets you.");
    assert!(reply.is_from_dm());
}

//! Test Fixtures
//!
//! Seeded campaigns, stores and canned provider responses.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::campaign::{Campaign, CampaignDraft, CampaignStore, PlayerMessage};
use crate::core::llm::{ChatResponse, GeneratedImage};

// =============================================================================
// Campaign Fixtures
// =============================================================================

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5EED)
}

/// A fresh campaign run by a human DM.
pub fn create_test_campaign(name: &str) -> Campaign {
    CampaignDraft::new(name)
        .build(&mut seeded_rng())
        .expect("fixture campaign should build")
}

/// A fresh campaign run by the AI DM.
pub fn create_ai_dm_campaign(name: &str) -> Campaign {
    CampaignDraft::new(name)
        .with_ai_dm(true)
        .build(&mut seeded_rng())
        .expect("fixture campaign should build")
}

/// A store holding `campaign`, plus its id.
pub fn store_with(campaign: Campaign) -> (CampaignStore, String) {
    let id = campaign.id.clone();
    (CampaignStore::with_campaigns([campaign]), id)
}

/// `n` alternating player/DM chat lines, numbered from zero.
pub fn chat_lines(n: usize) -> Vec<PlayerMessage> {
    (0..n)
        .map(|i| {
            if i % 2 == 0 {
                PlayerMessage::new("user", "You", format!("line {i}"))
            } else {
                PlayerMessage::new("dm", "DM (You)", format!("line {i}"))
            }
        })
        .collect()
}

// =============================================================================
// Provider Fixtures
// =============================================================================

pub fn text_response(content: &str) -> ChatResponse {
    ChatResponse {
        content: content.to_string(),
        model: "gemini-test".to_string(),
        provider: "mock".to_string(),
        usage: None,
        finish_reason: Some("STOP".to_string()),
        latency_ms: 1,
    }
}

pub fn png_image() -> GeneratedImage {
    GeneratedImage {
        mime_type: "image/png".to_string(),
        data: "iVBORw0KGgo=".to_string(),
    }
}

//! Campaign Error Types

use thiserror::Error;

use super::dice::DiceError;

/// Errors raised by campaign store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CampaignError {
    /// No campaign with this id is held by the store.
    #[error("Campaign '{0}' not found")]
    NotFound(String),

    /// A campaign with this id already exists.
    #[error("Campaign '{0}' already exists")]
    AlreadyExists(String),

    /// The campaign holds no character with this id.
    #[error("Character '{character_id}' not found in campaign '{campaign_id}'")]
    CharacterNotFound {
        campaign_id: String,
        character_id: String,
    },

    /// A required field was missing or blank.
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    /// Dice notation could not be parsed.
    #[error(transparent)]
    Dice(#[from] DiceError),
}

impl CampaignError {
    pub fn required(field: &'static str) -> Self {
        Self::Invalid {
            field,
            reason: "must not be blank".to_string(),
        }
    }

    pub fn character_not_found(campaign_id: impl Into<String>, character_id: impl Into<String>) -> Self {
        Self::CharacterNotFound {
            campaign_id: campaign_id.into(),
            character_id: character_id.into(),
        }
    }
}

pub type CampaignResult<T> = Result<T, CampaignError>;

//! Social Hub Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Please enter a valid email.")]
    InvalidEmail,

    #[error("{name} is already in the group.")]
    AlreadyMember { name: String },

    #[error("You cannot delete yourself.")]
    CannotDeleteSelf,

    #[error("{0} is not allowed for this role")]
    Forbidden(&'static str),
}

impl SocialError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    pub fn required(field: &'static str) -> Self {
        Self::Invalid {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}

pub type SocialResult<T> = std::result::Result<T, SocialError>;

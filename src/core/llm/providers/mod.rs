//! LLM Provider Implementations

mod google;

pub use google::{GoogleProvider, DEFAULT_BASE_URL};

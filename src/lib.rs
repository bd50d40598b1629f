//! DM Co-Pilot - AI companion for tabletop RPG game masters (TUI Edition)
//!
//! Core library providing DM-screen card extraction, campaign state,
//! session actions, the social hub, and Gemini integration.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Live session actions
//!
//! What happens at the table: the party chat with its dice tray and AI DM, and
//! the DM's private co-pilot conversation. Every action goes through the
//! campaign store so each edit produces a fresh snapshot.

pub mod copilot_chat;
pub mod player_chat;

pub use player_chat::{Sender, MEETING_ANNOUNCEMENT};

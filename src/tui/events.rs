use crate::core::campaign::{Message, PlayerMessage};

/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// The co-pilot answered (or fell back) for a campaign.
    CopilotReply { campaign_id: String, message: Message },
    /// The AI Dungeon Master narrated the next beat.
    DmReply { campaign_id: String, message: PlayerMessage },
    /// An illustration is ready to post to party chat.
    ImageReady { campaign_id: String, message: PlayerMessage },
    /// Image generation produced nothing or failed.
    ImageFailed(String),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Copilot,
    PartyChat,
    Campaign,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Copilot, Focus::PartyChat, Focus::Campaign];

    pub fn label(self) -> &'static str {
        match self {
            Focus::Copilot => "Co-Pilot",
            Focus::PartyChat => "Party Chat",
            Focus::Campaign => "Campaign",
        }
    }

    pub fn next(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + 1) % Focus::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Focus::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Focus::ALL[(idx + Focus::ALL.len() - 1) % Focus::ALL.len()]
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}

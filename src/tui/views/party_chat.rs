//! Party chat pane: table talk, the dice tray, roll requests, meetings and
//! shared illustrations.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use super::{render_transcript, Scroll, ViewInput};
use crate::core::campaign::{Campaign, STANDARD_DICE};
use crate::tui::theme;
use crate::tui::widgets::card::player_message_lines;
use crate::tui::widgets::{InputOutcome, TextInput};

pub const INITIATIVE_CHECK: &str = "Initiative";
pub const PERCEPTION_CHECK: &str = "Perception";
const ROLL_PREFIX: &str = "/roll ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartyCommand {
    Post(String),
    Roll(u32),
    /// Typed dice notation, e.g. `/roll 2d6+3`.
    RollNotation(String),
    RequestRoll(&'static str),
    StartMeeting,
    ShareImage(String),
}

impl PartyCommand {
    /// Chat input becomes a post, or a roll when it starts with `/roll`.
    fn from_chat(text: String) -> Self {
        match text.strip_prefix(ROLL_PREFIX) {
            Some(notation) => PartyCommand::RollNotation(notation.trim().to_string()),
            None => PartyCommand::Post(text),
        }
    }

    /// Whether the AI DM should answer once this lands.
    pub fn is_player_action(&self) -> bool {
        !matches!(self, PartyCommand::ShareImage(_))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartyInputMode {
    #[default]
    Chat,
    /// The input describes a scene to illustrate.
    ImagePrompt,
}

#[derive(Debug, Default)]
pub struct PartyChatState {
    input: TextInput,
    mode: PartyInputMode,
    scroll: Scroll,
    /// The AI DM is composing a reply.
    pub dm_busy: bool,
    /// An illustration is being generated.
    pub image_busy: bool,
}

/// F2..F7 roll the standard dice tray.
fn dice_for_key(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::F(n @ 2..=7) => STANDARD_DICE.get(usize::from(n) - 2).copied(),
        _ => None,
    }
}

impl PartyChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PartyInputMode {
        self.mode
    }

    pub fn on_dm_reply(&mut self) {
        self.dm_busy = false;
        self.scroll.to_bottom();
    }

    pub fn on_image_done(&mut self) {
        self.image_busy = false;
        self.scroll.to_bottom();
    }

    fn transcript_len(campaign: &Campaign) -> usize {
        campaign
            .player_chat
            .iter()
            .map(|m| player_message_lines(m).len())
            .sum()
    }

    /// Player actions wait while the AI DM is still answering the last one.
    fn act(&mut self, command: PartyCommand) -> ViewInput<PartyCommand> {
        if self.dm_busy && command.is_player_action() {
            return ViewInput::Consumed;
        }
        self.scroll.to_bottom();
        ViewInput::Command(command)
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, campaign: &Campaign) -> ViewInput<PartyCommand> {
        if let Some(sides) = dice_for_key(code) {
            return self.act(PartyCommand::Roll(sides));
        }

        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::F(8)) => return self.act(PartyCommand::RequestRoll(INITIATIVE_CHECK)),
            (KeyModifiers::NONE, KeyCode::F(9)) => return self.act(PartyCommand::RequestRoll(PERCEPTION_CHECK)),
            (KeyModifiers::NONE, KeyCode::F(10)) => return self.act(PartyCommand::StartMeeting),
            (KeyModifiers::CONTROL, KeyCode::Char('g')) => {
                self.mode = match self.mode {
                    PartyInputMode::Chat => PartyInputMode::ImagePrompt,
                    PartyInputMode::ImagePrompt => PartyInputMode::Chat,
                };
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::Esc) if self.mode == PartyInputMode::ImagePrompt => {
                self.mode = PartyInputMode::Chat;
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.scroll.up(1, Self::transcript_len(campaign));
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::PageUp) => {
                self.scroll.up(10, Self::transcript_len(campaign));
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.scroll.down(1);
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::PageDown) => {
                self.scroll.down(10);
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                let blocked = match self.mode {
                    PartyInputMode::Chat => self.dm_busy,
                    PartyInputMode::ImagePrompt => self.image_busy,
                };
                if blocked {
                    return ViewInput::Consumed;
                }
            }
            _ => {}
        }

        match self.input.handle_key(code, modifiers) {
            InputOutcome::Submitted(text) => match self.mode {
                PartyInputMode::Chat => self.act(PartyCommand::from_chat(text)),
                PartyInputMode::ImagePrompt => {
                    self.mode = PartyInputMode::Chat;
                    self.image_busy = true;
                    self.act(PartyCommand::ShareImage(text))
                }
            },
            InputOutcome::Edited => ViewInput::Consumed,
            InputOutcome::Ignored => ViewInput::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, campaign: &Campaign, focused: bool) {
        let chunks = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1), // dice tray
            Constraint::Length(3), // input
        ])
        .split(area);

        let title = if campaign.is_ai_dm {
            "Party Chat · AI Dungeon Master"
        } else {
            "Party Chat"
        };
        let mut block = theme::block(title, focused);
        if self.dm_busy {
            block = block.title_bottom(Line::styled(" the Dungeon Master is thinking... ", theme::busy_badge()));
        } else if self.image_busy {
            block = block.title_bottom(Line::styled(" conjuring an image... ", theme::busy_badge()));
        }
        let lines = campaign.player_chat.iter().flat_map(player_message_lines).collect();
        render_transcript(frame, chunks[0], block, lines, self.scroll);

        let mut tray = vec![Span::styled(" Dice ", theme::brand_badge()), Span::raw(" ")];
        for (i, sides) in STANDARD_DICE.iter().enumerate() {
            tray.push(Span::styled(format!("F{}", i + 2), theme::key_hint()));
            tray.push(Span::raw(format!(":d{sides} ")));
        }
        tray.extend([
            Span::styled("F8", theme::key_hint()),
            Span::raw(":Roll Init "),
            Span::styled("F9", theme::key_hint()),
            Span::raw(":Roll Percep "),
            Span::styled("F10", theme::key_hint()),
            Span::raw(":meeting "),
            Span::styled("/roll 2d6+3", theme::key_hint()),
            Span::raw(" "),
            Span::styled("^G", theme::key_hint()),
            Span::raw(":image"),
        ]);
        frame.render_widget(Line::from(tray).style(theme::muted()), chunks[1]);

        let input = match self.mode {
            PartyInputMode::Chat => self.input.widget("Message", "Say something to the table...", focused),
            PartyInputMode::ImagePrompt => self
                .input
                .widget("Illustrate", "Describe the scene to show the party (Esc to cancel)", focused)
                .style(Style::default().add_modifier(Modifier::ITALIC)),
        };
        frame.render_widget(input, chunks[2]);
    }
}

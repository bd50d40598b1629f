//! Co-pilot pane: the DM's private AI assistant, with quick actions and the
//! panic button.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::Frame;

use super::{render_transcript, Scroll, ViewInput};
use crate::core::campaign::Campaign;
use crate::core::llm::QuickAction;
use crate::tui::theme;
use crate::tui::widgets::card::copilot_message_lines;
use crate::tui::widgets::{InputOutcome, TextInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopilotCommand {
    Ask(String),
    Panic,
    Quick(QuickAction),
    /// Reset to the greeting; the app asks for confirmation first.
    Clear,
}

/// Ctrl+key bindings for the quick actions.
pub const QUICK_KEYS: [(char, QuickAction); 3] = [
    ('n', QuickAction::NewNpc),
    ('l', QuickAction::NewLocation),
    ('k', QuickAction::QuestHook),
];

#[derive(Debug, Default)]
pub struct CopilotState {
    input: TextInput,
    scroll: Scroll,
    /// A request is in flight; sending is disabled until it lands.
    pub busy: bool,
}

impl CopilotState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when a reply arrives.
    pub fn on_reply(&mut self) {
        self.busy = false;
        self.scroll.to_bottom();
    }

    fn transcript_len(campaign: &Campaign) -> usize {
        campaign
            .ai_chat_history
            .iter()
            .map(|m| copilot_message_lines(m).len())
            .sum()
    }

    /// Anything that starts a request is refused while one is running.
    fn request(&mut self, command: CopilotCommand) -> ViewInput<CopilotCommand> {
        if self.busy {
            return ViewInput::Consumed;
        }
        self.busy = true;
        self.scroll.to_bottom();
        ViewInput::Command(command)
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, campaign: &Campaign) -> ViewInput<CopilotCommand> {
        if modifiers == KeyModifiers::CONTROL {
            if let KeyCode::Char(c) = code {
                if let Some((_, action)) = QUICK_KEYS.iter().find(|(key, _)| *key == c) {
                    return self.request(CopilotCommand::Quick(*action));
                }
                match c {
                    'x' => return self.request(CopilotCommand::Panic),
                    'r' => return ViewInput::Command(CopilotCommand::Clear),
                    _ => {}
                }
            }
        }

        match (modifiers, code) {
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
            (KeyModifiers::NONE, KeyCode::Enter) if self.busy => return ViewInput::Consumed,
            _ => {}
        }

        match self.input.handle_key(code, modifiers) {
            InputOutcome::Submitted(text) => self.request(CopilotCommand::Ask(text)),
            InputOutcome::Edited => ViewInput::Consumed,
            InputOutcome::Ignored => ViewInput::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, campaign: &Campaign, focused: bool) {
        let chunks = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1), // quick actions
            Constraint::Length(3), // input
        ])
        .split(area);

        let mut block = theme::block("DM Co-Pilot", focused);
        if self.busy {
            block = block.title_bottom(Line::styled(" consulting the tomes... ", theme::busy_badge()));
        }
        let lines = campaign
            .ai_chat_history
            .iter()
            .flat_map(copilot_message_lines)
            .collect();
        render_transcript(frame, chunks[0], block, lines, self.scroll);

        let mut hints = vec![
            Span::styled(" ^X", Style::default().fg(theme::ACCENT)),
            Span::raw(":panic "),
        ];
        for (key, action) in QUICK_KEYS {
            hints.push(Span::styled(format!("^{}", key.to_ascii_uppercase()), theme::key_hint()));
            hints.push(Span::raw(format!(":{} ", action.label())));
        }
        hints.push(Span::styled("^R", theme::key_hint()));
        hints.push(Span::raw(":clear"));
        frame.render_widget(Line::from(hints).style(theme::muted()), chunks[1]);

        let placeholder = if self.busy {
            "Waiting for the co-pilot..."
        } else {
            "Ask for help, rulings or ideas..."
        };
        frame.render_widget(self.input.widget("Ask", placeholder, focused), chunks[2]);
    }
}

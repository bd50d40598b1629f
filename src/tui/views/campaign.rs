//! Campaign pane: party roster, invite link and the session log.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use super::ViewInput;
use crate::core::campaign::{format_modifier, Ability, Campaign, Character, LogEntryType};
use crate::tui::theme;
use crate::tui::widgets::{InputOutcome, TextInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignCommand {
    AddNote(String),
    /// Add a random pre-generated character.
    AddCharacter,
    /// Remove a character; the app asks for confirmation first.
    RemoveCharacter(String),
    ToggleAiDm,
}

#[derive(Debug, Default)]
pub struct CampaignViewState {
    input: TextInput,
    selected: usize,
}

/// One roster row: name, race/class/level, AC, HP and ability modifiers.
pub fn character_summary(character: &Character) -> Line<'static> {
    let hp = character
        .hp
        .map(|hp| format!("HP {}/{}", hp.current, hp.max))
        .unwrap_or_else(|| "HP -".to_string());
    let mods = Ability::ALL
        .iter()
        .map(|a| format!("{} {}", a.abbreviation(), format_modifier(character.modifier(*a))))
        .collect::<Vec<_>>()
        .join(" ");
    Line::from(vec![
        Span::styled(character.name.clone(), Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {} {} {}", character.race, character.class, character.level),
            theme::muted(),
        ),
        Span::styled(
            format!("  AC {}  {}  PP {}", character.effective_armor_class(), hp, character.passive_perception()),
            Style::default().fg(theme::PRIMARY_LIGHT),
        ),
        Span::styled(format!("  {mods}"), theme::dim()),
    ])
}

fn log_label(entry_type: LogEntryType) -> (&'static str, ratatui::style::Color) {
    match entry_type {
        LogEntryType::Note => ("note", theme::TEXT_MUTED),
        LogEntryType::Decision => ("decision", theme::INFO),
        LogEntryType::Quest => ("quest", theme::CARD_QUEST),
        LogEntryType::Interaction => ("interaction", theme::SUCCESS),
    }
}

impl CampaignViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Keep the roster cursor inside the current party.
    fn clamp(&mut self, campaign: &Campaign) {
        self.selected = self.selected.min(campaign.characters.len().saturating_sub(1));
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, campaign: &Campaign) -> ViewInput<CampaignCommand> {
        self.clamp(campaign);
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Up) => {
                self.selected = self.selected.saturating_sub(1);
                return ViewInput::Consumed;
            }
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.selected = (self.selected + 1).min(campaign.characters.len().saturating_sub(1));
                return ViewInput::Consumed;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => return ViewInput::Command(CampaignCommand::AddCharacter),
            (KeyModifiers::CONTROL, KeyCode::Char('t')) => return ViewInput::Command(CampaignCommand::ToggleAiDm),
            (KeyModifiers::NONE, KeyCode::Delete) if self.input.text().is_empty() => {
                return match campaign.characters.get(self.selected) {
                    Some(character) => ViewInput::Command(CampaignCommand::RemoveCharacter(character.id.clone())),
                    None => ViewInput::Consumed,
                };
            }
            _ => {}
        }

        match self.input.handle_key(code, modifiers) {
            InputOutcome::Submitted(text) => ViewInput::Command(CampaignCommand::AddNote(text)),
            InputOutcome::Edited => ViewInput::Consumed,
            InputOutcome::Ignored => ViewInput::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, campaign: &Campaign, focused: bool) {
        let roster_height = (campaign.characters.len() as u16).clamp(1, 8) + 2;
        let chunks = Layout::vertical([
            Constraint::Length(4),             // header
            Constraint::Length(roster_height), // party
            Constraint::Min(3),                // log
            Constraint::Length(3),             // note input
        ])
        .split(area);

        let mode = if campaign.is_ai_dm {
            Span::styled(" AI DM ", theme::busy_badge())
        } else {
            Span::styled(" You are the DM ", theme::brand_badge())
        };
        let header = vec![
            Line::from(vec![Span::styled(campaign.name.clone(), theme::title()), Span::raw("  "), mode]),
            Line::from(vec![
                Span::styled("Join: ", theme::key_hint()),
                Span::raw(campaign.join_link()),
                Span::styled(format!("  ({})", campaign.invite_code), theme::dim()),
            ]),
            Line::styled(campaign.description.clone(), theme::muted()),
        ];
        frame.render_widget(Paragraph::new(header).wrap(Wrap { trim: true }), chunks[0]);

        let items: Vec<ListItem> = campaign
            .characters
            .iter()
            .map(|c| ListItem::new(character_summary(c)))
            .collect();
        let mut roster_state = ListState::default();
        if !campaign.characters.is_empty() {
            roster_state.select(Some(self.selected.min(campaign.characters.len() - 1)));
        }
        let roster = if items.is_empty() {
            List::new([ListItem::new(Line::styled("No adventurers yet. ^P adds one.", theme::dim()))])
        } else {
            List::new(items)
        }
        .block(theme::block("Party", focused))
        .highlight_style(Style::default().bg(theme::BG_SURFACE).add_modifier(Modifier::BOLD))
        .highlight_symbol("▸ ");
        frame.render_stateful_widget(roster, chunks[1], &mut roster_state);

        let log_lines: Vec<Line> = campaign
            .logs
            .iter()
            .rev()
            .map(|entry| {
                let (label, color) = log_label(entry.entry_type);
                Line::from(vec![
                    Span::styled(entry.timestamp.format("%b %d %H:%M ").to_string(), theme::dim()),
                    Span::styled(format!("[{label}] "), Style::default().fg(color)),
                    Span::raw(entry.content.clone()),
                ])
            })
            .collect();
        frame.render_widget(
            Paragraph::new(log_lines)
                .wrap(Wrap { trim: false })
                .block(theme::block("Session Log", focused)),
            chunks[2],
        );

        frame.render_widget(
            self.input
                .widget("Note", "Jot a note... (^P add character, Del remove, ^T toggle AI DM)", focused),
            chunks[3],
        );
    }
}

//! Single-line text input with cursor management.
//!
//! Shared by the co-pilot, party chat and campaign log inputs.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::theme;

/// What a key press did to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Enter on non-blank text; the buffer has been emptied.
    Submitted(String),
    /// The key edited or moved within the buffer.
    Edited,
    /// Not an editing key; the caller may handle it.
    Ignored,
}

#[derive(Debug, Default)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_char(&mut self, c: char) {
        self.content.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .char_indices()
            .nth(1)
            .map(|(i, _)| self.cursor + i)
            .unwrap_or(self.content.len())
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.prev_boundary();
            self.content.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            let next = self.next_boundary();
            self.content.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Take the content out, resetting the buffer.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Whitespace-only counts as blank.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Apply an editing key. Enter submits unless the text is blank.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> InputOutcome {
        match (modifiers, code) {
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if self.is_blank() {
                    InputOutcome::Edited
                } else {
                    InputOutcome::Submitted(self.take())
                }
            }
            (KeyModifiers::NONE, KeyCode::Backspace) => {
                self.backspace();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE, KeyCode::Delete) => {
                self.delete();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE, KeyCode::Left) => {
                self.move_left();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE, KeyCode::Right) => {
                self.move_right();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE, KeyCode::Home) | (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                self.move_home();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE, KeyCode::End) | (KeyModifiers::CONTROL, KeyCode::Char('e')) => {
                self.move_end();
                InputOutcome::Edited
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.clear();
                InputOutcome::Edited
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
                self.insert_char(c);
                InputOutcome::Edited
            }
            _ => InputOutcome::Ignored,
        }
    }

    /// The input line, with a block cursor when `active` and a dimmed
    /// placeholder when empty.
    pub fn line(&self, placeholder: &str, active: bool) -> Line<'static> {
        if self.content.is_empty() {
            let mut spans = Vec::new();
            if active {
                spans.push(Span::styled(" ", Style::default().bg(theme::TEXT)));
            }
            spans.push(Span::styled(placeholder.to_string(), theme::dim()));
            return Line::from(spans);
        }
        if !active {
            return Line::raw(self.content.clone());
        }

        let before = &self.content[..self.cursor];
        let at = self.content[self.cursor..].chars().next();
        let cursor_text = at.map(String::from).unwrap_or_else(|| " ".to_string());
        let after = match at {
            Some(c) => &self.content[self.cursor + c.len_utf8()..],
            None => "",
        };
        Line::from(vec![
            Span::raw(before.to_string()),
            Span::styled(cursor_text, Style::default().bg(theme::TEXT).fg(theme::BG_BASE)),
            Span::raw(after.to_string()),
        ])
    }

    pub fn widget(&self, title: &str, placeholder: &str, active: bool) -> Paragraph<'static> {
        Paragraph::new(self.line(placeholder, active)).block(theme::block(title, active).title_style(theme::title()))
    }
}

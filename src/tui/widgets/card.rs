//! Transcript rendering: chat text plus DM screen cards drawn as framed boxes.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::campaign::{Message, MessageRole, PlayerMessage};
use crate::core::cards::{card_lines, CardLine, ExtractedCard, Segment};
use crate::tui::theme;

const CARD_RULE_WIDTH: usize = 32;

fn text_lines(text: &str, style: Style) -> impl Iterator<Item = Line<'static>> + '_ {
    text.split('\n')
        .map(move |line| Line::from(Span::styled(line.to_string(), style)))
}

/// Frame one card: header rule, `Label: value` rows, closing rule.
pub fn card_block_lines(card: &ExtractedCard<'_>) -> Vec<Line<'static>> {
    let color = theme::card_color(card.card_type);
    let border = Style::default().fg(color);
    let header = card.card_type.header();

    let mut lines = Vec::new();
    let fill = CARD_RULE_WIDTH.saturating_sub(header.chars().count() + 4);
    lines.push(Line::from(vec![
        Span::styled("┌─ ", border),
        Span::styled(header.to_string(), border.add_modifier(Modifier::BOLD)),
        Span::styled(format!(" {}", "─".repeat(fill)), border),
    ]));

    for row in card_lines(card) {
        let mut spans = vec![Span::styled("│ ", border)];
        match row {
            CardLine::Field { label, value } => {
                spans.push(Span::styled(
                    format!("{label}: "),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(value.to_string(), Style::default().fg(theme::TEXT)));
            }
            CardLine::Text(text) => {
                spans.push(Span::styled(text.to_string(), Style::default().fg(theme::TEXT)));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(
        format!("└{}", "─".repeat(CARD_RULE_WIDTH - 1)),
        border,
    )));
    lines
}

/// Lines for one co-pilot transcript entry.
pub fn copilot_message_lines(message: &Message) -> Vec<Line<'static>> {
    let is_user = message.role == MessageRole::User;
    let speaker = if is_user { "You" } else { "Co-Pilot" };

    let mut lines = vec![Line::from(Span::styled(speaker, theme::speaker(!is_user)))];

    if message.is_safety_alert() {
        lines.push(Line::from(Span::styled(
            "⚠ Safety notice for the DM",
            Style::default().fg(theme::WARNING).add_modifier(Modifier::BOLD),
        )));
    }
    if message.is_panic_response {
        lines.push(Line::from(Span::styled(
            "✚ Story recovery options",
            Style::default().fg(theme::ACCENT).add_modifier(Modifier::BOLD),
        )));
    }

    let body = Style::default().fg(theme::TEXT);
    for segment in message.segments() {
        match segment {
            Segment::Text(text) => {
                let text = text.trim_matches('\n');
                if !text.is_empty() {
                    lines.extend(text_lines(text, body));
                }
            }
            Segment::Card(card) => lines.extend(card_block_lines(&card)),
        }
    }

    lines.push(Line::raw(""));
    lines
}

/// Lines for one party-chat entry.
pub fn player_message_lines(message: &PlayerMessage) -> Vec<Line<'static>> {
    let name = Span::styled(format!("{}: ", message.sender_name), theme::speaker(message.is_from_dm()));
    let mut first = vec![name];
    let mut rest = message.content.split('\n');
    if let Some(head) = rest.next() {
        first.push(Span::styled(head.to_string(), Style::default().fg(theme::TEXT)));
    }
    if let Some(roll) = &message.roll_result {
        first.push(Span::styled(
            format!(" 🎲 {} ({})", roll.total, roll.formula),
            Style::default().fg(theme::PRIMARY_LIGHT).add_modifier(Modifier::BOLD),
        ));
    }

    let mut lines = vec![Line::from(first)];
    lines.extend(rest.map(|line| Line::from(Span::styled(format!("  {line}"), Style::default().fg(theme::TEXT)))));
    if message.attachment_url.is_some() {
        lines.push(Line::from(Span::styled("  [image attached]", theme::muted())));
    }
    lines
}

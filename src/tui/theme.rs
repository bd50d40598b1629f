//! Parchment & ember color theme for the DM Co-Pilot TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

use crate::core::cards::CardType;

// ── Primary palette ─────────────────────────────────────────────────────────

/// Gold, the primary accent for active items and focused borders.
pub const PRIMARY: Color = Color::Rgb(0xD4, 0xA0, 0x17);
/// Pale gold for highlights and hints.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0xE8, 0xC5, 0x6A);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Ember, for calls to action and the panic button.
pub const ACCENT: Color = Color::Rgb(0xE0, 0x5A, 0x2B);

// ── Backgrounds ─────────────────────────────────────────────────────────────

pub const BG_BASE: Color = Color::Rgb(0x14, 0x11, 0x1C);
pub const BG_SURFACE: Color = Color::Rgb(0x1F, 0x1A, 0x2B);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xE6, 0xDF, 0xD0);
pub const TEXT_MUTED: Color = Color::Rgb(0x9A, 0x90, 0x80);
pub const TEXT_DIM: Color = Color::Rgb(0x5A, 0x52, 0x4A);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xEF, 0x53, 0x50);
pub const SUCCESS: Color = Color::Rgb(0x66, 0xBB, 0x6A);
pub const WARNING: Color = Color::Rgb(0xFF, 0xA7, 0x26);
pub const INFO: Color = Color::Rgb(0x42, 0xA5, 0xF5);

// ── Cards ───────────────────────────────────────────────────────────────────

pub const CARD_NPC: Color = Color::Rgb(0x64, 0xB5, 0xF6);
pub const CARD_LOCATION: Color = Color::Rgb(0x81, 0xC7, 0x84);
pub const CARD_QUEST: Color = Color::Rgb(0xFF, 0xD5, 0x4F);
pub const CARD_ENCOUNTER: Color = Color::Rgb(0xE5, 0x73, 0x73);
pub const CARD_ITEM: Color = Color::Rgb(0xBA, 0x68, 0xC8);

/// Border and title color for a DM screen card.
pub fn card_color(card_type: CardType) -> Color {
    match card_type {
        CardType::Npc => CARD_NPC,
        CardType::Location => CARD_LOCATION,
        CardType::Quest => CARD_QUEST,
        CardType::Encounter => CARD_ENCOUNTER,
        CardType::Item => CARD_ITEM,
        CardType::Unknown => TEXT_MUTED,
    }
}

// ── Style helpers ───────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(PRIMARY_LIGHT)
}

/// Speaker name in a transcript.
pub fn speaker(is_dm: bool) -> Style {
    let color = if is_dm { PRIMARY } else { INFO };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn busy_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

pub fn block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(if focused { border_focused() } else { border_default() })
}

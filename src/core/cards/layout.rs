//! Card body layout.
//!
//! A display transform over one card: drop the header, then read each
//! remaining line as either a `Label: value` field or free text. Nothing here
//! can fail; every line renders as something.

use super::segmenter::ExtractedCard;

/// Marker the co-pilot emits when it flags unsafe table content.
const SAFETY_MARKER: &str = "ISSUE NOTICED:";

/// Openers of the first recovery option in panic-button replies.
const PANIC_MARKERS: [&str; 2] = ["OPTION A \u{2013} Soft Fix", "OPTION A - Soft Fix"];

/// One rendered line of a card body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardLine<'a> {
    /// `Label: value`, split at the first colon, both sides trimmed.
    Field { label: &'a str, value: &'a str },
    /// A line without a colon.
    Text(&'a str),
}

/// Remove the leading card header (case-insensitive) and surrounding
/// whitespace from a card's raw content.
pub fn strip_header<'a>(card: &ExtractedCard<'a>) -> &'a str {
    let header = card.card_type.header();
    let content = card.content;
    let body = match content.get(..header.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(header) => &content[header.len()..],
        _ => content,
    };
    body.trim()
}

/// Lay out a card body as fields and text lines. Blank lines are dropped.
pub fn card_lines<'a>(card: &ExtractedCard<'a>) -> Vec<CardLine<'a>> {
    strip_header(card)
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once(':') {
            Some((label, value)) => CardLine::Field {
                label: label.trim(),
                value: value.trim(),
            },
            None => CardLine::Text(line),
        })
        .collect()
}

/// Whether a model reply carries a safety notice for the DM.
pub fn is_safety_alert(content: &str) -> bool {
    content.contains(SAFETY_MARKER)
}

/// Whether a model reply follows the panic-button recovery format.
pub fn is_panic_response(content: &str) -> bool {
    PANIC_MARKERS.iter().any(|marker| content.contains(marker))
}

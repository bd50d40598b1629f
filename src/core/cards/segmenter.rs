//! Message Segmenter
//!
//! Finds every card header anywhere in a message (not only at line starts)
//! and cuts the message at those offsets. A card runs from its header to the
//! next header or the end of the message. There is no closing marker, so a
//! header quoted inside a card body starts a new card; generated content
//! already in circulation relies on exactly this boundary behavior.

use serde::{Deserialize, Serialize};

// ============================================================================
// Card Types
// ============================================================================

/// Kind of DM screen card, identified by its literal header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[serde(rename = "NPC CARD")]
    Npc,
    #[serde(rename = "LOCATION CARD")]
    Location,
    #[serde(rename = "QUEST CARD")]
    Quest,
    #[serde(rename = "ENCOUNTER CARD")]
    Encounter,
    #[serde(rename = "ITEM CARD")]
    Item,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

/// Recognized headers, in scan order. Two headers starting at the same
/// offset keep this order.
pub const CARD_HEADERS: [CardType; 5] = [
    CardType::Npc,
    CardType::Location,
    CardType::Quest,
    CardType::Encounter,
    CardType::Item,
];

impl CardType {
    /// The literal header text that introduces this card.
    pub fn header(&self) -> &'static str {
        match self {
            CardType::Npc => "NPC CARD",
            CardType::Location => "LOCATION CARD",
            CardType::Quest => "QUEST CARD",
            CardType::Encounter => "ENCOUNTER CARD",
            CardType::Item => "ITEM CARD",
            CardType::Unknown => "UNKNOWN",
        }
    }

    /// Look up a card type by its exact header.
    pub fn from_header(header: &str) -> Self {
        CARD_HEADERS
            .iter()
            .copied()
            .find(|t| t.header() == header)
            .unwrap_or(CardType::Unknown)
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

// ============================================================================
// Segments
// ============================================================================

/// A card cut out of a message. `content` includes the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedCard<'a> {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub content: &'a str,
}

/// One display unit of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum Segment<'a> {
    Text(&'a str),
    Card(ExtractedCard<'a>),
}

impl<'a> Segment<'a> {
    /// Raw slice of the original message covered by this segment.
    pub fn content(&self) -> &'a str {
        match self {
            Segment::Text(text) => text,
            Segment::Card(card) => card.content,
        }
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Segment::Card(_))
    }
}

// ============================================================================
// Segmentation
// ============================================================================

/// Split `text` using the standard card headers.
pub fn segment(text: &str) -> Vec<Segment<'_>> {
    segment_with(text, &CARD_HEADERS)
}

/// Split `text` at every occurrence of any header in `headers`.
///
/// Always returns at least one segment, and the segment contents concatenate
/// back to `text` exactly.
pub fn segment_with<'a>(text: &'a str, headers: &[CardType]) -> Vec<Segment<'a>> {
    let mut matches: Vec<(usize, CardType)> = Vec::new();
    for card_type in headers {
        // match_indices resumes after each hit, so repeats never overlap
        matches.extend(
            text.match_indices(card_type.header())
                .map(|(offset, _)| (offset, *card_type)),
        );
    }
    // Stable: equal offsets keep header-list order
    matches.sort_by_key(|(offset, _)| *offset);

    let mut segments = Vec::with_capacity(matches.len() * 2 + 1);
    let mut consumed = 0;

    for (i, &(start, card_type)) in matches.iter().enumerate() {
        if start > consumed {
            segments.push(Segment::Text(&text[consumed..start]));
        }

        let end = matches
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(text.len());

        segments.push(Segment::Card(ExtractedCard {
            card_type,
            content: &text[start..end],
        }));
        consumed = end;
    }

    if consumed < text.len() {
        segments.push(Segment::Text(&text[consumed..]));
    }

    if segments.is_empty() {
        segments.push(Segment::Text(text));
    }

    segments
}

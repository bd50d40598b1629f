//! Property-based tests for message segmentation
//!
//! Tests invariants:
//! - Text without headers is a single, identical text segment
//! - Segment contents concatenate back to the input
//! - Every card starts with its own header and holds no other header
//! - Segmenting a text segment again yields the same segment

use proptest::prelude::*;

use crate::core::cards::{segment, CardType, Segment, CARD_HEADERS};

// ============================================================================
// Strategies
// ============================================================================

/// Lowercase prose can never contain an uppercase card header.
fn prose() -> impl Strategy<Value = String> {
    "[a-z0-9 \n:,.!?]{0,40}"
}

fn header() -> impl Strategy<Value = CardType> {
    prop::sample::select(CARD_HEADERS.to_vec())
}

/// A message built from prose pieces with headers spliced between them.
/// Returns the text and the headers in order of appearance.
fn message() -> impl Strategy<Value = (String, Vec<CardType>)> {
    (prose(), prop::collection::vec((header(), prose()), 0..6)).prop_map(|(lead, cards)| {
        let mut text = lead;
        let mut types = Vec::with_capacity(cards.len());
        for (card_type, body) in cards {
            text.push_str(card_type.header());
            text.push_str(&body);
            types.push(card_type);
        }
        (text, types)
    })
}

fn contains_any_header(text: &str) -> bool {
    CARD_HEADERS.iter().any(|t| text.contains(t.header()))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_header_free_text_is_one_segment(text in prose()) {
        prop_assert_eq!(segment(&text), vec![Segment::Text(&text)]);
    }

    #[test]
    fn prop_concatenation_is_lossless((text, _) in message()) {
        let joined: String = segment(&text).iter().map(|s| s.content()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn prop_cards_follow_header_order((text, types) in message()) {
        let found: Vec<CardType> = segment(&text)
            .iter()
            .filter_map(|s| match s {
                Segment::Card(card) => Some(card.card_type),
                Segment::Text(_) => None,
            })
            .collect();
        prop_assert_eq!(found, types);
    }

    #[test]
    fn prop_card_runs_to_next_header((text, _) in message()) {
        for seg in segment(&text) {
            match seg {
                Segment::Card(card) => {
                    prop_assert!(card.content.starts_with(card.card_type.header()));
                    let body = &card.content[card.card_type.header().len()..];
                    prop_assert!(!contains_any_header(body));
                }
                Segment::Text(t) => prop_assert!(!contains_any_header(t)),
            }
        }
    }

    #[test]
    fn prop_text_segments_are_fixed_points((text, _) in message()) {
        for seg in segment(&text) {
            if let Segment::Text(t) = seg {
                prop_assert_eq!(segment(t), vec![Segment::Text(t)]);
            }
        }
    }

    #[test]
    fn prop_never_empty(text in ".{0,60}") {
        prop_assert!(!segment(&text).is_empty());
    }
}

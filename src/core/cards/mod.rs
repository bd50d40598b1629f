//! DM Screen Cards
//!
//! The co-pilot is instructed to present story elements as compact "DM screen
//! cards" introduced by literal headers (`NPC CARD`, `QUEST CARD`, ...). This
//! module recovers those cards from free-form model output:
//!
//! - `segmenter`: splits a message body into ordered text and card segments
//! - `layout`: turns a card body into label/value lines for display
//!
//! Cards are never stored. They are derived from the message content on every
//! render, so segmentation must stay a pure function of the input text.

pub mod layout;
pub mod segmenter;

pub use layout::{card_lines, is_panic_response, is_safety_alert, strip_header, CardLine};
pub use segmenter::{segment, segment_with, CardType, ExtractedCard, Segment, CARD_HEADERS};

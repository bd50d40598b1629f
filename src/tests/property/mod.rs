//! Property-based tests
//!
//! Invariants that should hold for all inputs, checked with proptest.
//!
//! ## Test Modules
//!
//! - `segmenter_props`: message segmentation
//!   - Header-free text comes back as one identical text segment
//!   - Concatenating segments reproduces the input
//!   - Each card runs exactly to the next header
//!   - Re-segmenting a text segment is a no-op
//!
//! - `dice_props`: dice notation and rolling
//!   - Totals stay within `[count + modifier, count * sides + modifier]`
//!   - Formatted notation parses back to itself
//!   - Seeded rollers are deterministic
//!
//! - `character_props`: ability score rules
//!   - Modifiers follow `floor((score - 10) / 2)`
//!   - Adjustments never leave 1..=20
//!
//! By default proptest runs 256 cases per property; set `PROPTEST_CASES` to
//! change it.

mod character_props;
mod segmenter_props;

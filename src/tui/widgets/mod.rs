pub mod card;
pub mod input;

pub use input::{InputOutcome, TextInput};

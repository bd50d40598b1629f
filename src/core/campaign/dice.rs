//! Dice notation and rolling.
//!
//! Supports `NdM`, `dM` and an optional flat modifier (`2d6+3`, `d20-1`).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dice on the standard tray, smallest first.
pub const STANDARD_DICE: [u32; 6] = [4, 6, 8, 10, 12, 20];

const MAX_DICE: u32 = 100;
const MAX_SIDES: u32 = 1000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Empty dice notation")]
    Empty,

    #[error("Invalid dice notation '{notation}': {reason}")]
    Invalid { notation: String, reason: String },
}

impl DiceError {
    fn invalid(notation: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            notation: notation.to_string(),
            reason: reason.into(),
        }
    }
}

/// Parsed dice expression such as `2d6+3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceNotation {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
}

impl DiceNotation {
    /// A single die, e.g. `1d20`.
    pub fn single(sides: u32) -> Self {
        Self {
            count: 1,
            sides,
            modifier: 0,
        }
    }

    pub fn parse(notation: &str) -> Result<Self, DiceError> {
        let compact: String = notation
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        if compact.is_empty() {
            return Err(DiceError::Empty);
        }

        let (count_part, rest) = compact
            .split_once('d')
            .ok_or_else(|| DiceError::invalid(notation, "missing 'd'"))?;

        let count = if count_part.is_empty() {
            1
        } else {
            count_part
                .parse::<u32>()
                .map_err(|_| DiceError::invalid(notation, "dice count is not a number"))?
        };

        let (sides_part, modifier) = match rest.find(['+', '-']) {
            Some(idx) => {
                let modifier = rest[idx..]
                    .parse::<i32>()
                    .map_err(|_| DiceError::invalid(notation, "modifier is not a number"))?;
                (&rest[..idx], modifier)
            }
            None => (rest, 0),
        };

        let sides = sides_part
            .parse::<u32>()
            .map_err(|_| DiceError::invalid(notation, "die size is not a number"))?;

        if count == 0 || count > MAX_DICE {
            return Err(DiceError::invalid(notation, format!("dice count must be 1-{MAX_DICE}")));
        }
        if sides < 2 || sides > MAX_SIDES {
            return Err(DiceError::invalid(notation, format!("die size must be 2-{MAX_SIDES}")));
        }

        Ok(Self { count, sides, modifier })
    }
}

impl std::fmt::Display for DiceNotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Outcome of rolling a [`DiceNotation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    pub notation: DiceNotation,
    pub rolls: Vec<u32>,
    /// Sum of the dice before the modifier.
    pub subtotal: i64,
    pub total: i64,
}

impl RollResult {
    /// Formula string shown next to the total, e.g. `1d20`.
    pub fn formula(&self) -> String {
        self.notation.to_string()
    }
}

/// Random dice source. Seed it for reproducible rolls.
pub struct DiceRoller {
    rng: StdRng,
}

impl DiceRoller {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Roll every die in `notation`. A zero-sided die always shows 1.
    pub fn roll(&mut self, notation: &DiceNotation) -> RollResult {
        let sides = notation.sides.max(1);
        let rolls: Vec<u32> = (0..notation.count)
            .map(|_| self.rng.gen_range(1..=sides))
            .collect();
        let subtotal: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        RollResult {
            notation: *notation,
            rolls,
            subtotal,
            total: subtotal + i64::from(notation.modifier),
        }
    }

    /// Roll a single die with `sides` faces.
    pub fn roll_die(&mut self, sides: u32) -> RollResult {
        self.roll(&DiceNotation::single(sides))
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

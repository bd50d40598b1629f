//! Character creation and 5e sheet math.

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::{CampaignError, CampaignResult};
use super::models::{
    new_id, Ability, AbilityScores, Attack, Character, HitPoints, InviteStatus,
};

pub const MIN_ABILITY_SCORE: u8 = 1;
pub const MAX_ABILITY_SCORE: u8 = 20;
pub const MAX_LEVEL: u32 = 20;

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            str: 10,
            dex: 10,
            con: 10,
            int: 10,
            wis: 10,
            cha: 10,
        }
    }
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> u8 {
        match ability {
            Ability::Str => self.str,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    fn slot(&mut self, ability: Ability) -> &mut u8 {
        match ability {
            Ability::Str => &mut self.str,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }

    /// Shift one score by `delta`, clamped to 1..=20.
    pub fn adjust(&mut self, ability: Ability, delta: i32) {
        let slot = self.slot(ability);
        let next = (i32::from(*slot) + delta)
            .clamp(i32::from(MIN_ABILITY_SCORE), i32::from(MAX_ABILITY_SCORE));
        *slot = next as u8;
    }

    /// Clamp every score into 1..=20.
    pub fn clamped(mut self) -> Self {
        for ability in Ability::ALL {
            let slot = self.slot(ability);
            *slot = (*slot).clamp(MIN_ABILITY_SCORE, MAX_ABILITY_SCORE);
        }
        self
    }
}

/// 5e ability modifier: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: u8) -> i32 {
    (i32::from(score) - 10).div_euclid(2)
}

/// Modifier with an explicit sign, e.g. `+3` or `-1`.
pub fn format_modifier(modifier: i32) -> String {
    if modifier >= 0 {
        format!("+{modifier}")
    } else {
        modifier.to_string()
    }
}

impl Character {
    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.stats.get(ability))
    }

    /// Sheet value if set, otherwise `ceil(level / 4) + 1`.
    pub fn proficiency_bonus(&self) -> i32 {
        self.proficiency_bonus
            .filter(|&b| b != 0)
            .unwrap_or_else(|| {
                let level = i32::try_from(self.level).unwrap_or(i32::MAX);
                level.saturating_add(3) / 4 + 1
            })
    }

    pub fn passive_perception(&self) -> i32 {
        10 + self.modifier(Ability::Wis)
    }

    /// Sheet AC if set, otherwise unarmored `10 + DEX`.
    pub fn effective_armor_class(&self) -> i32 {
        self.armor_class
            .filter(|&ac| ac != 0)
            .unwrap_or_else(|| 10 + self.modifier(Ability::Dex))
    }

    /// Sheet initiative if set, otherwise the DEX modifier.
    pub fn effective_initiative(&self) -> i32 {
        self.initiative
            .filter(|&i| i != 0)
            .unwrap_or_else(|| self.modifier(Ability::Dex))
    }

    /// Apply the same rules as [`CharacterDraft::build`] to an edited sheet.
    pub(crate) fn validated(mut self) -> CampaignResult<Self> {
        self.name = required("name", self.name)?;
        self.race = required("race", self.race)?;
        self.class = required("class", self.class)?;
        self.level = self.level.clamp(1, MAX_LEVEL);
        self.stats = self.stats.clamped();
        Ok(self)
    }
}

// ============================================================================
// Drafts
// ============================================================================

/// Fields collected when creating a character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterDraft {
    pub name: String,
    pub race: String,
    pub class: String,
    pub background: Option<String>,
    pub level: u32,
    pub stats: AbilityScores,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub player_id: Option<String>,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            race: String::new(),
            class: String::new(),
            background: None,
            level: 1,
            stats: AbilityScores::default(),
            bio: None,
            image_url: None,
            player_id: None,
        }
    }
}

impl CharacterDraft {
    pub fn new(name: impl Into<String>, race: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            race: race.into(),
            class: class.into(),
            ..Self::default()
        }
    }

    /// Validate the draft and fill in starting-sheet defaults.
    pub fn build(self) -> CampaignResult<Character> {
        let name = required("name", self.name)?;
        let race = required("race", self.race)?;
        let class = required("class", self.class)?;

        let image_url = self
            .image_url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| format!("https://api.dicebear.com/9.x/adventurer/svg?seed={name}"));
        let invite_status = if self.player_id.is_some() {
            InviteStatus::Accepted
        } else {
            InviteStatus::None
        };

        Ok(Character {
            id: new_id(),
            name,
            race,
            class,
            background: self
                .background
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            level: self.level.clamp(1, MAX_LEVEL),
            stats: self.stats.clamped(),
            bio: Some(self.bio.unwrap_or_default()),
            image_url: Some(image_url),
            player_id: self.player_id,
            invite_email: None,
            invite_status,
            alignment: None,
            xp: None,
            armor_class: Some(10),
            speed: Some(30),
            initiative: None,
            hp: Some(HitPoints {
                current: 10,
                max: 10,
                temp: 0,
            }),
            hit_dice: None,
            death_saves: None,
            proficiency_bonus: None,
            skills: Vec::new(),
            proficiencies: Some("Common".to_string()),
            attacks: vec![Attack {
                name: "Unarmed Strike".to_string(),
                bonus: "+2".to_string(),
                damage: "1d4".to_string(),
                damage_type: "Bludgeoning".to_string(),
            }],
            equipment: None,
            features: None,
            personality: None,
        })
    }
}

fn required(field: &'static str, value: String) -> CampaignResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CampaignError::required(field))
    } else {
        Ok(trimmed.to_string())
    }
}

/// Ready-made level 1 adventurers for quick starts.
pub fn pregenerated_drafts() -> Vec<CharacterDraft> {
    vec![
        CharacterDraft {
            name: "Thorgar".to_string(),
            race: "Dwarf".to_string(),
            class: "Fighter".to_string(),
            background: Some("Soldier".to_string()),
            stats: AbilityScores {
                str: 16,
                dex: 12,
                con: 15,
                int: 8,
                wis: 13,
                cha: 10,
            },
            bio: Some("A grumpy dwarf with a heart of gold (and a lust for actual gold).".to_string()),
            image_url: Some("https://api.dicebear.com/9.x/adventurer/svg?seed=Thorgar".to_string()),
            ..CharacterDraft::default()
        },
        CharacterDraft {
            name: "Elara".to_string(),
            race: "Elf".to_string(),
            class: "Wizard".to_string(),
            background: Some("Sage".to_string()),
            stats: AbilityScores {
                str: 8,
                dex: 14,
                con: 12,
                int: 17,
                wis: 13,
                cha: 10,
            },
            bio: Some("She seeks the lost library of the Ancients.".to_string()),
            image_url: Some("https://api.dicebear.com/9.x/adventurer/svg?seed=Elara".to_string()),
            ..CharacterDraft::default()
        },
    ]
}

/// Pick one of the pre-generated drafts at random.
pub fn random_pregenerated(rng: &mut impl Rng) -> CharacterDraft {
    pregenerated_drafts()
        .choose(rng)
        .cloned()
        .unwrap_or_default()
}

//! Property-based tests for ability scores and derived sheet values

use proptest::prelude::*;

use crate::core::campaign::{
    ability_modifier, format_modifier, Ability, AbilityScores, CharacterDraft,
};

fn ability() -> impl Strategy<Value = Ability> {
    prop::sample::select(Ability::ALL.to_vec())
}

fn scores() -> impl Strategy<Value = AbilityScores> {
    prop::array::uniform6(1u8..=20).prop_map(|[str, dex, con, int, wis, cha]| AbilityScores {
        str,
        dex,
        con,
        int,
        wis,
        cha,
    })
}

proptest! {
    #[test]
    fn prop_modifier_is_floored_half(score in 1u8..=20) {
        let expected = ((f64::from(score) - 10.0) / 2.0).floor() as i32;
        prop_assert_eq!(ability_modifier(score), expected);
    }

    #[test]
    fn prop_modifier_is_monotonic(a in 1u8..=20, b in 1u8..=20) {
        if a <= b {
            prop_assert!(ability_modifier(a) <= ability_modifier(b));
        }
    }

    #[test]
    fn prop_formatted_modifier_is_signed(m in -5i32..=5) {
        let text = format_modifier(m);
        prop_assert!(text.starts_with('+') || text.starts_with('-'));
        prop_assert_eq!(text.parse::<i32>().ok(), Some(m));
    }

    #[test]
    fn prop_adjust_stays_in_range(
        mut stats in scores(),
        which in ability(),
        deltas in prop::collection::vec(-25i32..=25, 1..10),
    ) {
        for delta in deltas {
            stats.adjust(which, delta);
            prop_assert!((1..=20).contains(&stats.get(which)));
        }
    }

    #[test]
    fn prop_adjust_leaves_other_scores(mut stats in scores(), which in ability(), delta in -5i32..=5) {
        let before = stats;
        stats.adjust(which, delta);
        for other in Ability::ALL.into_iter().filter(|a| *a != which) {
            prop_assert_eq!(stats.get(other), before.get(other));
        }
    }

    #[test]
    fn prop_built_sheet_is_clamped(raw in prop::array::uniform6(0u8..=255), level in 0u32..=30) {
        let [str, dex, con, int, wis, cha] = raw;
        let mut draft = CharacterDraft::new("Vex", "Tiefling", "Warlock");
        draft.stats = AbilityScores { str, dex, con, int, wis, cha };
        draft.level = level;

        let character = draft.build().unwrap();
        for a in Ability::ALL {
            prop_assert!((1..=20).contains(&character.stats.get(a)));
        }
        prop_assert!((1..=20).contains(&character.level));
        prop_assert_eq!(
            character.proficiency_bonus(),
            (character.level as i32 + 3) / 4 + 1
        );
    }
}

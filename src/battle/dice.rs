use schema::{Archetype, Move};
use serde::{Deserialize, Serialize};

use crate::battle::state::{BattleEvent, EventBus, TurnRng};

/// Qualitative band a d20 roll falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceTag {
    Miss,
    Normal,
    Crit,
}

/// One resolved d20 roll: the raw die, its band, and the damage multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiceOutcome {
    pub roll: u8,
    pub tag: DiceTag,
    pub multiplier: f64,
}

/// Uniform d20 mapped down from the oracle's 1..=100 range.
pub fn roll_d20(rng: &mut TurnRng) -> u8 {
    (rng.next_outcome("d20 roll") - 1) / 5 + 1
}

/// The banded roll-to-multiplier table, unique per archetype. This is the
/// single source of hit/miss/crit variance.
pub fn dice_outcome(archetype: Archetype, roll: u8) -> DiceOutcome {
    let (tag, multiplier) = match archetype {
        Archetype::Knight => match roll {
            1 => (DiceTag::Miss, 0.0),
            2..=5 => (DiceTag::Normal, 0.8),
            6..=15 => (DiceTag::Normal, 1.0),
            16..=19 => (DiceTag::Normal, 1.2),
            _ => (DiceTag::Crit, 2.0),
        },
        Archetype::Orc => match roll {
            1 => (DiceTag::Miss, 0.0),
            2..=4 => (DiceTag::Normal, 0.7),
            5..=14 => (DiceTag::Normal, 1.0),
            15..=19 => (DiceTag::Normal, 1.3),
            _ => (DiceTag::Crit, 2.5),
        },
        Archetype::Mage => match roll {
            1 => (DiceTag::Miss, 0.0),
            2..=4 => (DiceTag::Normal, 0.7),
            5..=14 => (DiceTag::Normal, 1.0),
            15..=19 => (DiceTag::Normal, 1.3),
            _ => (DiceTag::Crit, 2.0),
        },
        Archetype::Ninja => match roll {
            1 => (DiceTag::Miss, 0.0),
            2..=3 => (DiceTag::Normal, 0.75),
            4..=13 => (DiceTag::Normal, 1.0),
            14..=19 => (DiceTag::Normal, 1.25),
            _ => (DiceTag::Crit, 2.2),
        },
        // Boss abilities roll damage ranges directly and never consult the
        // d20 bands.
        Archetype::Boss => (DiceTag::Normal, 1.0),
    };
    DiceOutcome {
        roll,
        tag,
        multiplier,
    }
}

/// Roll the d20 for an attack and report the outcome on the event bus.
/// The caller decides what a Miss short-circuits.
pub fn roll_attack_dice(
    archetype: Archetype,
    attacker_index: usize,
    mv: Move,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> DiceOutcome {
    let roll = roll_d20(rng);
    let outcome = dice_outcome(archetype, roll);
    bus.push(BattleEvent::DiceRolled {
        index: attacker_index,
        roll: outcome.roll,
        tag: outcome.tag,
        multiplier: outcome.multiplier,
    });
    if outcome.tag == DiceTag::Crit {
        bus.push(BattleEvent::CriticalHit {
            index: attacker_index,
            mv,
        });
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Archetype::Knight, 1, DiceTag::Miss, 0.0)]
    #[case(Archetype::Knight, 2, DiceTag::Normal, 0.8)]
    #[case(Archetype::Knight, 5, DiceTag::Normal, 0.8)]
    #[case(Archetype::Knight, 6, DiceTag::Normal, 1.0)]
    #[case(Archetype::Knight, 15, DiceTag::Normal, 1.0)]
    #[case(Archetype::Knight, 16, DiceTag::Normal, 1.2)]
    #[case(Archetype::Knight, 19, DiceTag::Normal, 1.2)]
    #[case(Archetype::Knight, 20, DiceTag::Crit, 2.0)]
    #[case(Archetype::Orc, 1, DiceTag::Miss, 0.0)]
    #[case(Archetype::Orc, 4, DiceTag::Normal, 0.7)]
    #[case(Archetype::Orc, 14, DiceTag::Normal, 1.0)]
    #[case(Archetype::Orc, 15, DiceTag::Normal, 1.3)]
    #[case(Archetype::Orc, 20, DiceTag::Crit, 2.5)]
    #[case(Archetype::Mage, 3, DiceTag::Normal, 0.7)]
    #[case(Archetype::Mage, 10, DiceTag::Normal, 1.0)]
    #[case(Archetype::Mage, 20, DiceTag::Crit, 2.0)]
    #[case(Archetype::Ninja, 1, DiceTag::Miss, 0.0)]
    #[case(Archetype::Ninja, 3, DiceTag::Normal, 0.75)]
    #[case(Archetype::Ninja, 13, DiceTag::Normal, 1.0)]
    #[case(Archetype::Ninja, 14, DiceTag::Normal, 1.25)]
    #[case(Archetype::Ninja, 20, DiceTag::Crit, 2.2)]
    fn band_tables_are_exact(
        #[case] archetype: Archetype,
        #[case] roll: u8,
        #[case] tag: DiceTag,
        #[case] multiplier: f64,
    ) {
        let outcome = dice_outcome(archetype, roll);
        assert_eq!(outcome.tag, tag);
        assert_eq!(outcome.multiplier, multiplier);
    }

    #[test]
    fn d20_covers_the_full_range() {
        let mut rng = TurnRng::new_for_test(vec![1, 5, 6, 50, 96, 100]);
        assert_eq!(roll_d20(&mut rng), 1);
        assert_eq!(roll_d20(&mut rng), 1);
        assert_eq!(roll_d20(&mut rng), 2);
        assert_eq!(roll_d20(&mut rng), 10);
        assert_eq!(roll_d20(&mut rng), 20);
        assert_eq!(roll_d20(&mut rng), 20);
    }

    #[test]
    fn crit_roll_emits_a_critical_hit_event() {
        let mut rng = TurnRng::new_for_test(vec![100]);
        let mut bus = EventBus::new();
        let outcome =
            roll_attack_dice(Archetype::Knight, 0, Move::SwordSlash, &mut rng, &mut bus);
        assert_eq!(outcome.tag, DiceTag::Crit);
        assert!(bus
            .events()
            .iter()
            .any(|e| matches!(e, BattleEvent::CriticalHit { .. })));
    }
}

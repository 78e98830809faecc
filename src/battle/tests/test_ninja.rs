use pretty_assertions::assert_eq;
use schema::Move;

use crate::battle::conditions::StatusEffect;
use crate::battle::state::{BattleEvent, TurnRng};
use crate::battle::tests::common::{duel, mid_rng, resolve_scripted};
use crate::combatant::{Action, ArchetypeState, NINJA_BASE_DODGE};
use crate::roster;

fn shuriken_count(state: &crate::battle::state::BattleState, index: usize) -> u32 {
    match state.combatants[index].resources {
        ArchetypeState::Ninja { shuriken_count, .. } => shuriken_count,
        _ => unreachable!("not a ninja"),
    }
}

/// The storm throws 2-3 shurikens but never more than the pouch holds,
/// and the pool never goes negative.
#[test]
fn shuriken_storm_clamps_to_the_remaining_pool() {
    let mut ninja = roster::ninja("Kage");
    if let ArchetypeState::Ninja { shuriken_count, .. } = &mut ninja.resources {
        *shuriken_count = 1;
    }
    let mut state = duel(ninja, roster::knight("Borin"));

    // First draw (100) would mean 3 shurikens; only 1 remains.
    let mut rng = TurnRng::new_for_test(vec![100, 50, 50, 50, 50, 50, 50, 50, 50, 50]);
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::ShurikenStorm)],
        vec![Action::UseMove(Move::SwordSlash)],
    );

    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::ShurikensThrown {
            index: 0,
            used: 1,
            remaining: 0
        }
    )));
    assert_eq!(shuriken_count(&state, 0), 0);
}

/// An empty pouch means the storm cannot be used at all: the turn falls
/// back to Twin Fang Slash.
#[test]
fn empty_pouch_falls_back_to_twin_fang_slash() {
    let mut ninja = roster::ninja("Kage");
    if let ArchetypeState::Ninja { shuriken_count, .. } = &mut ninja.resources {
        *shuriken_count = 0;
    }
    let mut state = duel(ninja, roster::knight("Borin"));

    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::ShurikenStorm)],
        vec![Action::UseMove(Move::SwordSlash)],
    );

    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::FallbackMove {
            index: 0,
            blocked: Move::ShurikenStorm,
            substituted: Move::TwinFangSlash
        }
    )));
    assert_eq!(shuriken_count(&state, 0), 0);
}

#[test]
fn shadowstep_boosts_dodge_and_starts_its_cooldown() {
    let mut state = duel(roster::ninja("Kage"), roster::knight("Borin"));

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::Shadowstep)],
        vec![Action::UseMove(Move::ShieldBash)],
    );

    let ninja = &state.combatants[0];
    assert_eq!(ninja.dodge_chance, NINJA_BASE_DODGE + 0.4);
    assert!(matches!(
        ninja.resources,
        ArchetypeState::Ninja {
            // 3 on use, one upkeep tick already passed.
            shadowstep_cooldown: 2,
            stealth_active: true,
            ..
        }
    ));

    // Still on cooldown next round: the selection falls back.
    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::Shadowstep)],
        vec![Action::UseMove(Move::ShieldBash)],
    );
    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::FallbackMove {
            index: 0,
            blocked: Move::Shadowstep,
            ..
        }
    )));
}

/// Twin Fang Slash spends stealth: the +0.4 dodge bonus is removed the
/// moment the strikes land.
#[test]
fn attacking_out_of_stealth_clears_the_dodge_bonus() {
    let mut state = duel(roster::ninja("Kage"), roster::knight("Borin"));

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::Shadowstep)],
        vec![Action::UseMove(Move::ShieldBash)],
    );

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::TwinFangSlash)],
        vec![Action::UseMove(Move::ShieldBash)],
    );

    let ninja = &state.combatants[0];
    assert_eq!(ninja.dodge_chance, NINJA_BASE_DODGE);
    assert!(matches!(
        ninja.resources,
        ArchetypeState::Ninja {
            stealth_active: false,
            ..
        }
    ));
}

/// The smoke bomb is once per battle: it heals 15% max HP, grants an
/// Untouchable turn, resets the shadowstep cooldown, and refuses a
/// second use.
#[test]
fn smoke_bomb_is_a_one_shot_escape() {
    let mut ninja = roster::ninja("Kage");
    ninja.hp = 40;
    if let ArchetypeState::Ninja {
        shadowstep_cooldown,
        ..
    } = &mut ninja.resources
    {
        *shadowstep_cooldown = 3;
    }
    let mut state = duel(ninja, roster::orc("Morg"));

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::SmokeBombEscape)],
        // The orc roars so the heal is cleanly observable.
        vec![Action::UseMove(Move::Roar)],
    );

    let ninja = &state.combatants[0];
    // 15% of 130 = 19 healed.
    assert_eq!(ninja.hp, 59);
    assert!(ninja.has_status(StatusEffect::Untouchable));
    assert!(matches!(
        ninja.resources,
        ArchetypeState::Ninja {
            shadowstep_cooldown: 0,
            smoke_bomb_used: true,
            ..
        }
    ));

    // Next round the ninja spends the Untouchable turn...
    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::TwinFangSlash)],
        vec![Action::UseMove(Move::Roar)],
    );
    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::TurnSkipped {
            index: 0,
            effect: StatusEffect::Untouchable
        }
    )));

    // ...and a second bomb is refused for the rest of the battle.
    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::SmokeBombEscape)],
        vec![Action::UseMove(Move::Roar)],
    );
    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::FallbackMove {
            index: 0,
            blocked: Move::SmokeBombEscape,
            substituted: Move::TwinFangSlash
        }
    )));
}

/// While stealth is active, each twin fang strike hits 30% harder:
/// 17 * 0.8 * 1.3 = 17.68 -> shadow 1.15 -> 20.33 -> 20 - 8 = 12 per
/// strike against a stock knight.
#[test]
fn stealth_strikes_hit_thirty_percent_harder() {
    let mut state = duel(roster::ninja("Kage"), roster::knight("Borin"));

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::Shadowstep)],
        vec![Action::UseMove(Move::ShieldBash)],
    );

    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::TwinFangSlash)],
        vec![Action::UseMove(Move::ShieldBash)],
    );

    let strike_damage: Vec<u32> = bus
        .events()
        .iter()
        .filter_map(|e| match e {
            BattleEvent::DamageDealt { target: 1, amount, .. } => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(strike_damage, vec![12, 12]);
}

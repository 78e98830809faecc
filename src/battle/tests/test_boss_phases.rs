use pretty_assertions::assert_eq;
use schema::Move;

use crate::battle::conditions::StatusEffect;
use crate::battle::moves::phase_transition;
use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::battle::tests::common::{duel, mid_rng, resolve_scripted};
use crate::combatant::{Action, ArchetypeState, Combatant};
use crate::tournament::final_boss;

fn boss_phase(boss: &Combatant) -> u8 {
    match boss.resources {
        ArchetypeState::Boss { phase, .. } => phase,
        _ => unreachable!("not a boss"),
    }
}

/// 350 max HP: phase 2 triggers at 2/3 (233), phase 3 at 1/3 (116).
#[test]
fn transition_fires_exactly_at_the_hp_boundary() {
    let mut boss = final_boss();
    let mut bus = EventBus::new();

    boss.hp = 234;
    assert!(!phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 1);

    boss.hp = 233;
    assert!(phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 2);
    assert!(bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::BossPhaseStarted { phase: 2, .. })));
}

/// Re-running the check in the same state does not double-advance: the
/// transition heals the boss above the next threshold.
#[test]
fn transition_is_idempotent_at_the_boundary() {
    let mut boss = final_boss();
    let mut bus = EventBus::new();

    boss.hp = 233;
    assert!(phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 2);
    assert_eq!(boss.hp, 268); // 233 + 10% of 350

    assert!(!phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 2, "no double advance");
}

#[test]
fn transition_boosts_stats_and_resets_cooldowns() {
    let mut boss = final_boss();
    let mut bus = EventBus::new();
    if let ArchetypeState::Boss {
        fire_breath_cooldown,
        wing_slam_cooldown,
        ..
    } = &mut boss.resources
    {
        *fire_breath_cooldown = 3;
        *wing_slam_cooldown = 2;
    }

    boss.hp = 200;
    assert!(phase_transition(1, &mut boss, &mut bus));

    assert_eq!(boss.attack, 33); // 28 * 1.2
    assert_eq!(boss.defense, 16); // 15 * 1.1
    assert!(matches!(
        boss.resources,
        ArchetypeState::Boss {
            fire_breath_cooldown: 0,
            wing_slam_cooldown: 0,
            roar_cooldown: 0,
            fury_cooldown: 0,
            ..
        }
    ));
}

#[test]
fn transition_cleanses_crowd_control_but_not_bleeding() {
    let mut boss = final_boss();
    let mut bus = EventBus::new();
    for effect in [
        StatusEffect::Stunned,
        StatusEffect::Frozen,
        StatusEffect::Burning,
        StatusEffect::Shocked,
        StatusEffect::Bleeding,
    ] {
        boss.statuses.insert(effect);
    }

    boss.hp = 100;
    assert!(phase_transition(1, &mut boss, &mut bus));

    for cleansed in [
        StatusEffect::Stunned,
        StatusEffect::Frozen,
        StatusEffect::Burning,
        StatusEffect::Shocked,
    ] {
        assert!(!boss.has_status(cleansed), "{cleansed:?} cleansed");
    }
    assert!(boss.has_status(StatusEffect::Bleeding));
}

/// Phases only climb. The final phase also hardens the boss's guard.
#[test]
fn phases_are_monotonic_up_to_the_cap() {
    let mut boss = final_boss();
    let mut bus = EventBus::new();

    boss.hp = 1;
    assert!(phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 2);

    boss.hp = 1;
    assert!(phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 3);
    assert_eq!(boss.block_chance, 0.1);

    boss.hp = 1;
    assert!(!phase_transition(1, &mut boss, &mut bus));
    assert_eq!(boss_phase(&boss), 3, "capped at max phase");
}

/// Berserker Fury before phase 3 is silently substituted with Claw
/// Strike; the battle carries on without an error.
#[test]
fn fury_outside_phase_three_falls_back_to_claw_strike() {
    let knight = crate::roster::knight("Aldric");
    let mut state = duel(final_boss(), knight);

    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::BerserkerFury)],
        vec![Action::UseMove(Move::SwordSlash)],
    );

    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::FallbackMove {
            index: 0,
            blocked: Move::BerserkerFury,
            substituted: Move::ClawStrike
        }
    )));
    assert!(bus
        .events()
        .iter()
        .any(|e| matches!(e, BattleEvent::MoveUsed { index: 0, mv: Move::ClawStrike })));
    // The claw landed: knight takes at least the min-one floor.
    assert!(state.combatants[1].hp < 150);
}

/// The engine runs the phase check as part of upkeep, so a boss dragged
/// below the threshold during a round escalates at the end of it.
#[test]
fn engine_upkeep_drives_the_escalation() {
    let orc = crate::roster::orc("Grum");
    let mut boss = final_boss();
    boss.hp = 240;
    let mut state = duel(orc, boss);

    // Berserk Strike punches through the scale armor (38 - 22 = 16),
    // dragging the boss from 240 to 224, under the 233 threshold.
    let mut rng = TurnRng::new_for_test(vec![50; 100]);
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::BerserkStrike)],
        vec![Action::UseMove(Move::ClawStrike)],
    );

    // The transition also healed the boss 10% past the threshold again.
    assert_eq!(boss_phase(&state.combatants[1]), 2);
    assert_eq!(state.combatants[1].hp, 224 + 35);
}

/// Fire Breath goes on cooldown after use; picking it again substitutes
/// Claw Strike until the cooldown has ticked away.
#[test]
fn fire_breath_cooldown_gates_reuse() {
    let knight = crate::roster::knight("Aldric");
    let mut state = duel(final_boss(), knight);

    let mut rng = mid_rng();
    resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::FireBreath)],
        vec![Action::UseMove(Move::SwordSlash)],
    );
    // Set to 3 on use, one upkeep tick leaves 2.
    assert!(matches!(
        state.combatants[0].resources,
        ArchetypeState::Boss {
            fire_breath_cooldown: 2,
            ..
        }
    ));
    assert!(state.combatants[1].has_status(StatusEffect::Burning));

    let mut rng = mid_rng();
    let bus = resolve_scripted(
        &mut state,
        &mut rng,
        vec![Action::UseMove(Move::FireBreath)],
        vec![Action::UseMove(Move::SwordSlash)],
    );
    assert!(bus.events().iter().any(|e| matches!(
        e,
        BattleEvent::FallbackMove {
            index: 0,
            blocked: Move::FireBreath,
            substituted: Move::ClawStrike
        }
    )));
}

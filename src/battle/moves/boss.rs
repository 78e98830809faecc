use crate::battle::conditions::StatusEffect;
use crate::battle::mechanics::{deal_damage, inflict_status, mitigate_min_one};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::{ArchetypeState, Combatant};

fn boss_phase(combatant: &Combatant) -> u8 {
    match combatant.resources {
        ArchetypeState::Boss { phase, .. } => phase,
        _ => 1,
    }
}

pub(super) fn claw_strike(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let damage = rng.roll_range(
        attacker.attack.saturating_sub(3),
        attacker.attack + 2,
        "claw strike damage",
    );
    let actual = mitigate_min_one(damage as f64, defender.total_defense());
    deal_damage(defender_index, defender, actual, bus);

    // From phase 2 the claws rake deep enough to open wounds.
    if boss_phase(attacker) >= 2 && rng.chance(0.3, "claw strike bleed") {
        inflict_status(defender_index, defender, StatusEffect::Bleeding, rng, bus);
    }
}

pub(super) fn fire_breath(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    // Flames wash around armor instead of meeting it head on.
    let damage = rng.roll_range(
        attacker.attack + 5,
        attacker.attack + 9,
        "fire breath damage",
    );
    let actual = mitigate_min_one(damage as f64, defender.total_defense() / 2);
    deal_damage(defender_index, defender, actual, bus);

    inflict_status(defender_index, defender, StatusEffect::Burning, rng, bus);

    if let ArchetypeState::Boss {
        fire_breath_cooldown,
        ..
    } = &mut attacker.resources
    {
        *fire_breath_cooldown = 3;
    }
}

pub(super) fn wing_slam(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let damage = rng.roll_range(
        attacker.attack + 3,
        attacker.attack + 7,
        "wing slam damage",
    );
    let actual = mitigate_min_one(damage as f64, defender.total_defense());
    deal_damage(defender_index, defender, actual, bus);

    if rng.chance(0.4, "wing slam stun") {
        inflict_status(defender_index, defender, StatusEffect::Stunned, rng, bus);
    }

    if let ArchetypeState::Boss {
        wing_slam_cooldown, ..
    } = &mut attacker.resources
    {
        *wing_slam_cooldown = 2;
    }
}

pub(super) fn roar_of_terror(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    // The fright saps strength immediately; the mark itself fades at upkeep.
    let old_attack = defender.attack;
    defender.attack = ((defender.attack as f64 * 0.8) as u32).max(1);
    bus.push(BattleEvent::AttackWeakened {
        target: defender_index,
        old_attack,
        new_attack: defender.attack,
    });
    inflict_status(defender_index, defender, StatusEffect::Frightened, rng, bus);

    if let ArchetypeState::Boss { roar_cooldown, .. } = &mut attacker.resources {
        *roar_cooldown = 4;
    }
}

pub(super) fn berserker_fury(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    for _ in 0..3 {
        let damage = rng.roll_range(
            attacker.attack.saturating_sub(2),
            attacker.attack + 1,
            "berserker fury strike",
        );
        let actual = mitigate_min_one(damage as f64, defender.total_defense());
        deal_damage(defender_index, defender, actual, bus);
    }

    if let ArchetypeState::Boss {
        rage_counter,
        fury_cooldown,
        ..
    } = &mut attacker.resources
    {
        *rage_counter += 1;
        *fury_cooldown = 5;
    }
}

/// End-of-round escalation check. Fires at most once per call and only
/// while below the final phase; the HP trigger for phase `p` is
/// `max_hp * (max_phase - p) / max_phase`.
pub(crate) fn phase_transition(index: usize, boss: &mut Combatant, bus: &mut EventBus) -> bool {
    let hp = boss.hp;
    let max_hp = boss.max_hp;

    let new_phase = {
        let ArchetypeState::Boss {
            phase,
            max_phase,
            fire_breath_cooldown,
            wing_slam_cooldown,
            roar_cooldown,
            fury_cooldown,
            ..
        } = &mut boss.resources
        else {
            return false;
        };

        if *phase >= *max_phase {
            return false;
        }
        let threshold = max_hp * (*max_phase - *phase) as u32 / *max_phase as u32;
        if hp > threshold {
            return false;
        }

        *phase += 1;
        *fire_breath_cooldown = 0;
        *wing_slam_cooldown = 0;
        *roar_cooldown = 0;
        *fury_cooldown = 0;
        *phase
    };

    // Shrug off the crowd control that dragged it down.
    for effect in [
        StatusEffect::Stunned,
        StatusEffect::Frozen,
        StatusEffect::Burning,
        StatusEffect::Shocked,
    ] {
        boss.statuses.remove(&effect);
    }

    boss.attack = (boss.attack as f64 * 1.2) as u32;
    boss.defense = (boss.defense as f64 * 1.1) as u32;
    boss.heal((boss.max_hp as f64 * 0.1) as u32);
    if new_phase == 3 {
        boss.block_chance = 0.1;
    }

    bus.push(BattleEvent::BossPhaseStarted {
        index,
        phase: new_phase,
    });
    true
}

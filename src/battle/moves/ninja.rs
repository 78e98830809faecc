use schema::Move;

use crate::battle::conditions::StatusEffect;
use crate::battle::dice::{roll_attack_dice, DiceTag};
use crate::battle::mechanics::{
    apply_elemental, attempt_block, attempt_dodge, check_combo, deal_damage, inflict_status,
    mitigate,
};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::ArchetypeState;

/// Dodge bonus granted while shadowstep stealth is active.
const SHADOWSTEP_DODGE_BONUS: f64 = 0.4;

pub(super) fn shadowstep(state: &mut BattleState, attacker_index: usize, bus: &mut EventBus) {
    let attacker = &mut state.combatants[attacker_index];

    attacker.dodge_chance += SHADOWSTEP_DODGE_BONUS;
    if let ArchetypeState::Ninja {
        shadowstep_cooldown,
        stealth_active,
        ..
    } = &mut attacker.resources
    {
        *stealth_active = true;
        *shadowstep_cooldown = 3;
    }

    bus.push(BattleEvent::StealthEntered {
        index: attacker_index,
    });
}

pub(super) fn twin_fang_slash(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::TwinFangSlash, bus);

    // One dodge roll covers the whole double strike; a clean escape also
    // leaves the ninja's stealth intact.
    if attempt_dodge(defender_index, defender, 0.0, rng, bus) {
        return;
    }

    let stealthed = matches!(
        attacker.resources,
        ArchetypeState::Ninja {
            stealth_active: true,
            ..
        }
    );

    for _ in 0..2 {
        let mut damage =
            attacker.attack as f64 * 0.8 * combo + attacker.equipment_attack_boost() as f64;
        if stealthed {
            damage *= 1.3;
        }
        let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

        let outcome = roll_attack_dice(
            attacker.archetype,
            attacker_index,
            Move::TwinFangSlash,
            rng,
            bus,
        );
        if outcome.tag == DiceTag::Miss {
            bus.push(BattleEvent::MoveMissed {
                index: attacker_index,
                mv: Move::TwinFangSlash,
            });
            continue;
        }

        let damage = attempt_block(
            defender_index,
            defender,
            damage * outcome.multiplier,
            1.0,
            rng,
            bus,
        );
        let final_damage = mitigate(damage, defender.total_defense());
        deal_damage(defender_index, defender, final_damage, bus);
    }

    if stealthed {
        if let ArchetypeState::Ninja { stealth_active, .. } = &mut attacker.resources {
            *stealth_active = false;
        }
        attacker.dodge_chance -= SHADOWSTEP_DODGE_BONUS;
    }
}

pub(super) fn shuriken_storm(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let used;
    let remaining;
    if let ArchetypeState::Ninja { shuriken_count, .. } = &mut attacker.resources {
        used = rng.roll_range(2, 3, "shurikens thrown").min(*shuriken_count);
        *shuriken_count -= used;
        remaining = *shuriken_count;
    } else {
        return;
    }
    bus.push(BattleEvent::ShurikensThrown {
        index: attacker_index,
        used,
        remaining,
    });

    for _ in 0..used {
        // Each shuriken is a little easier to sidestep than a blade.
        if attempt_dodge(defender_index, defender, 0.1, rng, bus) {
            continue;
        }

        let damage = attacker.attack as f64 * 0.6 + attacker.equipment_attack_boost() as f64;
        let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

        let outcome = roll_attack_dice(
            attacker.archetype,
            attacker_index,
            Move::ShurikenStorm,
            rng,
            bus,
        );
        if outcome.tag == DiceTag::Miss {
            bus.push(BattleEvent::MoveMissed {
                index: attacker_index,
                mv: Move::ShurikenStorm,
            });
            continue;
        }

        // Thrown steel slips past shields and finds gaps in armor.
        let damage = attempt_block(
            defender_index,
            defender,
            damage * outcome.multiplier,
            0.3,
            rng,
            bus,
        );
        let final_damage = mitigate(damage, defender.total_defense() / 2);
        deal_damage(defender_index, defender, final_damage, bus);
    }

    if rng.chance(0.6, "shadow veil") {
        inflict_status(defender_index, defender, StatusEffect::Shadowed, rng, bus);
    }
}

pub(super) fn smoke_bomb_escape(
    state: &mut BattleState,
    attacker_index: usize,
    bus: &mut EventBus,
) {
    let attacker = &mut state.combatants[attacker_index];

    let heal_amount = (attacker.max_hp as f64 * 0.15) as u32;
    let restored = attacker.heal(heal_amount);
    bus.push(BattleEvent::Healed {
        index: attacker_index,
        amount: restored,
        new_hp: attacker.hp,
    });

    if let ArchetypeState::Ninja {
        shadowstep_cooldown,
        smoke_bomb_used,
        ..
    } = &mut attacker.resources
    {
        *shadowstep_cooldown = 0;
        *smoke_bomb_used = true;
    }

    if attacker.statuses.insert(StatusEffect::Untouchable) {
        bus.push(BattleEvent::StatusApplied {
            target: attacker_index,
            effect: StatusEffect::Untouchable,
        });
    }
}

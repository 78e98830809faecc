use schema::Move;

use crate::battle::conditions::StatusEffect;
use crate::battle::dice::{roll_attack_dice, DiceTag};
use crate::battle::mechanics::{
    apply_elemental, attempt_block, check_combo, deal_damage, inflict_status, mitigate,
};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};

pub(super) fn sword_slash(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::SwordSlash, bus);
    let damage = (attacker.attack + attacker.equipment_attack_boost()) as f64 * combo;
    let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

    let outcome = roll_attack_dice(attacker.archetype, attacker_index, Move::SwordSlash, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::SwordSlash,
        });
        return;
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

pub(super) fn shield_bash(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let damage = attacker.attack as f64 * 0.75 + attacker.equipment_attack_boost() as f64;
    let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

    let outcome = roll_attack_dice(attacker.archetype, attacker_index, Move::ShieldBash, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::ShieldBash,
        });
        return;
    }

    // A shield to the face cannot be parried; it goes straight to armor.
    let final_damage = mitigate(damage * outcome.multiplier, defender.total_defense());
    deal_damage(defender_index, defender, final_damage, bus);

    // A frozen defender is easier to rattle.
    let stun_chance = if defender.has_status(StatusEffect::Frozen) {
        0.4
    } else {
        0.3
    };
    if rng.chance(stun_chance, "shield bash stun") {
        inflict_status(defender_index, defender, StatusEffect::Stunned, rng, bus);
    }
}

pub(super) fn mighty_strike(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    if !rng.chance(0.7, "mighty strike execution") {
        bus.push(BattleEvent::MoveWhiffed {
            index: attacker_index,
            mv: Move::MightyStrike,
        });
        return;
    }

    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::MightyStrike, bus);
    let damage =
        attacker.attack as f64 * 1.5 * combo + attacker.equipment_attack_boost() as f64;
    let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

    let outcome =
        roll_attack_dice(attacker.archetype, attacker_index, Move::MightyStrike, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::MightyStrike,
        });
        return;
    }

    // Too much momentum to block reliably.
    let damage = attempt_block(
        defender_index,
        defender,
        damage * outcome.multiplier,
        0.5,
        rng,
        bus,
    );
    let final_damage = mitigate(damage, defender.total_defense());
    deal_damage(defender_index, defender, final_damage, bus);
}

pub(super) fn rapid_strikes(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    for _ in 0..3 {
        let damage = attacker.attack as f64 * 0.6 + attacker.equipment_attack_boost() as f64;
        let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);
        // Flurry strikes ride the dice multiplier directly; a miss band
        // simply zeroes that strike.
        let outcome = roll_attack_dice(
            attacker.archetype,
            attacker_index,
            Move::RapidStrikes,
            rng,
            bus,
        );
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
}

use schema::{Element, Move};

use crate::battle::conditions::StatusEffect;
use crate::battle::dice::{roll_attack_dice, DiceTag};
use crate::battle::mechanics::{
    apply_elemental, attempt_block, check_combo, deal_damage, inflict_status, mitigate,
};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::{ArchetypeState, Combatant};

/// Spend one Roar charge if any remain; returns the damage multiplier.
fn consume_attack_buff(attacker: &mut Combatant) -> f64 {
    if let ArchetypeState::Orc { attack_buff_turns } = &mut attacker.resources {
        if *attack_buff_turns > 0 {
            *attack_buff_turns -= 1;
            return 1.2;
        }
    }
    1.0
}

pub(super) fn cleave(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::Cleave, bus);
    let mut damage = (attacker.attack + attacker.equipment_attack_boost()) as f64 * combo;
    damage *= consume_attack_buff(attacker);
    let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

    let outcome = roll_attack_dice(attacker.archetype, attacker_index, Move::Cleave, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::Cleave,
        });
        return;
    }

    // A cleave is too wide to block; only armor soaks it.
    let final_damage = mitigate(damage * outcome.multiplier, defender.total_defense());
    deal_damage(defender_index, defender, final_damage, bus);
}

pub(super) fn berserk_strike(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::BerserkStrike, bus);
    let mut damage =
        attacker.attack as f64 * 1.8 * combo + attacker.equipment_attack_boost() as f64;
    damage *= consume_attack_buff(attacker);
    let damage = apply_elemental(attacker, defender_index, defender, damage, None, rng, bus);

    let outcome =
        roll_attack_dice(attacker.archetype, attacker_index, Move::BerserkStrike, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::BerserkStrike,
        });
    } else {
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

    // The swing costs the orc either way; being frozen dulls the frenzy.
    let recoil_scale = if attacker.has_status(StatusEffect::Frozen) {
        0.5
    } else {
        1.0
    };
    let recoil = (attacker.max_hp as f64 * 0.1 * recoil_scale) as u32;
    attacker.take_damage(recoil);
    bus.push(BattleEvent::RecoilDamage {
        index: attacker_index,
        amount: recoil,
    });
}

pub(super) fn roar(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    if let ArchetypeState::Orc { attack_buff_turns } = &mut attacker.resources {
        *attack_buff_turns = 2;
    }
    if attacker.statuses.insert(StatusEffect::Buffed) {
        bus.push(BattleEvent::StatusApplied {
            target: attacker_index,
            effect: StatusEffect::Buffed,
        });
    }

    // A storm-charged orc's roar crackles over the whole arena.
    if attacker.affinity == Some(Element::Lightning) && rng.chance(0.5, "roar shock") {
        inflict_status(defender_index, defender, StatusEffect::Shocked, rng, bus);
    }
}

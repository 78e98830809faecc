use schema::{Element, Move};

use crate::battle::dice::{roll_attack_dice, DiceTag};
use crate::battle::mechanics::{apply_elemental, check_combo, deal_damage, mitigate};
use crate::battle::state::{BattleEvent, BattleState, EventBus, TurnRng};
use crate::combatant::ArchetypeState;

pub(super) fn arcane_lance(
    state: &mut BattleState,
    attacker_index: usize,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    let defender_index = BattleState::opponent_of(attacker_index);
    let (attacker, defender) = state.pair_mut(attacker_index);

    let combo = check_combo(attacker_index, attacker, Move::ArcaneLance, bus);
    let damage = (attacker.attack + attacker.equipment_attack_boost()) as f64 * combo;
    let damage = apply_elemental(
        attacker,
        defender_index,
        defender,
        damage,
        Some(Element::Lightning),
        rng,
        bus,
    );

    let outcome =
        roll_attack_dice(attacker.archetype, attacker_index, Move::ArcaneLance, rng, bus);
    if outcome.tag == DiceTag::Miss {
        bus.push(BattleEvent::MoveMissed {
            index: attacker_index,
            mv: Move::ArcaneLance,
        });
        return;
    }

    // Lightning cannot be parried; armor alone soaks it.
    let final_damage = mitigate(damage * outcome.multiplier, defender.total_defense());
    deal_damage(defender_index, defender, final_damage, bus);
}

pub(super) fn celestial_healing(
    state: &mut BattleState,
    attacker_index: usize,
    bus: &mut EventBus,
) {
    let attacker = &mut state.combatants[attacker_index];

    let heal_amount = (attacker.attack as f64 * 1.5) as u32;
    let restored = attacker.heal(heal_amount);
    bus.push(BattleEvent::Healed {
        index: attacker_index,
        amount: restored,
        new_hp: attacker.hp,
    });

    if let ArchetypeState::Mage { heal_cooldown, .. } = &mut attacker.resources {
        *heal_cooldown = 3;
    }
}

/// Rains down on every supplied target independently; the caller provides
/// the target list so the spell works against any number of foes.
pub(super) fn meteor_fall(
    state: &mut BattleState,
    attacker_index: usize,
    targets: &[usize],
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    for &target_index in targets {
        if target_index == attacker_index {
            continue;
        }
        let (attacker, target) = state.pair_mut(attacker_index);

        let damage = attacker.attack as f64 * 2.2;
        let damage = apply_elemental(
            attacker,
            target_index,
            target,
            damage,
            Some(Element::Fire),
            rng,
            bus,
        );

        let outcome =
            roll_attack_dice(attacker.archetype, attacker_index, Move::MeteorFall, rng, bus);
        if outcome.tag == DiceTag::Miss {
            bus.push(BattleEvent::MoveMissed {
                index: attacker_index,
                mv: Move::MeteorFall,
            });
            continue;
        }

        let final_damage = mitigate(damage * outcome.multiplier, target.total_defense());
        deal_damage(target_index, target, final_damage, bus);
    }

    if let ArchetypeState::Mage { meteor_cooldown, .. } =
        &mut state.combatants[attacker_index].resources
    {
        *meteor_cooldown = 4;
    }
}

use schema::{Archetype, Element, Move};

use crate::battle::conditions::StatusEffect;
use crate::battle::state::{BattleEvent, EventBus, TurnRng};
use crate::combatant::Combatant;

/// Chance that an elemental hit inflicts its bound status effect.
const ELEMENTAL_PROC_CHANCE: f64 = 0.4;

/// Per-element damage multiplier.
pub fn element_damage_mod(element: Element) -> f64 {
    match element {
        Element::Fire => 1.2,
        Element::Ice => 0.9,
        Element::Lightning => 1.1,
        Element::Shadow => 1.15,
    }
}

/// The status effect an element inflicts on proc.
pub fn element_status(element: Element) -> StatusEffect {
    match element {
        Element::Fire => StatusEffect::Burning,
        Element::Ice => StatusEffect::Frozen,
        Element::Lightning => StatusEffect::Shocked,
        Element::Shadow => StatusEffect::Shadowed,
    }
}

/// Apply a status effect to a target, honoring boss crowd-control
/// resistance: a boss already carrying Stunned or Frozen shrugs off a
/// reapplication half the time. Returns whether the effect landed.
pub fn inflict_status(
    target_index: usize,
    target: &mut Combatant,
    effect: StatusEffect,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if target.archetype == Archetype::Boss
        && matches!(effect, StatusEffect::Stunned | StatusEffect::Frozen)
        && target.has_status(effect)
        && rng.chance(0.5, "boss status resistance")
    {
        bus.push(BattleEvent::StatusResisted {
            target: target_index,
            effect,
        });
        return false;
    }

    if target.statuses.insert(effect) {
        bus.push(BattleEvent::StatusApplied {
            target: target_index,
            effect,
        });
    }
    true
}

/// Resolve the active element (explicit override first, then the
/// attacker's affinity) and scale the damage; a 40% proc inflicts the
/// element's status on the defender. No element means no change.
pub fn apply_elemental(
    attacker: &Combatant,
    defender_index: usize,
    defender: &mut Combatant,
    base_damage: f64,
    element_override: Option<Element>,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> f64 {
    let Some(element) = element_override.or(attacker.affinity) else {
        return base_damage;
    };

    let modified = base_damage * element_damage_mod(element);

    if rng.chance(ELEMENTAL_PROC_CHANCE, "elemental status proc") {
        inflict_status(defender_index, defender, element_status(element), rng, bus);
    }

    modified
}

/// Track consecutive uses of the same move. Mutates the attacker's combo
/// state unconditionally; from the third repeat onward the bonus kicks in.
pub fn check_combo(
    attacker_index: usize,
    attacker: &mut Combatant,
    mv: Move,
    bus: &mut EventBus,
) -> f64 {
    if attacker.last_move == Some(mv) {
        attacker.combo_counter += 1;
    } else {
        attacker.combo_counter = 1;
    }
    attacker.last_move = Some(mv);

    if attacker.combo_counter >= 3 {
        let multiplier = 1.2 + 0.1 * attacker.combo_counter as f64;
        bus.push(BattleEvent::ComboTriggered {
            index: attacker_index,
            count: attacker.combo_counter,
            multiplier,
        });
        multiplier
    } else {
        1.0
    }
}

/// One independent block attempt. `block_scale` lets moves that are hard
/// to block (Mighty Strike, Berserk Strike, Shuriken Storm) shrink the
/// defender's chance without mutating their stats.
pub fn attempt_block(
    defender_index: usize,
    defender: &Combatant,
    damage: f64,
    block_scale: f64,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> f64 {
    if rng.chance(defender.block_chance * block_scale, "block attempt") {
        bus.push(BattleEvent::AttackBlocked {
            index: defender_index,
        });
        damage * 0.5
    } else {
        damage
    }
}

/// One independent dodge attempt; true means the caller must skip every
/// remaining effect of the attack.
pub fn attempt_dodge(
    defender_index: usize,
    defender: &Combatant,
    base_chance: f64,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) -> bool {
    if rng.chance(base_chance + defender.dodge_chance, "dodge attempt") {
        bus.push(BattleEvent::AttackDodged {
            index: defender_index,
        });
        true
    } else {
        false
    }
}

/// Armor subtraction: truncate the rolled damage and soak it with defense.
pub fn mitigate(damage: f64, defense: u32) -> u32 {
    (damage.trunc() as i64 - defense as i64).max(0) as u32
}

/// Armor subtraction with a floor of 1; boss abilities always leave a mark.
pub fn mitigate_min_one(damage: f64, defense: u32) -> u32 {
    (damage.trunc() as i64 - defense as i64).max(1) as u32
}

/// Debit HP and report it. The engine checks for death after each action.
pub fn deal_damage(
    target_index: usize,
    target: &mut Combatant,
    amount: u32,
    bus: &mut EventBus,
) {
    target.take_damage(amount);
    bus.push(BattleEvent::DamageDealt {
        target: target_index,
        amount,
        remaining_hp: target.hp,
    });
}

//! Bot decision policies for battle opponents.

use schema::{Archetype, Move};

use crate::battle::engine::ActionProvider;
use crate::battle::state::{BattleState, TurnRng};
use crate::combatant::{Action, ArchetypeState};
use crate::equipment::Item;

/// Weighted, resource-aware move selection per archetype. Every decision
/// draws from the shared oracle, so a bot's choices replay exactly from a
/// seed.
pub struct BotPolicy;

impl BotPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BotPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Pick from cumulative percentage weights; the weights must sum to 100.
fn weighted_choice(rng: &mut TurnRng, reason: &str, options: &[(Move, u8)]) -> Move {
    debug_assert_eq!(options.iter().map(|(_, w)| *w as u32).sum::<u32>(), 100);
    let roll = rng.next_outcome(reason);
    let mut cumulative = 0;
    for (mv, weight) in options {
        cumulative += *weight;
        if roll <= cumulative {
            return *mv;
        }
    }
    options[options.len() - 1].0
}

fn knight_action(rng: &mut TurnRng) -> Action {
    Action::UseMove(weighted_choice(
        rng,
        "knight bot choice",
        &[
            (Move::SwordSlash, 40),
            (Move::ShieldBash, 20),
            (Move::MightyStrike, 20),
            (Move::RapidStrikes, 20),
        ],
    ))
}

fn orc_action(state: &BattleState, index: usize, rng: &mut TurnRng) -> Action {
    let unbuffed = matches!(
        state.combatants[index].resources,
        ArchetypeState::Orc {
            attack_buff_turns: 0
        }
    );
    if unbuffed && rng.chance(0.6, "orc roar bias") {
        return Action::UseMove(Move::Roar);
    }
    Action::UseMove(weighted_choice(
        rng,
        "orc bot choice",
        &[
            (Move::Cleave, 60),
            (Move::BerserkStrike, 30),
            (Move::Roar, 10),
        ],
    ))
}

fn mage_action(state: &BattleState, index: usize, rng: &mut TurnRng) -> Action {
    let combatant = &state.combatants[index];
    let ArchetypeState::Mage {
        heal_cooldown,
        meteor_cooldown,
    } = combatant.resources
    else {
        return Action::UseMove(Move::ArcaneLance);
    };

    if meteor_cooldown == 0 && rng.chance(0.4, "mage meteor bias") {
        return Action::UseMove(Move::MeteorFall);
    }
    if combatant.hp < combatant.max_hp / 2 && heal_cooldown == 0 {
        return Action::UseMove(Move::CelestialHealing);
    }
    Action::UseMove(weighted_choice(
        rng,
        "mage bot choice",
        &[
            (Move::ArcaneLance, 60),
            (Move::CelestialHealing, 20),
            (Move::MeteorFall, 20),
        ],
    ))
}

fn ninja_action(state: &BattleState, index: usize, rng: &mut TurnRng) -> Action {
    let combatant = &state.combatants[index];
    let ArchetypeState::Ninja {
        shadowstep_cooldown,
        shuriken_count,
        smoke_bomb_used,
        ..
    } = combatant.resources
    else {
        return Action::UseMove(Move::TwinFangSlash);
    };

    if shadowstep_cooldown == 0 && rng.chance(0.3, "ninja shadowstep bias") {
        return Action::UseMove(Move::Shadowstep);
    }
    if shuriken_count > 0 && rng.chance(0.4, "ninja shuriken bias") {
        return Action::UseMove(Move::ShurikenStorm);
    }
    if !smoke_bomb_used && combatant.is_critical() {
        return Action::UseMove(Move::SmokeBombEscape);
    }
    Action::UseMove(Move::TwinFangSlash)
}

/// Ordered weighted preference: fury when berserk, terror when cornered,
/// fire when hot, wings when rested, claws always.
fn boss_action(state: &BattleState, index: usize, rng: &mut TurnRng) -> Action {
    let combatant = &state.combatants[index];
    let ArchetypeState::Boss {
        phase,
        fire_breath_cooldown,
        wing_slam_cooldown,
        roar_cooldown,
        fury_cooldown,
        ..
    } = combatant.resources
    else {
        return Action::UseMove(Move::ClawStrike);
    };

    if phase >= 3 && fury_cooldown == 0 && rng.chance(0.4, "boss fury preference") {
        return Action::UseMove(Move::BerserkerFury);
    }
    let cornered = (combatant.hp as f64) < combatant.max_hp as f64 * 0.3;
    if cornered && roar_cooldown == 0 && rng.chance(0.5, "boss roar preference") {
        return Action::UseMove(Move::RoarOfTerror);
    }
    if phase >= 2 && fire_breath_cooldown == 0 && rng.chance(0.3, "boss fire preference") {
        return Action::UseMove(Move::FireBreath);
    }
    if wing_slam_cooldown == 0 && rng.chance(0.25, "boss wing preference") {
        return Action::UseMove(Move::WingSlam);
    }
    Action::UseMove(Move::ClawStrike)
}

impl ActionProvider for BotPolicy {
    fn choose_action(&mut self, state: &BattleState, index: usize, rng: &mut TurnRng) -> Action {
        match state.combatants[index].archetype {
            Archetype::Knight => knight_action(rng),
            Archetype::Orc => orc_action(state, index, rng),
            Archetype::Mage => mage_action(state, index, rng),
            Archetype::Ninja => ninja_action(state, index, rng),
            Archetype::Boss => boss_action(state, index, rng),
        }
    }

    fn choose_item(&mut self, state: &BattleState, index: usize) -> Option<usize> {
        let inventory = &state.combatants[index].inventory;
        inventory
            .iter()
            .position(|item| matches!(item, Item::Potion { .. }))
            .or_else(|| if inventory.is_empty() { None } else { Some(0) })
    }
}

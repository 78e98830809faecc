use schema::Archetype;

use crate::battle::conditions::{StatusEffect, BLEED_TICK_FRACTION, BURN_TICK_FRACTION};
use crate::battle::mechanics::{deal_damage, mitigate};
use crate::battle::moves;
use crate::battle::state::{
    BattleEvent, BattleState, EventBus, GameState, ItemFailure, TurnRng,
};
use crate::combatant::{Action, ArchetypeState};
use crate::equipment::{Item, WearState, BOMB_SELF_DAMAGE};

/// The presentation seam: the engine pulls intents through this trait and
/// pushes outcomes back as events. Bot policies and human front ends both
/// implement it.
pub trait ActionProvider {
    /// Select the acting combatant's intent for this turn.
    fn choose_action(&mut self, state: &BattleState, index: usize, rng: &mut TurnRng) -> Action;

    /// Select an inventory index after a `UseItem` intent, or `None` to
    /// change their mind.
    fn choose_item(&mut self, state: &BattleState, index: usize) -> Option<usize>;
}

/// Hook applied after both combatants have acted and before upkeep; the
/// tournament layer injects arena and weather hazards through this.
pub trait RoundEffect {
    fn on_round_end(&mut self, state: &mut BattleState, rng: &mut TurnRng, bus: &mut EventBus);
}

/// The menu a presentation layer should offer the acting combatant: the
/// archetype's full move catalogue, plus the item option while anything
/// is left in the satchel. Moves currently gated by a cooldown stay
/// listed; picking one substitutes the default move rather than erroring.
pub fn get_valid_actions(state: &BattleState, index: usize) -> Vec<Action> {
    let combatant = &state.combatants[index];
    let mut actions: Vec<Action> = combatant
        .archetype
        .move_list()
        .iter()
        .map(|mv| Action::UseMove(*mv))
        .collect();
    if !combatant.inventory.is_empty() {
        actions.push(Action::UseItem);
    }
    actions
}

/// Resolve one full round: challenger acts, defender acts, round effects,
/// then end-of-round upkeep. Returns the events that occurred. Victory is
/// checked after every action; once the battle is terminal nothing else
/// runs.
pub fn resolve_round(
    state: &mut BattleState,
    rng: &mut TurnRng,
    providers: &mut [&mut dyn ActionProvider; 2],
    round_effects: &mut [Box<dyn RoundEffect>],
) -> EventBus {
    let mut bus = EventBus::new();
    if state.game_state != GameState::WaitingForActions {
        return bus;
    }

    state.game_state = GameState::RoundInProgress;
    bus.push(BattleEvent::RoundStarted { round: state.round });

    for index in 0..2 {
        if !state.combatants[index].is_alive() {
            continue;
        }
        if consume_skip_flag(state, index, &mut bus) {
            continue;
        }

        let action = providers[index].choose_action(state, index, rng);
        execute_action(state, index, action, &mut *providers[index], rng, &mut bus);

        if check_victory(state, &mut bus) {
            return bus;
        }
    }

    for effect in round_effects.iter_mut() {
        effect.on_round_end(state, rng, &mut bus);
    }
    if check_victory(state, &mut bus) {
        return bus;
    }

    for index in 0..2 {
        upkeep(state, index, &mut bus);
    }
    if check_victory(state, &mut bus) {
        return bus;
    }

    state.round += 1;
    state.game_state = GameState::WaitingForActions;
    bus.push(BattleEvent::RoundEnded);
    bus
}

/// Stunned and Untouchable are consumed the moment the engine observes
/// them: the flag is cleared and the holder loses the turn. One flag per
/// round; a combatant somehow carrying both spends them over two rounds.
fn consume_skip_flag(state: &mut BattleState, index: usize, bus: &mut EventBus) -> bool {
    for effect in [StatusEffect::Stunned, StatusEffect::Untouchable] {
        if state.combatants[index].statuses.remove(&effect) {
            bus.push(BattleEvent::TurnSkipped { index, effect });
            return true;
        }
    }
    false
}

fn execute_action(
    state: &mut BattleState,
    index: usize,
    action: Action,
    provider: &mut dyn ActionProvider,
    rng: &mut TurnRng,
    bus: &mut EventBus,
) {
    match action {
        Action::UseMove(mv) => moves::execute_move(state, index, mv, rng, bus),
        Action::UseItem => {
            let inventory_len = state.combatants[index].inventory.len();
            if inventory_len == 0 {
                bus.push(BattleEvent::ItemFailed {
                    index,
                    reason: ItemFailure::EmptyInventory,
                });
                return run_default_move(state, index, rng, bus);
            }
            match provider.choose_item(state, index) {
                Some(item_index) if item_index < inventory_len => {
                    use_item(state, index, item_index, bus)
                }
                Some(item_index) => {
                    // A bad pick costs nothing from the satchel; the turn
                    // is spent on the default attack instead.
                    bus.push(BattleEvent::ItemFailed {
                        index,
                        reason: ItemFailure::InvalidIndex(item_index),
                    });
                    run_default_move(state, index, rng, bus)
                }
                None => run_default_move(state, index, rng, bus),
            }
        }
    }
}

fn run_default_move(state: &mut BattleState, index: usize, rng: &mut TurnRng, bus: &mut EventBus) {
    let mv = state.combatants[index].archetype.default_move();
    moves::execute_move(state, index, mv, rng, bus);
}

fn use_item(state: &mut BattleState, index: usize, item_index: usize, bus: &mut EventBus) {
    let item = state.combatants[index].inventory.remove(item_index);
    bus.push(BattleEvent::ItemUsed { index, item });

    match item {
        Item::Potion { heal_amount } => {
            let user = &mut state.combatants[index];
            let restored = user.heal(heal_amount);
            bus.push(BattleEvent::Healed {
                index,
                amount: restored,
                new_hp: user.hp,
            });
        }
        Item::Bomb { damage } => {
            let target_index = BattleState::opponent_of(index);
            let (user, target) = state.pair_mut(index);

            // A bomb always lands; armor only half-shields the blast.
            let actual = mitigate(damage as f64, target.total_defense() / 2);
            deal_damage(target_index, target, actual, bus);

            user.take_damage(BOMB_SELF_DAMAGE);
            bus.push(BattleEvent::RecoilDamage {
                index,
                amount: BOMB_SELF_DAMAGE,
            });
        }
    }
}

/// End-of-round upkeep for one combatant: equipment wear, damage over
/// time, informational status expiry, cooldown reduction, and the boss
/// escalation check.
fn upkeep(state: &mut BattleState, index: usize, bus: &mut EventBus) {
    let combatant = &mut state.combatants[index];
    if !combatant.is_alive() {
        return;
    }

    if let Some(equipment) = &mut combatant.equipment {
        if !equipment.is_broken() {
            match equipment.wear_down() {
                WearState::Broke => {
                    let name = equipment.name.clone();
                    bus.push(BattleEvent::EquipmentBroke { index, name });
                }
                WearState::NearBreaking | WearState::Worn => {
                    bus.push(BattleEvent::EquipmentDamaged {
                        index,
                        durability: equipment.durability,
                    });
                }
            }
        }
    }

    if combatant.has_status(StatusEffect::Burning) {
        let amount = (combatant.max_hp as f64 * BURN_TICK_FRACTION) as u32;
        combatant.take_damage(amount);
        bus.push(BattleEvent::StatusDamage {
            target: index,
            effect: StatusEffect::Burning,
            amount,
            remaining_hp: combatant.hp,
        });
    }

    if combatant.statuses.remove(&StatusEffect::Bleeding) {
        let amount = (combatant.max_hp as f64 * BLEED_TICK_FRACTION) as u32;
        combatant.take_damage(amount);
        bus.push(BattleEvent::StatusDamage {
            target: index,
            effect: StatusEffect::Bleeding,
            amount,
            remaining_hp: combatant.hp,
        });
    }

    for effect in [
        StatusEffect::Frightened,
        StatusEffect::Frozen,
        StatusEffect::Shadowed,
    ] {
        if combatant.statuses.remove(&effect) {
            bus.push(BattleEvent::StatusExpired {
                target: index,
                effect,
            });
        }
    }

    // The Roar marker outlives its charges by at most one upkeep.
    if matches!(
        combatant.resources,
        ArchetypeState::Orc {
            attack_buff_turns: 0
        }
    ) && combatant.statuses.remove(&StatusEffect::Buffed)
    {
        bus.push(BattleEvent::StatusExpired {
            target: index,
            effect: StatusEffect::Buffed,
        });
    }

    combatant.reduce_cooldowns();

    if combatant.archetype == Archetype::Boss {
        moves::phase_transition(index, combatant, bus);
    }
}

/// Move the battle to a terminal state if anyone has died. Simultaneous
/// death (only possible from round effects or upkeep) is a draw.
fn check_victory(state: &mut BattleState, bus: &mut EventBus) -> bool {
    let challenger_alive = state.combatants[0].is_alive();
    let defender_alive = state.combatants[1].is_alive();

    let outcome = match (challenger_alive, defender_alive) {
        (true, true) => return false,
        (true, false) => GameState::ChallengerWin,
        (false, true) => GameState::DefenderWin,
        (false, false) => GameState::Draw,
    };
    state.game_state = outcome;

    for index in 0..2 {
        if !state.combatants[index].is_alive() {
            bus.push(BattleEvent::Defeated { index });
        }
    }
    bus.push(BattleEvent::BattleEnded {
        winner: state.winner(),
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster;
    use schema::Move;

    #[test]
    fn valid_actions_list_the_full_catalogue_plus_the_item_option() {
        let state = BattleState::new(
            "menu".to_string(),
            roster::knight("Aldric"),
            roster::orc("Grum"),
        );
        let actions = get_valid_actions(&state, 0);
        assert_eq!(actions.len(), 5); // four moves plus the satchel
        assert!(actions.contains(&Action::UseMove(Move::RapidStrikes)));
        assert!(actions.contains(&Action::UseItem));
    }

    #[test]
    fn an_empty_satchel_drops_the_item_option() {
        let mut knight = roster::knight("Aldric");
        knight.inventory.clear();
        let state =
            BattleState::new("menu".to_string(), knight, roster::orc("Grum"));
        let actions = get_valid_actions(&state, 0);
        assert!(!actions.contains(&Action::UseItem));
        assert_eq!(actions.len(), 4);
    }
}

use std::collections::VecDeque;

use crate::battle::engine::{resolve_round, ActionProvider};
use crate::battle::state::{BattleState, EventBus, TurnRng};
use crate::combatant::{Action, Combatant};

/// An action provider that replays a fixed script, falling back to the
/// archetype's default move once the script runs out.
pub struct ScriptedProvider {
    actions: VecDeque<Action>,
    item_choices: VecDeque<Option<usize>>,
}

impl ScriptedProvider {
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions: actions.into(),
            item_choices: VecDeque::new(),
        }
    }

    pub fn with_item_choices(mut self, choices: Vec<Option<usize>>) -> Self {
        self.item_choices = choices.into();
        self
    }
}

impl ActionProvider for ScriptedProvider {
    fn choose_action(&mut self, state: &BattleState, index: usize, _rng: &mut TurnRng) -> Action {
        self.actions
            .pop_front()
            .unwrap_or(Action::UseMove(state.combatants[index].archetype.default_move()))
    }

    fn choose_item(&mut self, _state: &BattleState, _index: usize) -> Option<usize> {
        self.item_choices.pop_front().unwrap_or(None)
    }
}

/// A fresh 1v1 battle state.
pub fn duel(challenger: Combatant, defender: Combatant) -> BattleState {
    BattleState::new("test_battle".to_string(), challenger, defender)
}

/// An oracle pinned to mid-band values: every d20 lands in the "normal
/// 1.0x" band and every percentage check under 50% fails.
pub fn mid_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Resolve one round with scripted actions for both sides and no round
/// effects.
pub fn resolve_scripted(
    state: &mut BattleState,
    rng: &mut TurnRng,
    challenger_actions: Vec<Action>,
    defender_actions: Vec<Action>,
) -> EventBus {
    let mut challenger = ScriptedProvider::new(challenger_actions);
    let mut defender = ScriptedProvider::new(defender_actions);
    let mut providers: [&mut dyn ActionProvider; 2] = [&mut challenger, &mut defender];
    resolve_round(state, rng, &mut providers, &mut [])
}
